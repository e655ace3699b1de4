//! Interpretation of raw inference output.
//!
//! DESIGN
//! ======
//! Backends answer with either a plain completion body or line-delimited
//! stream frames of the form `0:"delta"`. Reply assembly concatenates
//! frame deltas in arrival order; color extraction normalizes the same
//! framing away before scanning for a hex token. Neither function
//! retries — retry policy belongs to the color fetch machine.

#[cfg(test)]
#[path = "reply_test.rs"]
mod reply_test;

use std::sync::OnceLock;

use regex::Regex;

fn frame_line_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r#"^\d+:"(.*)"$"#).expect("frame line pattern"))
}

fn wrapper_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r#"\d+:"(.+?)""#).expect("wrapper pattern"))
}

fn hex_color_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"#[0-9A-Fa-f]{6}").expect("hex color pattern"))
}

/// Assemble the display text of a bot reply from a raw response body.
///
/// A body carrying at least one stream-frame line is reduced to its
/// concatenated content deltas; envelope lines and empty deltas
/// contribute nothing. A body without any frame line is a plain
/// completion and is returned whole. A framed body with no content
/// yields the empty string — a defined edge case, not a failure.
#[must_use]
pub fn assemble_reply(raw: &str) -> String {
    let mut saw_frame = false;
    let mut out = String::new();
    for line in raw.lines() {
        if let Some(captures) = frame_line_re().captures(line) {
            saw_frame = true;
            out.push_str(&unescape_delta(&captures[1]));
        }
    }
    if saw_frame { out } else { raw.to_owned() }
}

fn unescape_delta(delta: &str) -> String {
    let mut out = String::with_capacity(delta.len());
    let mut chars = delta.chars();
    while let Some(ch) = chars.next() {
        if ch != '\\' {
            out.push(ch);
            continue;
        }
        match chars.next() {
            Some('n') => out.push('\n'),
            Some('t') => out.push('\t'),
            Some(other) => out.push(other),
            None => {}
        }
    }
    out
}

/// Extract the first `#RRGGBB` token from a loosely formatted color
/// reply, case-insensitive in the hex digits.
///
/// The body is normalized first: stream-frame wrappers are reduced to
/// their quoted fragments, then backslashes and newlines are dropped, so
/// a token split across frames still matches.
#[must_use]
pub fn extract_color(raw: &str) -> Option<String> {
    let unwrapped = wrapper_re().replace_all(raw, "$1");
    let normalized = unwrapped.replace('\\', "").replace('\n', "");
    hex_color_re()
        .find(&normalized)
        .map(|token| token.as_str().to_owned())
}
