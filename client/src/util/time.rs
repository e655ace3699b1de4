//! Clock-face formatting for message timestamps.

#[cfg(test)]
#[path = "time_test.rs"]
mod time_test;

/// Format a ms-epoch timestamp as a 24-hour `HH:mm` clock reading (UTC).
#[allow(clippy::cast_possible_truncation)]
#[must_use]
pub fn format_clock(timestamp_ms: f64) -> String {
    let total_seconds = (timestamp_ms / 1000.0).floor() as i64;
    let day_seconds = total_seconds.rem_euclid(86_400);
    let hours = day_seconds / 3600;
    let minutes = (day_seconds % 3600) / 60;
    format!("{hours:02}:{minutes:02}")
}
