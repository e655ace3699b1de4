//! Bounded-retry state machine for the model-derived accent color.
//!
//! DESIGN
//! ======
//! The color model often answers with conversational prose instead of a
//! hex token. Attempts are bounded at [`MAX_ATTEMPTS`] with a fixed pause
//! between retries; exhaustion and transport failure both commit the
//! fallback color, so the machine always comes to rest on a committed
//! value and the UI never sees a half-updated state.

#[cfg(test)]
#[path = "color_test.rs"]
mod color_test;

use crate::api::{ApiError, ChatApi};
use crate::reply;

/// Color committed when extraction is exhausted or transport fails.
pub const FALLBACK_COLOR: &str = "#c2deb9";

/// Maximum color requests issued per fetch.
pub const MAX_ATTEMPTS: u8 = 5;

/// Pause between retry attempts, in seconds.
pub const RETRY_PAUSE_SECS: u32 = 3;

/// Next action after one observed response or failure.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ColorStep {
    /// A hex token was committed; the machine is idle again.
    Applied(String),
    /// No token found; issue the same request again after the pause.
    RetryAfter(u32),
    /// Attempts exhausted or transport failed; the fallback color is
    /// committed and the machine is idle again.
    FellBack,
}

/// Terminal result of one full [`ColorFetch::run`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ColorOutcome {
    Applied(String),
    FellBack,
    /// The run was ignored because a fetch was already in flight.
    Skipped,
}

/// Retry state for the accent color fetch. Created with the owning
/// surface, reused across fetches, discarded on unmount.
#[derive(Clone, Debug)]
pub struct ColorFetch {
    query: String,
    color: String,
    attempts: u8,
    in_flight: bool,
}

impl Default for ColorFetch {
    fn default() -> Self {
        Self { query: String::new(), color: FALLBACK_COLOR.to_owned(), attempts: 0, in_flight: false }
    }
}

impl ColorFetch {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_query(&mut self, query: impl Into<String>) {
        self.query = query.into();
    }

    #[must_use]
    pub fn query(&self) -> &str {
        &self.query
    }

    /// The currently committed color.
    #[must_use]
    pub fn color(&self) -> &str {
        &self.color
    }

    #[must_use]
    pub fn attempts(&self) -> u8 {
        self.attempts
    }

    #[must_use]
    pub fn in_flight(&self) -> bool {
        self.in_flight
    }

    /// Start a fetch. Returns `false` (and changes nothing) while a fetch
    /// is already in flight, so overlapping starts cannot corrupt the
    /// attempt counter.
    pub fn begin(&mut self) -> bool {
        if self.in_flight {
            return false;
        }
        self.in_flight = true;
        true
    }

    /// Feed one response body into the machine.
    pub fn observe_response(&mut self, body: &str) -> ColorStep {
        if let Some(token) = reply::extract_color(body) {
            self.color = token.clone();
            self.settle();
            return ColorStep::Applied(token);
        }
        self.attempts += 1;
        if self.attempts >= MAX_ATTEMPTS {
            self.color = FALLBACK_COLOR.to_owned();
            self.settle();
            return ColorStep::FellBack;
        }
        ColorStep::RetryAfter(RETRY_PAUSE_SECS)
    }

    /// Feed a transport failure into the machine. Treated identically to
    /// retry exhaustion.
    pub fn observe_failure(&mut self, error: &ApiError) -> ColorStep {
        log::warn!("color fetch failed: {error}");
        self.color = FALLBACK_COLOR.to_owned();
        self.settle();
        ColorStep::FellBack
    }

    fn settle(&mut self) {
        self.attempts = 0;
        self.in_flight = false;
    }

    /// Drive the machine to rest against `api`: one request per attempt,
    /// pausing [`RETRY_PAUSE_SECS`] between retries, at most
    /// [`MAX_ATTEMPTS`] requests.
    pub async fn run<A: ChatApi>(&mut self, api: &A) -> ColorOutcome {
        if !self.begin() {
            return ColorOutcome::Skipped;
        }
        loop {
            let step = match api.fetch_color(&self.query).await {
                Ok(body) => self.observe_response(&body),
                Err(error) => self.observe_failure(&error),
            };
            match step {
                ColorStep::Applied(token) => return ColorOutcome::Applied(token),
                ColorStep::FellBack => return ColorOutcome::FellBack,
                ColorStep::RetryAfter(seconds) => api.pause(seconds).await,
            }
        }
    }
}
