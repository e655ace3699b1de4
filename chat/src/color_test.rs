use super::*;

use std::cell::{Cell, RefCell};

use futures::executor::block_on;

use crate::api::{ApiError, ChatApi, ModelVariant, WireMessage};

/// Scripted color backend: pops one canned result per request and
/// records every pause.
struct ScriptedColorApi {
    bodies: RefCell<Vec<Result<String, ApiError>>>,
    requests: Cell<usize>,
    pauses: RefCell<Vec<u32>>,
}

impl ScriptedColorApi {
    fn new(bodies: Vec<Result<String, ApiError>>) -> Self {
        Self { bodies: RefCell::new(bodies), requests: Cell::new(0), pauses: RefCell::new(Vec::new()) }
    }
}

#[async_trait::async_trait(?Send)]
impl ChatApi for ScriptedColorApi {
    async fn chat(&self, _variant: ModelVariant, _history: Vec<WireMessage>) -> Result<String, ApiError> {
        unreachable!("color tests never send chat messages")
    }

    async fn fetch_color(&self, _prompt: &str) -> Result<String, ApiError> {
        self.requests.set(self.requests.get() + 1);
        self.bodies.borrow_mut().remove(0)
    }

    async fn pause(&self, seconds: u32) {
        self.pauses.borrow_mut().push(seconds);
    }

    fn now_ms(&self) -> f64 {
        0.0
    }
}

fn miss() -> Result<String, ApiError> {
    Ok("I think something warm".to_owned())
}

// =============================================================
// Sync transitions
// =============================================================

#[test]
fn starts_at_fallback_and_idle() {
    let fetch = ColorFetch::new();
    assert_eq!(fetch.color(), FALLBACK_COLOR);
    assert_eq!(fetch.attempts(), 0);
    assert!(!fetch.in_flight());
}

#[test]
fn miss_transitions_to_retry_with_fixed_pause() {
    let mut fetch = ColorFetch::new();
    assert!(fetch.begin());
    let step = fetch.observe_response("I think something warm");
    assert_eq!(step, ColorStep::RetryAfter(RETRY_PAUSE_SECS));
    assert_eq!(fetch.attempts(), 1);
    assert!(fetch.in_flight());
}

#[test]
fn hit_commits_color_and_resets() {
    let mut fetch = ColorFetch::new();
    fetch.begin();
    fetch.observe_response("nope");
    let step = fetch.observe_response("7:\"The color is #A1B2C3 for you\"");
    assert_eq!(step, ColorStep::Applied("#A1B2C3".to_owned()));
    assert_eq!(fetch.color(), "#A1B2C3");
    assert_eq!(fetch.attempts(), 0);
    assert!(!fetch.in_flight());
}

#[test]
fn fifth_miss_falls_back_and_resets() {
    let mut fetch = ColorFetch::new();
    fetch.begin();
    for _ in 0..4 {
        assert_eq!(fetch.observe_response("nothing"), ColorStep::RetryAfter(RETRY_PAUSE_SECS));
    }
    assert_eq!(fetch.observe_response("nothing"), ColorStep::FellBack);
    assert_eq!(fetch.color(), FALLBACK_COLOR);
    assert_eq!(fetch.attempts(), 0);
    assert!(!fetch.in_flight());
}

#[test]
fn transport_failure_falls_back_immediately() {
    let mut fetch = ColorFetch::new();
    fetch.set_query("light orange");
    fetch.begin();
    fetch.observe_response("nope");

    let error = ApiError::Status { status: 502 };
    assert_eq!(fetch.observe_failure(&error), ColorStep::FellBack);
    assert_eq!(fetch.color(), FALLBACK_COLOR);
    assert_eq!(fetch.attempts(), 0);
    assert!(!fetch.in_flight());
}

#[test]
fn begin_rejects_overlapping_start() {
    let mut fetch = ColorFetch::new();
    assert!(fetch.begin());
    assert!(!fetch.begin());
}

// =============================================================
// run — async driver
// =============================================================

#[test]
fn run_stops_after_five_misses_without_sixth_request() {
    let api = ScriptedColorApi::new(vec![miss(), miss(), miss(), miss(), miss(), miss()]);
    let mut fetch = ColorFetch::new();
    fetch.set_query("light orange");

    let outcome = block_on(fetch.run(&api));
    assert_eq!(outcome, ColorOutcome::FellBack);
    assert_eq!(api.requests.get(), 5);
    assert_eq!(*api.pauses.borrow(), vec![RETRY_PAUSE_SECS; 4]);
    assert_eq!(fetch.attempts(), 0);
    assert_eq!(fetch.color(), FALLBACK_COLOR);
}

#[test]
fn run_applies_first_hit() {
    let api = ScriptedColorApi::new(vec![miss(), Ok("0:\"#ffaa00 then\"".to_owned())]);
    let mut fetch = ColorFetch::new();

    let outcome = block_on(fetch.run(&api));
    assert_eq!(outcome, ColorOutcome::Applied("#ffaa00".to_owned()));
    assert_eq!(api.requests.get(), 2);
    assert_eq!(*api.pauses.borrow(), vec![RETRY_PAUSE_SECS]);
    assert_eq!(fetch.color(), "#ffaa00");
}

#[test]
fn run_falls_back_on_transport_failure_without_retry() {
    let api = ScriptedColorApi::new(vec![Err(ApiError::Transport("connection refused".to_owned()))]);
    let mut fetch = ColorFetch::new();

    let outcome = block_on(fetch.run(&api));
    assert_eq!(outcome, ColorOutcome::FellBack);
    assert_eq!(api.requests.get(), 1);
    assert!(api.pauses.borrow().is_empty());
}

#[test]
fn run_skips_while_in_flight() {
    let api = ScriptedColorApi::new(vec![]);
    let mut fetch = ColorFetch::new();
    fetch.begin();

    let outcome = block_on(fetch.run(&api));
    assert_eq!(outcome, ColorOutcome::Skipped);
    assert_eq!(api.requests.get(), 0);
}
