//! Shared input fan-out across the two chat sessions.
//!
//! DESIGN
//! ======
//! One input line feeds both model variants. `submit` runs both send
//! pipelines concurrently and clears the input only after both settle,
//! so a slow or failing session never blocks the other's completion and
//! never leaves the input half-consumed.

#[cfg(test)]
#[path = "coordinator_test.rs"]
mod coordinator_test;

use crate::api::{ApiError, ChatApi, ModelVariant};
use crate::session::ChatSession;

/// Per-session results of one shared submit.
#[derive(Debug)]
pub struct SubmitOutcome {
    pub fine_tuned: Result<(), ApiError>,
    pub baseline: Result<(), ApiError>,
}

/// Owns the shared input line and both chat sessions.
#[derive(Clone, Debug)]
pub struct DualSessionCoordinator {
    pub input: String,
    pub fine_tuned: ChatSession,
    pub baseline: ChatSession,
}

impl Default for DualSessionCoordinator {
    fn default() -> Self {
        Self::new()
    }
}

impl DualSessionCoordinator {
    #[must_use]
    pub fn new() -> Self {
        Self {
            input: String::new(),
            fine_tuned: ChatSession::new(ModelVariant::FineTuned),
            baseline: ChatSession::new(ModelVariant::Baseline),
        }
    }

    #[must_use]
    pub fn session(&self, variant: ModelVariant) -> &ChatSession {
        match variant {
            ModelVariant::FineTuned => &self.fine_tuned,
            ModelVariant::Baseline => &self.baseline,
        }
    }

    pub fn session_mut(&mut self, variant: ModelVariant) -> &mut ChatSession {
        match variant {
            ModelVariant::FineTuned => &mut self.fine_tuned,
            ModelVariant::Baseline => &mut self.baseline,
        }
    }

    /// `true` while either session has a send in flight.
    #[must_use]
    pub fn busy(&self) -> bool {
        self.fine_tuned.is_typing() || self.baseline.is_typing()
    }

    /// Submit the shared input to both sessions concurrently.
    ///
    /// No-ops (returning `None`) when the input is blank or a send is
    /// already in flight. The input clears only after both sessions have
    /// settled, success or failure; both outcomes are returned for the
    /// caller to surface.
    pub async fn submit<A: ChatApi>(&mut self, api: &A) -> Option<SubmitOutcome> {
        if self.input.trim().is_empty() || self.busy() {
            return None;
        }
        let text = self.input.clone();
        let (fine_tuned, baseline) = futures::join!(
            self.fine_tuned.send(&text, api),
            self.baseline.send(&text, api)
        );
        self.input.clear();
        Some(SubmitOutcome { fine_tuned, baseline })
    }
}
