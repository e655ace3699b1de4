//! Shared application state.
//!
//! DESIGN
//! ======
//! `AppState` is injected into Axum handlers via the `State` extractor.
//! Inference is optional so the server still serves the client bundle
//! and health endpoint when no provider token is configured.

use std::sync::Arc;

use crate::llm::{ChatInference, InferenceModels};

/// Provider client plus the model ids the routes dispatch to.
#[derive(Clone)]
pub struct InferenceHandle {
    pub client: Arc<dyn ChatInference>,
    pub models: InferenceModels,
}

/// Application state shared by all routes.
#[derive(Clone)]
pub struct AppState {
    /// `None` until inference is configured; chat routes answer 503.
    pub inference: Option<InferenceHandle>,
}

impl AppState {
    #[must_use]
    pub fn new(inference: Option<InferenceHandle>) -> Self {
        Self { inference }
    }
}
