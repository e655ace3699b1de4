//! Inference — hosted chat-completions provider access.
//!
//! DESIGN
//! ======
//! One OpenAI-compatible provider serves all three routes; they differ
//! only in model id and in whether the response is taken whole or as
//! streamed deltas. The `ChatInference` trait is the seam route tests
//! mock.

pub mod config;
pub mod hf;
pub mod types;

pub use config::{InferenceConfig, InferenceModels};
pub use hf::HfClient;
pub use types::{ChatInference, InferenceError};
