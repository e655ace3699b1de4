//! Backend boundary: wire types, role mapping, and the transport seam.
//!
//! DESIGN
//! ======
//! Chat surfaces and the color popover reach the backends only through
//! [`ChatApi`], so browser transport, native transport, and recording
//! test mocks are interchangeable. The wire structs here are shared with
//! the forwarding server. The trait is `?Send` because browser futures
//! are not `Send`; every driver in this crate runs on one event loop.

#[cfg(test)]
#[path = "api_test.rs"]
mod api_test;

use serde::{Deserialize, Serialize};

use crate::message::{Message, Role};

/// Failures crossing the backend boundary.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// The request never produced a response.
    #[error("request failed: {0}")]
    Transport(String),

    /// The backend answered with a non-success HTTP status.
    #[error("backend returned status {status}")]
    Status { status: u16 },
}

/// Which hosted model variant serves a chat session.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ModelVariant {
    FineTuned,
    Baseline,
}

/// One history entry as the backends expect it.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct WireMessage {
    pub role: String,
    pub content: String,
}

/// Body of `POST /api/chat` and `POST /api/chat-original`.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ChatRequest {
    pub prompt: Vec<WireMessage>,
}

/// Body of `POST /api/botcolor`.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ColorRequest {
    pub prompt: String,
}

/// Format a session's history for the backend, appending the pending
/// input as the final user entry. Roles are rewritten per
/// [`Role::as_wire`].
#[must_use]
pub fn to_wire_history(messages: &[Message], pending: &str) -> Vec<WireMessage> {
    let mut out: Vec<WireMessage> = messages
        .iter()
        .map(|msg| WireMessage { role: msg.role.as_wire().to_owned(), content: msg.content.clone() })
        .collect();
    out.push(WireMessage { role: Role::User.as_wire().to_owned(), content: pending.to_owned() });
    out
}

/// Transport seam for the chat and color backends.
#[async_trait::async_trait(?Send)]
pub trait ChatApi {
    /// Send a formatted history to the given model variant; returns the
    /// raw response body.
    async fn chat(&self, variant: ModelVariant, history: Vec<WireMessage>) -> Result<String, ApiError>;

    /// Ask the color backend to describe `prompt`; returns the raw body.
    async fn fetch_color(&self, prompt: &str) -> Result<String, ApiError>;

    /// Suspend for `seconds` without blocking the surrounding event loop.
    async fn pause(&self, seconds: u32);

    /// Current wall-clock time in milliseconds since the Unix epoch.
    fn now_ms(&self) -> f64;
}
