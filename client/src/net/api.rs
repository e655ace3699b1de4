//! REST helpers for the chat and color backends.
//!
//! Browser builds (csr): real HTTP calls via `gloo-net`. Native builds
//! get stub errors; these endpoints only exist behind the serving
//! origin.

#![allow(clippy::unused_async)]

#[cfg(test)]
#[path = "api_test.rs"]
mod api_test;

use chat::{ApiError, ModelVariant, WireMessage};

#[cfg(feature = "csr")]
use chat::{ChatRequest, ColorRequest};

/// Route serving the given model variant.
#[must_use]
pub fn chat_endpoint(variant: ModelVariant) -> &'static str {
    match variant {
        ModelVariant::FineTuned => "/api/chat",
        ModelVariant::Baseline => "/api/chat-original",
    }
}

/// Route serving color description requests.
pub const COLOR_ENDPOINT: &str = "/api/botcolor";

/// POST a formatted history to the chat backend for `variant`; returns
/// the raw text body.
pub async fn chat(variant: ModelVariant, history: Vec<WireMessage>) -> Result<String, ApiError> {
    #[cfg(feature = "csr")]
    {
        let body = ChatRequest { prompt: history };
        let resp = gloo_net::http::Request::post(chat_endpoint(variant))
            .json(&body)
            .map_err(|e| ApiError::Transport(e.to_string()))?
            .send()
            .await
            .map_err(|e| ApiError::Transport(e.to_string()))?;
        if !resp.ok() {
            return Err(ApiError::Status { status: resp.status() });
        }
        resp.text().await.map_err(|e| ApiError::Transport(e.to_string()))
    }
    #[cfg(not(feature = "csr"))]
    {
        let _ = (variant, history);
        Err(ApiError::Transport("not available off the browser".to_owned()))
    }
}

/// POST a color description to the color backend; returns the raw body.
pub async fn fetch_color(prompt: &str) -> Result<String, ApiError> {
    #[cfg(feature = "csr")]
    {
        let body = ColorRequest { prompt: prompt.to_owned() };
        let resp = gloo_net::http::Request::post(COLOR_ENDPOINT)
            .json(&body)
            .map_err(|e| ApiError::Transport(e.to_string()))?
            .send()
            .await
            .map_err(|e| ApiError::Transport(e.to_string()))?;
        if !resp.ok() {
            return Err(ApiError::Status { status: resp.status() });
        }
        resp.text().await.map_err(|e| ApiError::Transport(e.to_string()))
    }
    #[cfg(not(feature = "csr"))]
    {
        let _ = prompt;
        Err(ApiError::Transport("not available off the browser".to_owned()))
    }
}

/// Current time in milliseconds since the Unix epoch (0 off the browser).
#[must_use]
pub fn now_ms() -> f64 {
    #[cfg(feature = "csr")]
    {
        js_sys::Date::now()
    }
    #[cfg(not(feature = "csr"))]
    {
        0.0
    }
}
