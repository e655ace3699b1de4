//! Chat and color forwarding routes.
//!
//! DESIGN
//! ======
//! These handlers are thin: decode the request, forward to the hosted
//! provider, shape the body. `/api/chat` answers with one whole
//! completion; `/api/chat-original` accumulates streamed deltas
//! server-side and returns the concatenated text; `/api/botcolor`
//! re-emits streamed deltas as line-delimited `0:"..."` frames for the
//! client-side color extraction.

#[cfg(test)]
#[path = "chat_test.rs"]
mod chat_test;

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;

use chat::{ChatRequest, ColorRequest, WireMessage};

use crate::llm::InferenceError;
use crate::state::{AppState, InferenceHandle};

/// System prompt steering the color model toward a bare hex token.
const COLOR_SYSTEM_PROMPT: &str =
    "You are a color design app that returns a hex color based on a user input. Only return the hex color code.";

/// `POST /api/chat` — fine-tuned variant, whole completion.
pub async fn chat_reply(
    State(state): State<AppState>,
    Json(body): Json<ChatRequest>,
) -> Result<String, StatusCode> {
    let inference = configured(&state)?;
    inference
        .client
        .complete(&inference.models.chat, &body.prompt)
        .await
        .map_err(inference_error_to_status)
}

/// `POST /api/chat-original` — baseline variant; streamed deltas are
/// concatenated and returned whole.
pub async fn chat_original_reply(
    State(state): State<AppState>,
    Json(body): Json<ChatRequest>,
) -> Result<String, StatusCode> {
    let inference = configured(&state)?;
    let deltas = inference
        .client
        .stream_deltas(&inference.models.chat_original, &body.prompt)
        .await
        .map_err(inference_error_to_status)?;
    Ok(deltas.concat())
}

/// `POST /api/botcolor` — color model; deltas re-emitted as stream
/// frames.
pub async fn bot_color(
    State(state): State<AppState>,
    Json(body): Json<ColorRequest>,
) -> Result<String, StatusCode> {
    let inference = configured(&state)?;
    let messages = color_messages(&body.prompt);
    let deltas = inference
        .client
        .stream_deltas(&inference.models.color, &messages)
        .await
        .map_err(inference_error_to_status)?;
    Ok(to_frame_lines(&deltas))
}

fn configured(state: &AppState) -> Result<&InferenceHandle, StatusCode> {
    state.inference.as_ref().ok_or(StatusCode::SERVICE_UNAVAILABLE)
}

/// Conversation sent to the color model.
fn color_messages(prompt: &str) -> Vec<WireMessage> {
    vec![
        WireMessage { role: "system".to_owned(), content: COLOR_SYSTEM_PROMPT.to_owned() },
        WireMessage { role: "user".to_owned(), content: prompt.to_owned() },
    ]
}

/// Wrap content deltas as line-delimited `0:"..."` stream frames.
fn to_frame_lines(deltas: &[String]) -> String {
    let mut out = String::new();
    for delta in deltas {
        if delta.is_empty() {
            continue;
        }
        out.push_str("0:\"");
        out.push_str(&escape_delta(delta));
        out.push_str("\"\n");
    }
    out
}

fn escape_delta(delta: &str) -> String {
    let mut out = String::with_capacity(delta.len());
    for ch in delta.chars() {
        match ch {
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("\\\""),
            '\n' => out.push_str("\\n"),
            other => out.push(other),
        }
    }
    out
}

fn inference_error_to_status(error: InferenceError) -> StatusCode {
    tracing::warn!(error = %error, "inference call failed");
    match error {
        InferenceError::ApiResponse { status: 429, .. } => StatusCode::TOO_MANY_REQUESTS,
        InferenceError::ApiResponse { .. } | InferenceError::ApiRequest(_) | InferenceError::ApiParse(_) => {
            StatusCode::BAD_GATEWAY
        }
        InferenceError::MissingConfig { .. } | InferenceError::HttpClientBuild(_) => StatusCode::SERVICE_UNAVAILABLE,
    }
}
