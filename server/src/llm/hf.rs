//! Hugging Face router client (OpenAI-compatible chat completions).
//!
//! DESIGN
//! ======
//! All three routes go through `/chat/completions`; streaming responses
//! are read whole and reduced to their content deltas, since every
//! caller wants the deltas in arrival order anyway. Response parsing is
//! split into pure helpers so it tests without a network.

#[cfg(test)]
#[path = "hf_test.rs"]
mod hf_test;

use std::time::Duration;

use serde::Serialize;
use serde_json::Value;

use chat::WireMessage;

use super::config::InferenceConfig;
use super::types::{ChatInference, InferenceError};

/// Sampling parameters matching the hosted variants' tuning.
const TEMPERATURE: f64 = 0.5;
const MAX_TOKENS: u32 = 250;
const TOP_P: f64 = 0.5;

pub struct HfClient {
    http: reqwest::Client,
    token: String,
    base_url: String,
}

impl HfClient {
    /// Build the provider client with the configured timeouts.
    ///
    /// # Errors
    ///
    /// Returns an error when the HTTP client cannot be constructed.
    pub fn new(config: &InferenceConfig) -> Result<Self, InferenceError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .connect_timeout(Duration::from_secs(config.connect_timeout_secs))
            .build()
            .map_err(|e| InferenceError::HttpClientBuild(e.to_string()))?;
        Ok(Self { http, token: config.token.clone(), base_url: config.base_url.clone() })
    }

    async fn send(&self, body: &CompletionRequest<'_>) -> Result<String, InferenceError> {
        let url = format!("{}/chat/completions", self.base_url);
        let response = self
            .http
            .post(url)
            .bearer_auth(&self.token)
            .json(body)
            .send()
            .await
            .map_err(|e| InferenceError::ApiRequest(e.to_string()))?;

        let status = response.status().as_u16();
        let text = response
            .text()
            .await
            .map_err(|e| InferenceError::ApiRequest(e.to_string()))?;
        if status != 200 {
            return Err(InferenceError::ApiResponse { status, body: text });
        }
        Ok(text)
    }
}

#[derive(Serialize)]
struct CompletionRequest<'a> {
    model: &'a str,
    messages: &'a [WireMessage],
    temperature: f64,
    max_tokens: u32,
    top_p: f64,
    stream: bool,
}

impl<'a> CompletionRequest<'a> {
    fn new(model: &'a str, messages: &'a [WireMessage], stream: bool) -> Self {
        Self { model, messages, temperature: TEMPERATURE, max_tokens: MAX_TOKENS, top_p: TOP_P, stream }
    }
}

#[async_trait::async_trait]
impl ChatInference for HfClient {
    async fn complete(&self, model: &str, messages: &[WireMessage]) -> Result<String, InferenceError> {
        let body = CompletionRequest::new(model, messages, false);
        let text = self.send(&body).await?;
        parse_completion_text(&text)
    }

    async fn stream_deltas(&self, model: &str, messages: &[WireMessage]) -> Result<Vec<String>, InferenceError> {
        let body = CompletionRequest::new(model, messages, true);
        let text = self.send(&body).await?;
        collect_sse_deltas(&text)
    }
}

/// Pull `choices[0].message.content` out of a whole-completion response.
pub(crate) fn parse_completion_text(json_text: &str) -> Result<String, InferenceError> {
    let root: Value = serde_json::from_str(json_text).map_err(|e| InferenceError::ApiParse(e.to_string()))?;
    root.get("choices")
        .and_then(Value::as_array)
        .and_then(|arr| arr.first())
        .and_then(|choice| choice.get("message"))
        .and_then(|message| message.get("content"))
        .and_then(Value::as_str)
        .map(str::to_owned)
        .ok_or_else(|| InferenceError::ApiParse("completion: missing choices[0].message.content".to_string()))
}

/// Reduce an SSE chat-completion stream body to its content deltas in
/// arrival order. Chunks without a delta contribute nothing; `[DONE]`
/// ends the stream.
pub(crate) fn collect_sse_deltas(body: &str) -> Result<Vec<String>, InferenceError> {
    let mut deltas = Vec::new();
    for line in body.lines() {
        let Some(payload) = line.strip_prefix("data:").map(str::trim) else {
            continue;
        };
        if payload == "[DONE]" {
            break;
        }
        let chunk: Value = serde_json::from_str(payload).map_err(|e| InferenceError::ApiParse(e.to_string()))?;
        let delta = chunk
            .get("choices")
            .and_then(Value::as_array)
            .and_then(|arr| arr.first())
            .and_then(|choice| choice.get("delta"))
            .and_then(|delta| delta.get("content"))
            .and_then(Value::as_str)
            .unwrap_or("");
        if !delta.is_empty() {
            deltas.push(delta.to_owned());
        }
    }
    Ok(deltas)
}
