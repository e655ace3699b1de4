//! Inference configuration parsed from environment variables.

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

use super::types::InferenceError;

pub const DEFAULT_BASE_URL: &str = "https://router.huggingface.co/v1";
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 120;
pub const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 10;

/// Model ids for the three backend roles.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InferenceModels {
    /// Fine-tuned variant behind `/api/chat`.
    pub chat: String,
    /// Baseline variant behind `/api/chat-original`.
    pub chat_original: String,
    /// Color-description model behind `/api/botcolor`.
    pub color: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InferenceConfig {
    pub token: String,
    pub base_url: String,
    pub models: InferenceModels,
    pub request_timeout_secs: u64,
    pub connect_timeout_secs: u64,
}

impl InferenceConfig {
    /// Build typed inference config from environment variables.
    ///
    /// Required:
    /// - `HF_TOKEN`: provider API token
    /// - `HF_CHAT_MODEL`: fine-tuned chat model id
    /// - `HF_CHAT_ORIGINAL`: baseline chat model id
    /// - `HF_COLOR_MODEL`: color model id
    ///
    /// Optional:
    /// - `HF_BASE_URL`: OpenAI-compatible base URL
    /// - `HF_REQUEST_TIMEOUT_SECS`: default 120
    /// - `HF_CONNECT_TIMEOUT_SECS`: default 10
    ///
    /// # Errors
    ///
    /// Returns [`InferenceError::MissingConfig`] naming the first absent
    /// required variable.
    pub fn from_env() -> Result<Self, InferenceError> {
        let token = require("HF_TOKEN")?;
        let models = InferenceModels {
            chat: require("HF_CHAT_MODEL")?,
            chat_original: require("HF_CHAT_ORIGINAL")?,
            color: require("HF_COLOR_MODEL")?,
        };
        let base_url = std::env::var("HF_BASE_URL")
            .unwrap_or_else(|_| DEFAULT_BASE_URL.to_string())
            .trim_end_matches('/')
            .to_string();
        Ok(Self {
            token,
            base_url,
            models,
            request_timeout_secs: env_parse_u64("HF_REQUEST_TIMEOUT_SECS", DEFAULT_REQUEST_TIMEOUT_SECS),
            connect_timeout_secs: env_parse_u64("HF_CONNECT_TIMEOUT_SECS", DEFAULT_CONNECT_TIMEOUT_SECS),
        })
    }
}

fn require(var: &str) -> Result<String, InferenceError> {
    std::env::var(var).map_err(|_| InferenceError::MissingConfig { var: var.to_owned() })
}

fn env_parse_u64(key: &str, default: u64) -> u64 {
    std::env::var(key)
        .ok()
        .and_then(|v| v.parse::<u64>().ok())
        .unwrap_or(default)
}
