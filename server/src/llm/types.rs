//! Provider-neutral inference trait and errors.

use chat::WireMessage;

/// Errors produced by inference client operations.
#[derive(Debug, thiserror::Error)]
pub enum InferenceError {
    /// A required environment variable is not set.
    #[error("missing configuration: env var {var} not set")]
    MissingConfig { var: String },

    /// The underlying HTTP client could not be constructed.
    #[error("HTTP client build failed: {0}")]
    HttpClientBuild(String),

    /// The HTTP request to the provider failed.
    #[error("provider request failed: {0}")]
    ApiRequest(String),

    /// The provider returned a non-success HTTP status.
    #[error("provider returned status {status}")]
    ApiResponse { status: u16, body: String },

    /// The provider response body could not be interpreted.
    #[error("provider response parse failed: {0}")]
    ApiParse(String),
}

/// Async seam over the provider API. Enables mocking in route tests.
#[async_trait::async_trait]
pub trait ChatInference: Send + Sync {
    /// One whole completion: returns the generated text.
    ///
    /// # Errors
    ///
    /// Returns an [`InferenceError`] when the request fails, the provider
    /// answers non-200, or the body is malformed.
    async fn complete(&self, model: &str, messages: &[WireMessage]) -> Result<String, InferenceError>;

    /// Streaming completion: returns the content deltas in arrival order.
    ///
    /// # Errors
    ///
    /// Returns an [`InferenceError`] when the request fails, the provider
    /// answers non-200, or a stream chunk is malformed.
    async fn stream_deltas(&self, model: &str, messages: &[WireMessage]) -> Result<Vec<String>, InferenceError>;
}
