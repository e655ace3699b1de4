use super::*;

use std::sync::{Arc, Mutex};

use crate::llm::{ChatInference, InferenceModels};

// =========================================================================
// MockInference
// =========================================================================

#[derive(Default)]
struct MockInference {
    completions: Mutex<Vec<Result<String, InferenceError>>>,
    streams: Mutex<Vec<Result<Vec<String>, InferenceError>>>,
    seen: Mutex<Vec<(String, Vec<WireMessage>)>>,
}

impl MockInference {
    fn with_completion(result: Result<String, InferenceError>) -> Arc<Self> {
        let mock = Self::default();
        mock.completions.lock().unwrap().push(result);
        Arc::new(mock)
    }

    fn with_stream(result: Result<Vec<String>, InferenceError>) -> Arc<Self> {
        let mock = Self::default();
        mock.streams.lock().unwrap().push(result);
        Arc::new(mock)
    }
}

#[async_trait::async_trait]
impl ChatInference for MockInference {
    async fn complete(&self, model: &str, messages: &[WireMessage]) -> Result<String, InferenceError> {
        self.seen.lock().unwrap().push((model.to_owned(), messages.to_vec()));
        self.completions.lock().unwrap().remove(0)
    }

    async fn stream_deltas(&self, model: &str, messages: &[WireMessage]) -> Result<Vec<String>, InferenceError> {
        self.seen.lock().unwrap().push((model.to_owned(), messages.to_vec()));
        self.streams.lock().unwrap().remove(0)
    }
}

fn test_models() -> InferenceModels {
    InferenceModels {
        chat: "acme/chat-tuned".to_owned(),
        chat_original: "acme/chat-base".to_owned(),
        color: "acme/color".to_owned(),
    }
}

fn state_with(mock: &Arc<MockInference>) -> AppState {
    AppState::new(Some(InferenceHandle { client: mock.clone(), models: test_models() }))
}

fn user_prompt(text: &str) -> ChatRequest {
    ChatRequest {
        prompt: vec![WireMessage { role: "user".to_owned(), content: text.to_owned() }],
    }
}

// =========================================================================
// /api/chat
// =========================================================================

#[tokio::test]
async fn chat_reply_forwards_to_the_tuned_model() {
    let mock = MockInference::with_completion(Ok("Hello there".to_owned()));
    let body = chat_reply(State(state_with(&mock)), Json(user_prompt("Hi")))
        .await
        .unwrap();
    assert_eq!(body, "Hello there");

    let seen = mock.seen.lock().unwrap();
    assert_eq!(seen.len(), 1);
    assert_eq!(seen[0].0, "acme/chat-tuned");
    assert_eq!(seen[0].1[0].content, "Hi");
}

#[tokio::test]
async fn chat_reply_maps_upstream_errors_to_bad_gateway() {
    let mock = MockInference::with_completion(Err(InferenceError::ApiResponse {
        status: 500,
        body: "boom".to_owned(),
    }));
    let status = chat_reply(State(state_with(&mock)), Json(user_prompt("Hi")))
        .await
        .unwrap_err();
    assert_eq!(status, StatusCode::BAD_GATEWAY);
}

#[tokio::test]
async fn chat_reply_preserves_rate_limit_status() {
    let mock = MockInference::with_completion(Err(InferenceError::ApiResponse {
        status: 429,
        body: "slow down".to_owned(),
    }));
    let status = chat_reply(State(state_with(&mock)), Json(user_prompt("Hi")))
        .await
        .unwrap_err();
    assert_eq!(status, StatusCode::TOO_MANY_REQUESTS);
}

#[tokio::test]
async fn unconfigured_inference_answers_503() {
    let state = AppState::new(None);
    let status = chat_reply(State(state.clone()), Json(user_prompt("Hi")))
        .await
        .unwrap_err();
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);

    let status = bot_color(State(state), Json(ColorRequest { prompt: "red".to_owned() }))
        .await
        .unwrap_err();
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
}

// =========================================================================
// /api/chat-original
// =========================================================================

#[tokio::test]
async fn chat_original_concatenates_streamed_deltas() {
    let mock = MockInference::with_stream(Ok(vec![
        "Hel".to_owned(),
        "lo".to_owned(),
        " there".to_owned(),
    ]));
    let body = chat_original_reply(State(state_with(&mock)), Json(user_prompt("Hi")))
        .await
        .unwrap();
    assert_eq!(body, "Hello there");
    assert_eq!(mock.seen.lock().unwrap()[0].0, "acme/chat-base");
}

#[tokio::test]
async fn chat_original_with_no_deltas_returns_empty_body() {
    let mock = MockInference::with_stream(Ok(vec![]));
    let body = chat_original_reply(State(state_with(&mock)), Json(user_prompt("Hi")))
        .await
        .unwrap();
    assert_eq!(body, "");
}

// =========================================================================
// /api/botcolor
// =========================================================================

#[tokio::test]
async fn bot_color_frames_deltas_and_injects_system_prompt() {
    let mock = MockInference::with_stream(Ok(vec!["#A1".to_owned(), "B2C3".to_owned()]));
    let body = bot_color(
        State(state_with(&mock)),
        Json(ColorRequest { prompt: "light orange".to_owned() }),
    )
    .await
    .unwrap();
    assert_eq!(body, "0:\"#A1\"\n0:\"B2C3\"\n");

    let seen = mock.seen.lock().unwrap();
    assert_eq!(seen[0].0, "acme/color");
    assert_eq!(seen[0].1[0].role, "system");
    assert_eq!(seen[0].1[0].content, COLOR_SYSTEM_PROMPT);
    assert_eq!(seen[0].1[1].role, "user");
    assert_eq!(seen[0].1[1].content, "light orange");
}

// =========================================================================
// Frame emission
// =========================================================================

#[test]
fn frame_lines_escape_quotes_backslashes_and_newlines() {
    let deltas = vec!["say \"hi\"".to_owned(), "a\\b\nc".to_owned(), String::new()];
    assert_eq!(to_frame_lines(&deltas), "0:\"say \\\"hi\\\"\"\n0:\"a\\\\b\\nc\"\n");
}

#[test]
fn frame_lines_round_trip_through_the_client_parser() {
    let deltas = vec!["The color ".to_owned(), "is #A1B2C3".to_owned(), " for you".to_owned()];
    let body = to_frame_lines(&deltas);
    assert_eq!(chat::reply::assemble_reply(&body), "The color is #A1B2C3 for you");
    assert_eq!(chat::reply::extract_color(&body).as_deref(), Some("#A1B2C3"));
}
