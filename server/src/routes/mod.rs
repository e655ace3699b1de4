//! Router assembly.
//!
//! SYSTEM CONTEXT
//! ==============
//! Binds the three inference-forwarding routes and the health endpoint
//! under one Axum router; the built client bundle is served as static
//! files at `/`.

pub mod chat;

use std::path::PathBuf;

use axum::Router;
use axum::http::StatusCode;
use axum::routing::{get, post};
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use crate::state::AppState;

pub fn app(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/api/chat", post(chat::chat_reply))
        .route("/api/chat-original", post(chat::chat_original_reply))
        .route("/api/botcolor", post(chat::bot_color))
        .route("/healthz", get(healthz))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
        .fallback_service(ServeDir::new(client_dir()).append_index_html_on_directories(true))
}

/// Directory holding the built client bundle.
fn client_dir() -> PathBuf {
    std::env::var("STATIC_DIR")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../client/dist"))
}

async fn healthz() -> StatusCode {
    StatusCode::OK
}
