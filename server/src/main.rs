mod llm;
mod routes;
mod state;

use std::sync::Arc;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt::init();

    let port: u16 = std::env::var("PORT")
        .unwrap_or_else(|_| "3000".into())
        .parse()
        .expect("invalid PORT");

    // Inference is non-fatal: chat routes answer 503 until configured.
    let inference = match llm::InferenceConfig::from_env() {
        Ok(config) => match llm::HfClient::new(&config) {
            Ok(client) => {
                tracing::info!(
                    chat_model = %config.models.chat,
                    base_url = %config.base_url,
                    "inference client initialized"
                );
                Some(state::InferenceHandle { client: Arc::new(client), models: config.models })
            }
            Err(e) => {
                tracing::warn!(error = %e, "inference client build failed — chat routes disabled");
                None
            }
        },
        Err(e) => {
            tracing::warn!(error = %e, "inference not configured — chat routes disabled");
            None
        }
    };

    let state = state::AppState::new(inference);
    let app = routes::app(state);
    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{port}"))
        .await
        .expect("failed to bind");

    tracing::info!(%port, "chat server listening");
    axum::serve(listener, app).await.expect("server failed");
}
