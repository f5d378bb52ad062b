//! Web server module: router construction and startup

pub mod error;
pub mod http;

use anyhow::{Context, Result};
use axum::{
    response::Html,
    routing::{get, post},
    Router,
};
use std::net::SocketAddr;
use std::path::Path;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::config::Config;
use crate::store::PredictionStore;

/// Shared server state
#[derive(Clone)]
pub struct ServerState {
    pub config: Arc<Config>,
    pub store: PredictionStore,
}

/// Build the application router.
pub fn router(state: ServerState) -> Router {
    // All origins, methods and headers: the frontend is served separately.
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/", get(index_page))
        .route("/api/health", get(http::health_handler))
        .route("/api/presets", get(http::presets_handler))
        .route("/api/predict", post(http::predict_handler))
        .route("/api/history", get(http::history_handler))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Start the web server
pub async fn start(config: Config, host: &str, port: u16, db_path: &Path) -> Result<()> {
    let store = PredictionStore::new(db_path)
        .await
        .context("Failed to open prediction store")?;

    let state = ServerState {
        config: Arc::new(config),
        store,
    };

    let addr: SocketAddr = format!("{}:{}", host, port)
        .parse()
        .context("Invalid host/port")?;

    let app = router(state);

    info!("prediction store at {}", db_path.display());
    println!("🚀 GhostLab listening on http://{}", addr);

    axum::serve(tokio::net::TcpListener::bind(addr).await?, app).await?;

    Ok(())
}

/// Handler for the index page
async fn index_page() -> Html<&'static str> {
    Html(
        r#"<!DOCTYPE html>
<html>
<head>
    <title>GhostLab API</title>
    <meta charset="utf-8">
    <style>
        body {
            font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, sans-serif;
            max-width: 800px;
            margin: 0 auto;
            padding: 20px;
            background: #1a1a1a;
            color: #e0e0e0;
        }
        h1 { color: #63f5c9; }
        .endpoint {
            background: #333;
            padding: 10px;
            margin: 10px 0;
            border-radius: 4px;
            font-family: monospace;
        }
    </style>
</head>
<body>
    <h1>GhostLab API</h1>
    <p>Room comfort and energy cost prediction service.</p>
    <div class="endpoint">GET /api/health - Liveness check</div>
    <div class="endpoint">GET /api/presets - Built-in scenario templates</div>
    <div class="endpoint">POST /api/predict - Run a prediction for a scenario</div>
    <div class="endpoint">GET /api/history - Recent predictions, oldest first</div>
</body>
</html>"#,
    )
}
