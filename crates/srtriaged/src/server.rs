//! HTTP server for srtriaged

use crate::routes;
use crate::uploads::UploadStore;
use anyhow::{Context, Result};
use axum::extract::DefaultBodyLimit;
use axum::Router;
use srtriage_common::config::{ServerConfig, StorageConfig};
use srtriage_common::{CorrectionLog, SubmissionLog, TriageEngine};
use std::sync::Arc;
use std::time::Instant;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::info;

/// Application state shared across handlers
pub struct AppState {
    pub engine: TriageEngine,
    pub submissions: Arc<SubmissionLog>,
    pub corrections: Arc<CorrectionLog>,
    pub uploads: UploadStore,
    pub start_time: Instant,
}

impl AppState {
    pub fn new(engine: TriageEngine, storage: &StorageConfig) -> Result<Self> {
        Ok(Self {
            engine,
            submissions: Arc::new(SubmissionLog::new(&storage.submissions_csv)),
            corrections: Arc::new(CorrectionLog::new(&storage.corrections_csv)),
            uploads: UploadStore::new(&storage.upload_dir)?,
            start_time: Instant::now(),
        })
    }
}

/// Build the router with all routes and middleware
pub fn app(state: AppState, config: &ServerConfig) -> Router {
    let state = Arc::new(state);

    let app = Router::new()
        .merge(routes::triage_routes())
        .merge(routes::correction_routes())
        .merge(routes::health_routes())
        .with_state(state)
        .layer(DefaultBodyLimit::max(config.max_body_bytes))
        .layer(TraceLayer::new_for_http());

    if config.cors_allow_any_origin {
        app.layer(CorsLayer::permissive())
    } else {
        app
    }
}

/// Run the HTTP server until ctrl-c
pub async fn run(state: AppState, config: &ServerConfig) -> Result<()> {
    let app = app(state, config);

    let listener = tokio::net::TcpListener::bind(&config.bind)
        .await
        .with_context(|| format!("Failed to bind {}", config.bind))?;
    info!("  Listening on http://{}", config.bind);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("HTTP server failed")?;
    Ok(())
}

async fn shutdown_signal() {
    if tokio::signal::ctrl_c().await.is_ok() {
        info!("Shutting down gracefully");
    }
}
