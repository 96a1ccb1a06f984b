//! SR Triage Daemon - HTTP front for the triage engine
//!
//! Loads both classifiers once at startup, then serves classification and
//! correction requests, logging every decision for retraining.

use anyhow::{Context, Result};
use srtriage_common::{Config, TriageEngine};
use srtriaged::server::{self, AppState};
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Used when RUST_LOG is unset
const DEFAULT_LOG_FILTER: &str = "srtriaged=info,srtriage_common=info,tower_http=info";

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER)),
        )
        .init();

    info!("SR Triage Daemon v{} starting", env!("CARGO_PKG_VERSION"));

    let config = Config::load(None).context("Failed to load configuration")?;

    // A missing model stops startup: no request is accepted without both
    let engine = TriageEngine::from_config(&config.models).context("Failed to load classifiers")?;
    info!(
        "Classifiers ready: {} priority labels, {} team labels",
        engine.priority_labels().len(),
        engine.team_labels().len()
    );
    info!(
        "Submissions -> {}, corrections -> {}, uploads -> {}",
        config.storage.submissions_csv.display(),
        config.storage.corrections_csv.display(),
        config.storage.upload_dir.display()
    );

    let state = AppState::new(engine, &config.storage)?;
    server::run(state, &config.server).await?;

    Ok(())
}
