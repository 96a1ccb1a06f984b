//! API routes for srtriaged
//!
//! /classify takes the multipart form the portal posts (name, employeeId,
//! query, files); /correction takes the JSON correction body.

use crate::server::AppState;
use axum::{
    extract::{Multipart, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use srtriage_common::api::{ClassifyResponse, CorrectionRequest, HealthResponse};
use srtriage_common::{Submitter, TriageError};
use std::sync::Arc;
use tracing::{error, info, warn};

type AppStateArc = Arc<AppState>;

/// Errors surfaced to HTTP clients
#[derive(Debug)]
pub enum ApiError {
    BadRequest(String),
    Triage(TriageError),
    Storage(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::BadRequest(msg) => (
                StatusCode::BAD_REQUEST,
                Json(serde_json::json!({ "error": msg, "kind": "bad_request" })),
            )
                .into_response(),
            ApiError::Triage(err) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(serde_json::json!({ "error": err.to_string(), "kind": err.kind() })),
            )
                .into_response(),
            ApiError::Storage(msg) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(serde_json::json!({ "status": "error", "error": msg })),
            )
                .into_response(),
        }
    }
}

// ============================================================================
// Triage Routes
// ============================================================================

pub fn triage_routes() -> Router<AppStateArc> {
    Router::new().route("/classify", post(classify))
}

struct Upload {
    file_name: String,
    bytes: axum::body::Bytes,
}

async fn classify(
    State(state): State<AppStateArc>,
    mut multipart: Multipart,
) -> Result<Json<ClassifyResponse>, ApiError> {
    let mut submitter = Submitter::default();
    let mut query = String::new();
    let mut uploads = Vec::new();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::BadRequest(e.to_string()))?
    {
        let field_name = field.name().unwrap_or_default().to_string();
        match field_name.as_str() {
            "name" => submitter.name = read_text(field).await?,
            "employeeId" => submitter.employee_id = read_text(field).await?,
            "query" => query = read_text(field).await?,
            "files" => {
                let file_name = field.file_name().unwrap_or_default().to_string();
                let bytes = field
                    .bytes()
                    .await
                    .map_err(|e| ApiError::BadRequest(e.to_string()))?;
                // Browsers send an empty part when no file is chosen
                if !file_name.is_empty() {
                    uploads.push(Upload { file_name, bytes });
                }
            }
            other => warn!("  Ignoring unknown form field {:?}", other),
        }
    }

    let result = state.engine.classify(&query).map_err(|e| {
        error!("  Classification failed: {}", e);
        ApiError::Triage(e)
    })?;
    info!(
        "  Classified: priority={} team={}",
        result.priority,
        result.team.as_deref().unwrap_or("-")
    );

    let mut files = Vec::new();
    for upload in uploads {
        match state.uploads.save(&upload.file_name, &upload.bytes).await {
            Ok(Some(stored)) => files.push(stored),
            Ok(None) => {}
            Err(e) => error!("  Upload {:?} not stored: {:#}", upload.file_name, e),
        }
    }

    let log = Arc::clone(&state.submissions);
    let to_log = result.clone();
    let log_files = files.clone();
    let logged = match tokio::task::spawn_blocking(move || {
        log.record(&to_log, &submitter, &log_files)
    })
    .await
    {
        Ok(Ok(_)) => true,
        Ok(Err(e)) => {
            error!("  Submission not logged: {}", e);
            false
        }
        Err(e) => {
            error!("  Submission logging task failed: {}", e);
            false
        }
    };

    Ok(Json(ClassifyResponse {
        result,
        files,
        logged,
    }))
}

async fn read_text(field: axum::extract::multipart::Field<'_>) -> Result<String, ApiError> {
    field
        .text()
        .await
        .map_err(|e| ApiError::BadRequest(e.to_string()))
}

// ============================================================================
// Correction Routes
// ============================================================================

pub fn correction_routes() -> Router<AppStateArc> {
    Router::new().route("/correction", post(correction))
}

async fn correction(
    State(state): State<AppStateArc>,
    Json(req): Json<CorrectionRequest>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let record = req.into_record();
    let log = Arc::clone(&state.corrections);

    tokio::task::spawn_blocking(move || log.record_correction(&record))
        .await
        .map_err(|e| ApiError::Storage(e.to_string()))?
        .map_err(|e| {
            error!("  Correction not logged: {}", e);
            ApiError::Storage(e.to_string())
        })?;

    Ok(Json(serde_json::json!({ "status": "success" })))
}

// ============================================================================
// Health Routes
// ============================================================================

pub fn health_routes() -> Router<AppStateArc> {
    Router::new().route("/health", get(health_check))
}

async fn health_check(State(state): State<AppStateArc>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        uptime_seconds: state.start_time.elapsed().as_secs(),
        priority_labels: state.engine.priority_labels().to_vec(),
        team_labels: state.engine.team_labels().to_vec(),
    })
}
