use axum::{
    body::Bytes,
    extract::{Query, State},
    http::{header, StatusCode},
    response::IntoResponse,
    Json,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::config::BridgeConfig;
use crate::error::BridgeError;
use crate::models::*;
use crate::tree;

// ============================================================
// Error Handling
// ============================================================

/// JSON body of every error response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}

pub type ApiError = (StatusCode, Json<ErrorBody>);

fn error_body(status: StatusCode, message: impl Into<String>) -> ApiError {
    (
        status,
        Json(ErrorBody {
            error: message.into(),
        }),
    )
}

fn bad_request(message: impl Into<String>) -> ApiError {
    error_body(StatusCode::BAD_REQUEST, message)
}

/// Map a bridge error to a response.
///
/// Caller mistakes are returned as-is. I/O failures are logged in full
/// server-side, but clients only see a generic message.
fn bridge_error(e: BridgeError) -> ApiError {
    let status = match &e {
        BridgeError::RootNotFound { .. } | BridgeError::NotFound(_) => StatusCode::NOT_FOUND,
        BridgeError::ReadError { .. } | BridgeError::WriteError { .. } => {
            tracing::error!("Internal error: {}", e);
            return error_body(StatusCode::INTERNAL_SERVER_ERROR, "Internal server error");
        }
        _ => StatusCode::BAD_REQUEST,
    };

    tracing::warn!("Request rejected: {}", e);
    error_body(status, e.to_string())
}

/// Run filesystem work off the async workers.
async fn run_blocking<T, F>(work: F) -> Result<T, ApiError>
where
    F: FnOnce() -> T + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(work).await.map_err(|e| {
        tracing::error!("Blocking task failed: {}", e);
        error_body(StatusCode::INTERNAL_SERVER_ERROR, "Internal server error")
    })
}

fn require_project(config: &BridgeConfig, project: Option<&str>) -> Result<(), ApiError> {
    let project = project.ok_or_else(|| bad_request("project is required"))?;
    config.check_project(project).map_err(bridge_error)
}

// ============================================================
// Health
// ============================================================

pub async fn health(State(config): State<BridgeConfig>) -> impl IntoResponse {
    Json(serde_json::json!({ "status": "ok", "project": config.project_name() }))
}

pub async fn not_found() -> ApiError {
    error_body(StatusCode::NOT_FOUND, "Not found")
}

// ============================================================
// Export
// ============================================================

pub async fn export_scripts(
    State(config): State<BridgeConfig>,
    body: Bytes,
) -> Result<Json<ExportReport>, ApiError> {
    let payload: Value = serde_json::from_slice(&body).map_err(|e| {
        tracing::warn!("Rejected export body: {}", e);
        bad_request("Request body must be valid JSON")
    })?;

    let Value::Object(mut payload) = payload else {
        return Err(bad_request("JSON body must be an object"));
    };
    let Some(Value::Array(scripts)) = payload.remove("scripts") else {
        return Err(bad_request("scripts must be an array"));
    };

    let source_root = config.source_root();
    let report = run_blocking(move || {
        tree::export_all(&source_root, scripts.iter().map(ScriptRecord::from_value))
    })
    .await?;

    tracing::info!("Exported {} scripts", report.exported);
    if report.skipped > 0 {
        tracing::info!("Skipped {} invalid entries", report.skipped);
    }

    Ok(Json(report))
}

pub async fn export_wrong_method() -> ApiError {
    error_body(StatusCode::METHOD_NOT_ALLOWED, "Use POST /export")
}

// ============================================================
// Manifest
// ============================================================

#[derive(Debug, Default, Serialize, Deserialize)]
pub struct ProjectQuery {
    pub project: Option<String>,
}

pub async fn get_manifest(
    State(config): State<BridgeConfig>,
    Query(query): Query<ProjectQuery>,
) -> Result<Json<Vec<ManifestEntry>>, ApiError> {
    require_project(&config, query.project.as_deref())?;

    let source_root = config.source_root();
    let manifest = run_blocking(move || tree::scan(&source_root))
        .await?
        .map_err(bridge_error)?;

    tracing::debug!("Manifest lists {} scripts", manifest.entries.len());
    Ok(Json(manifest.entries))
}

// ============================================================
// Files
// ============================================================

#[derive(Debug, Default, Serialize, Deserialize)]
pub struct FileQuery {
    pub project: Option<String>,
    pub file: Option<String>,
}

pub async fn get_file(
    State(config): State<BridgeConfig>,
    Query(query): Query<FileQuery>,
) -> Result<impl IntoResponse, ApiError> {
    require_project(&config, query.project.as_deref())?;
    let file = query.file.ok_or_else(|| bad_request("file is required"))?;

    let source_root = config.source_root();
    let text = run_blocking(move || tree::read_file(&source_root, &file))
        .await?
        .map_err(bridge_error)?;

    Ok((
        [(header::CONTENT_TYPE, "text/plain; charset=utf-8")],
        text,
    ))
}
