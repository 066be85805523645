//! Execution API handlers
//!
//! Triggers agent executions and exposes the execution settings the
//! dashboard needs to decide when to ask for confirmation.

use crate::api::ApiContext;
use crate::config::ExecutionConfig;
use crate::error::AppError;
use crate::executor::{Confirmation, ExecutionOutcome};
use crate::state::AgentId;
use axum::{
    body::Bytes,
    extract::{rejection::PathRejection, Path, State},
    http::{header, HeaderMap, StatusCode},
    response::Json,
};
use serde::Deserialize;

/// Execute request body (optional)
#[derive(Debug, Default, Deserialize)]
pub struct ExecuteRequest {
    /// Answer to the critical-area confirmation; absent when not asked yet
    pub confirmed: Option<bool>,
}

/// POST /api/agents/:id/execute - Execute an agent
///
/// Answers with an [`ExecutionOutcome`] whose kind sets the HTTP status.
/// A malformed id or body is rejected with a 400 before any execution
/// checks run.
pub async fn execute_agent(
    State(ctx): State<ApiContext>,
    path: Result<Path<AgentId>, PathRejection>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<(StatusCode, Json<ExecutionOutcome>), AppError> {
    let Path(id) = path?;
    let confirmation = parse_confirmation(&headers, &body)?;

    let outcome = ctx.coordinator.execute(id, confirmation).await;
    Ok((outcome.kind.status_code(), Json(outcome)))
}

/// GET /api/config - Execution settings visible to the dashboard
pub async fn get_config(State(ctx): State<ApiContext>) -> Json<ExecutionConfig> {
    Json(ctx.coordinator.config().clone())
}

/// Read the confirmation answer from an execute request body
///
/// An empty body means no answer yet. Any other body must be a JSON
/// [`ExecuteRequest`].
fn parse_confirmation(headers: &HeaderMap, body: &[u8]) -> Result<Confirmation, AppError> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(Confirmation::Absent);
    }

    if !has_json_content_type(headers) {
        return Err(AppError::InvalidBody(
            "Expected request with `Content-Type: application/json`".to_string(),
        ));
    }

    let Json(request) = Json::<ExecuteRequest>::from_bytes(body)
        .map_err(|rejection| AppError::InvalidBody(rejection.body_text()))?;
    Ok(Confirmation::from(request.confirmed))
}

fn has_json_content_type(headers: &HeaderMap) -> bool {
    headers
        .get(header::CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.split(';').next())
        .map(|mime| mime.trim().to_ascii_lowercase())
        .is_some_and(|mime| mime == "application/json" || mime.ends_with("+json"))
}
