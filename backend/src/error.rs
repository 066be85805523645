//! Error types and error handling for the application
//!
//! This module defines custom error types that can be converted to HTTP responses.
//! All errors implement `IntoResponse` to provide consistent error formatting.

use crate::query::QueryError;
use crate::state::AgentId;
use axum::{
    extract::rejection::PathRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

/// Application-level error types
///
/// Each variant implements automatic conversion to HTTP responses via `IntoResponse`.
/// Well-formed execution requests report through
/// [`ExecutionOutcome`](crate::executor::ExecutionOutcome) instead; only
/// malformed ids or bodies end up here.
#[derive(Error, Debug)]
pub enum AppError {
    /// Agent with the given ID was not found
    #[error("Agent not found: {0}")]
    AgentNotFound(AgentId),

    /// Filter input is malformed
    #[error("Invalid filter: {0}")]
    Validation(#[from] QueryError),

    /// Path parameter could not be parsed (e.g. a non-numeric agent id)
    #[error("Invalid path: {}", .0.body_text())]
    InvalidPath(#[from] PathRejection),

    /// Request body is present but unusable
    #[error("Invalid request body: {0}")]
    InvalidBody(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match &self {
            AppError::AgentNotFound(_) => StatusCode::NOT_FOUND,
            AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::InvalidPath(rejection) => rejection.status(),
            AppError::InvalidBody(_) => StatusCode::BAD_REQUEST,
        };

        if status.is_server_error() {
            tracing::error!(error = %self, "Request failed");
        }

        let body = Json(json!({
            "error": self.to_string(),
            "status": status.as_u16(),
        }));

        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        let response = AppError::AgentNotFound(7).into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let response = AppError::from(QueryError::UnknownState("x".to_string())).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let response = AppError::InvalidBody("not json".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}
