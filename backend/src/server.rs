//! HTTP router construction
//!
//! Routes, middleware and the health endpoint. The binary binds the router to
//! a listener; tests drive it directly.

use crate::api::{self, ApiContext};
use crate::websocket;
use axum::{
    extract::Request,
    middleware::Next,
    response::Response,
    routing::{get, post},
    Json, Router,
};
use serde::Serialize;
use std::time::Instant;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info, info_span, Instrument};
use uuid::Uuid;

/// Health check response
#[derive(Serialize)]
pub struct HealthResponse {
    /// Always `healthy` when the server answers
    pub status: String,
    /// Crate version
    pub version: String,
    /// Number of agents in the registry
    pub agents: usize,
}

/// Request ID middleware - adds unique ID to each request for tracing
async fn request_id_middleware(request: Request, next: Next) -> Response {
    let request_id = Uuid::new_v4().to_string();
    let method = request.method().clone();
    let uri = request.uri().clone();
    let start = Instant::now();

    let span = info_span!(
        "request",
        request_id = %request_id,
        method = %method,
        uri = %uri,
    );

    let response = next.run(request).instrument(span).await;

    let duration = start.elapsed();
    info!(
        request_id = %request_id,
        method = %method,
        uri = %uri,
        status = %response.status().as_u16(),
        duration_ms = duration.as_millis(),
        "Request completed"
    );

    response
}

/// Build the application router with all routes and middleware
pub fn build_router(ctx: ApiContext) -> Router {
    Router::new()
        .route("/api/health", get(health_check))
        // Agent registry and query engine
        .route("/api/agents", get(api::agents::list_agents))
        .route("/api/agents/search", get(api::agents::search_agents))
        .route("/api/agents/:id", get(api::agents::get_agent))
        .route("/api/areas", get(api::agents::list_areas))
        .route("/api/states", get(api::agents::list_states))
        // Execution
        .route(
            "/api/agents/:id/execute",
            post(api::execution::execute_agent),
        )
        .route("/api/config", get(api::execution::get_config))
        // WebSocket for real-time updates
        .route("/ws", get(websocket::websocket_handler))
        // Middleware (order matters - request_id should be first)
        .layer(axum::middleware::from_fn(request_id_middleware))
        .layer(
            TraceLayer::new_for_http().make_span_with(|request: &axum::http::Request<_>| {
                tracing::info_span!(
                    "http_request",
                    method = %request.method(),
                    uri = %request.uri(),
                )
            }),
        )
        .layer(CorsLayer::permissive()) // The dashboard page may be served from another port
        .with_state(ctx)
}

async fn health_check(
    axum::extract::State(ctx): axum::extract::State<ApiContext>,
) -> Json<HealthResponse> {
    let agents = ctx.state.read().await.agent_count();
    Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        agents,
    })
}
