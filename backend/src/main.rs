//! Agent Dashboard Backend
//!
//! Local REST API and WebSocket server behind the agent dashboard.
//! Lists, filters and executes the pre-defined automation agents.

use agent_dashboard_backend::api::ApiContext;
use agent_dashboard_backend::config::Config;
use agent_dashboard_backend::executor::ExecutionCoordinator;
use agent_dashboard_backend::server::build_router;
use agent_dashboard_backend::state::AppState;
use std::net::SocketAddr;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load configuration
    let config = Config::from_env();

    // Initialize tracing; RUST_LOG takes precedence over the DEBUG flag
    let default_level = if config.debug { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .init();

    info!("Configuration loaded: {:?}", config);

    // Initialize application state from the seed file, falling back to the built-in agents
    let mut app_state = AppState::seeded();
    if let Some(path) = &config.seed.path {
        match app_state.load_agents(path) {
            Ok(count) => info!("Loaded {} agents from {}", count, path.display()),
            Err(e) => warn!(
                "Failed to load agents from {}: {}; using built-in agents",
                path.display(),
                e
            ),
        }
    }
    info!(agents = app_state.agent_count(), "Agent registry ready");

    let coordinator =
        ExecutionCoordinator::simulated(app_state.into_shared(), config.execution.clone());
    let app = build_router(ApiContext::new(coordinator));

    // Bind to address from config
    let addr: SocketAddr = config
        .server_addr()
        .parse()
        .map_err(|e| anyhow::anyhow!("Invalid server address: {}", e))?;

    info!("🚀 Server running on http://{}", addr);
    info!("Version: {}", env!("CARGO_PKG_VERSION"));

    let listener = tokio::net::TcpListener::bind(&addr).await?;

    // Setup graceful shutdown
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server shutdown complete");
    Ok(())
}

/// Handle graceful shutdown signals (Ctrl+C, SIGTERM)
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                warn!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, shutting down gracefully...");
        },
        _ = terminate => {
            info!("Received SIGTERM, shutting down gracefully...");
        },
    }
}
