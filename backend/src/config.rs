//! Application configuration
//!
//! Centralized configuration management with environment variable support
//! and sensible defaults. Loaded once at startup; the execution section is
//! handed to the [`ExecutionCoordinator`](crate::executor::ExecutionCoordinator).

use serde::Serialize;
use std::env;
use std::path::PathBuf;
use std::time::Duration;

/// Default port for the local dashboard server
pub const DEFAULT_PORT: u16 = 8080;
/// Default upper bound for a single execution (in seconds)
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;
/// Default duration of a simulated agent run (in milliseconds)
pub const DEFAULT_SIMULATED_RUN_MS: u64 = 1_000;
/// Areas that require confirmation when `CRITICAL_AREAS` is unset
pub const DEFAULT_CRITICAL_AREAS: &[&str] = &["Finanzas"];

/// Application configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Server configuration
    pub server: ServerConfig,
    /// Execution configuration
    pub execution: ExecutionConfig,
    /// Seed data configuration
    pub seed: SeedConfig,
    /// Verbose logging when `RUST_LOG` is not set
    pub debug: bool,
}

/// Server configuration
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Port to bind the server to
    pub port: u16,
    /// Host address to bind to
    pub host: String,
}

/// Execution configuration
#[derive(Debug, Clone, Serialize)]
pub struct ExecutionConfig {
    /// Hard upper bound for a running execution (in seconds)
    pub default_timeout_secs: u64,
    /// How long the simulated runner takes to complete (in milliseconds)
    pub simulated_run_ms: u64,
    /// Areas whose agents need an explicit confirmation before running
    pub critical_areas: Vec<String>,
}

/// Seed data configuration
#[derive(Debug, Clone, Default)]
pub struct SeedConfig {
    /// Optional JSON file replacing the built-in agent registry
    pub path: Option<PathBuf>,
}

impl Default for ExecutionConfig {
    fn default() -> Self {
        Self {
            default_timeout_secs: DEFAULT_TIMEOUT_SECS,
            simulated_run_ms: DEFAULT_SIMULATED_RUN_MS,
            critical_areas: DEFAULT_CRITICAL_AREAS
                .iter()
                .map(|area| area.to_string())
                .collect(),
        }
    }
}

impl ExecutionConfig {
    /// Timeout as a [`Duration`]
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.default_timeout_secs)
    }

    /// Simulated run length as a [`Duration`]
    pub fn simulated_run(&self) -> Duration {
        Duration::from_millis(self.simulated_run_ms)
    }

    /// Whether agents of `area` must be confirmed before running.
    /// Comparison ignores ASCII case and surrounding whitespace.
    pub fn is_critical(&self, area: &str) -> bool {
        let area = area.trim();
        self.critical_areas
            .iter()
            .any(|critical| critical.eq_ignore_ascii_case(area))
    }
}

impl Config {
    /// Load configuration from environment variables with defaults
    pub fn from_env() -> Self {
        let defaults = ExecutionConfig::default();
        Self {
            server: ServerConfig {
                port: env::var("PORT")
                    .ok()
                    .and_then(|p| p.parse().ok())
                    .unwrap_or(DEFAULT_PORT),
                host: env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string()),
            },
            execution: ExecutionConfig {
                default_timeout_secs: env::var("EXECUTION_TIMEOUT_SECS")
                    .ok()
                    .and_then(|t| t.parse().ok())
                    .filter(|t| *t > 0)
                    .unwrap_or(defaults.default_timeout_secs),
                simulated_run_ms: env::var("SIMULATED_RUN_MS")
                    .ok()
                    .and_then(|t| t.parse().ok())
                    .unwrap_or(defaults.simulated_run_ms),
                critical_areas: env::var("CRITICAL_AREAS")
                    .map(|list| parse_list(&list))
                    .unwrap_or(defaults.critical_areas),
            },
            seed: SeedConfig {
                path: env::var_os("AGENTS_SEED_PATH").map(PathBuf::from),
            },
            debug: env::var("DEBUG").map(|v| parse_flag(&v)).unwrap_or(false),
        }
    }

    /// Get the server address as a string
    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}

/// Split a comma-separated list, dropping blank entries
fn parse_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(str::to_string)
        .collect()
}

fn parse_flag(raw: &str) -> bool {
    matches!(
        raw.trim().to_ascii_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}
