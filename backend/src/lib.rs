//! Agent Dashboard Backend Library
//!
//! Registry, query engine and execution coordinator behind the agent
//! dashboard. The main binary is in `src/main.rs`.

pub mod api;
pub mod config;
pub mod error;
pub mod executor;
/// Free-text search and filtering over the agent registry
pub mod query;
pub mod server;
/// Application state management
///
/// Handles the agent registry, execution history, and seed loading.
pub mod state;
pub mod websocket;
