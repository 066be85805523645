//! API module
//!
//! Contains HTTP request handlers for the dashboard endpoints

pub mod agents;
pub mod execution;

use crate::executor::ExecutionCoordinator;
use crate::state::SharedState;

/// State shared by all HTTP handlers
#[derive(Clone)]
pub struct ApiContext {
    /// Agent registry
    pub state: SharedState,
    /// Execution coordinator operating on the same registry
    pub coordinator: ExecutionCoordinator,
}

impl ApiContext {
    /// Build the handler context around a coordinator
    pub fn new(coordinator: ExecutionCoordinator) -> Self {
        Self {
            state: coordinator.state().clone(),
            coordinator,
        }
    }
}
