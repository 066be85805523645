//! Execution-specific error types
//!
//! Every way an execution request can end without success.

use super::outcome::OutcomeKind;
use crate::state::{AgentId, AgentState};
use thiserror::Error;

/// Errors that can occur while coordinating an execution
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ExecutionError {
    /// No agent with the given id exists
    #[error("Agent not found: {0}")]
    NotFound(AgentId),

    /// Agent is not in the active state
    #[error("agent not active")]
    NotEligible(AgentState),

    /// Another execution of the same agent is running
    #[error("already running")]
    AlreadyRunning,

    /// Agent belongs to a critical area and the request carried no confirmation
    #[error("Execution of agents in area '{0}' requires confirmation")]
    ConfirmationRequired(String),

    /// The requester declined the confirmation
    #[error("Execution cancelled by the user")]
    ConfirmationDeclined,

    /// Execution exceeded the timeout limit
    #[error("Execution timed out after {0} seconds")]
    Timeout(u64),

    /// The runner reported a failure or stopped unexpectedly
    #[error("Execution failed: {0}")]
    Failed(String),
}

impl ExecutionError {
    /// Outcome kind reported to the dashboard
    pub fn kind(&self) -> OutcomeKind {
        match self {
            ExecutionError::NotFound(_) => OutcomeKind::NotFound,
            ExecutionError::NotEligible(_) => OutcomeKind::NotEligible,
            ExecutionError::AlreadyRunning => OutcomeKind::AlreadyRunning,
            ExecutionError::ConfirmationRequired(_) => OutcomeKind::ConfirmationRequired,
            ExecutionError::ConfirmationDeclined => OutcomeKind::ConfirmationDeclined,
            ExecutionError::Timeout(_) => OutcomeKind::TimedOut,
            ExecutionError::Failed(_) => OutcomeKind::Failed,
        }
    }
}
