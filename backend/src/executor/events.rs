//! Execution events
//!
//! Broadcast to WebSocket clients so the dashboard can update cards and show
//! toasts without polling.

use super::outcome::ExecutionOutcome;
use crate::state::AgentId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Events published by the execution coordinator
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ExecutionEvent {
    /// An agent entered the running state
    ExecutionStarted {
        /// Identifier of the execution request
        request_id: Uuid,
        /// Agent that started running
        agent_id: AgentId,
        /// When it started
        started_at: DateTime<Utc>,
    },
    /// An execution request ended, whether it ran or was rejected
    ExecutionFinished {
        /// The final outcome
        outcome: ExecutionOutcome,
    },
}
