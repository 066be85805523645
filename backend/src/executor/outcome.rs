//! Structured execution outcomes
//!
//! The single value an execution request produces, whether it ran or not.

use super::error::ExecutionError;
use crate::state::{AgentId, ExecutionRecord};
use axum::http::StatusCode;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// How an execution request ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutcomeKind {
    /// Runner completed within the timeout
    Succeeded,
    /// Runner reported an error or stopped unexpectedly
    Failed,
    /// Runner did not complete within the timeout
    TimedOut,
    /// Unknown agent id
    NotFound,
    /// Agent is not active
    NotEligible,
    /// Agent already has a running execution
    AlreadyRunning,
    /// Critical area without confirmation
    ConfirmationRequired,
    /// Confirmation was declined
    ConfirmationDeclined,
}

impl OutcomeKind {
    /// Whether the execution reached the running state
    pub fn ran(self) -> bool {
        matches!(
            self,
            OutcomeKind::Succeeded | OutcomeKind::Failed | OutcomeKind::TimedOut
        )
    }

    /// HTTP status used when the outcome is returned from the API
    pub fn status_code(self) -> StatusCode {
        match self {
            OutcomeKind::Succeeded => StatusCode::OK,
            OutcomeKind::ConfirmationRequired => StatusCode::ACCEPTED,
            OutcomeKind::NotFound => StatusCode::NOT_FOUND,
            OutcomeKind::NotEligible
            | OutcomeKind::AlreadyRunning
            | OutcomeKind::ConfirmationDeclined => StatusCode::CONFLICT,
            OutcomeKind::TimedOut => StatusCode::GATEWAY_TIMEOUT,
            OutcomeKind::Failed => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

/// Requester's answer to the critical-area confirmation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Confirmation {
    /// No answer given yet
    #[default]
    Absent,
    /// Requester confirmed the execution
    Confirmed,
    /// Requester declined the execution
    Declined,
}

impl From<Option<bool>> for Confirmation {
    fn from(value: Option<bool>) -> Self {
        match value {
            None => Confirmation::Absent,
            Some(true) => Confirmation::Confirmed,
            Some(false) => Confirmation::Declined,
        }
    }
}

/// Result of one execution request
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ExecutionOutcome {
    /// Set once the request reached the running state
    pub request_id: Option<Uuid>,
    /// Agent the request referred to
    pub agent_id: AgentId,
    /// How the request ended
    pub kind: OutcomeKind,
    /// Human-readable message for the toast/modal
    pub message: String,
    /// When the request was received
    pub timestamp: DateTime<Utc>,
    /// Running time, for requests that ran
    pub duration_ms: Option<u64>,
}

impl ExecutionOutcome {
    /// Outcome of a request rejected before running
    pub fn rejected(agent_id: AgentId, timestamp: DateTime<Utc>, error: &ExecutionError) -> Self {
        Self {
            request_id: None,
            agent_id,
            kind: error.kind(),
            message: error.to_string(),
            timestamp,
            duration_ms: None,
        }
    }

    /// Outcome of a request that ran
    pub fn finished(
        request_id: Uuid,
        agent_id: AgentId,
        timestamp: DateTime<Utc>,
        duration_ms: u64,
        result: Result<String, ExecutionError>,
    ) -> Self {
        let (kind, message) = match result {
            Ok(message) => (OutcomeKind::Succeeded, message),
            Err(error) => (error.kind(), error.to_string()),
        };
        Self {
            request_id: Some(request_id),
            agent_id,
            kind,
            message,
            timestamp,
            duration_ms: Some(duration_ms),
        }
    }

    /// True when the agent ran to completion
    pub fn is_success(&self) -> bool {
        self.kind == OutcomeKind::Succeeded
    }

    /// History entry for outcomes that ran
    pub fn to_record(&self) -> Option<ExecutionRecord> {
        if !self.kind.ran() {
            return None;
        }
        Some(ExecutionRecord {
            request_id: self.request_id?,
            agent_id: self.agent_id,
            requested_at: self.timestamp,
            kind: self.kind,
            message: self.message.clone(),
            duration_ms: self.duration_ms.unwrap_or_default(),
        })
    }
}
