//! Execution history and per-agent statistics
//!
//! Every execution that reaches the running state leaves an [`ExecutionRecord`].
//! History lives in memory only and is lost when the process exits.

use super::app_state::{Agent, AgentId};
use crate::executor::OutcomeKind;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Records kept per agent; older ones are dropped first
pub const MAX_HISTORY_PER_AGENT: usize = 100;

/// One finished execution attempt
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ExecutionRecord {
    /// Identifier of the execution request
    pub request_id: Uuid,
    /// Agent that was executed
    pub agent_id: AgentId,
    /// When the request was received
    pub requested_at: DateTime<Utc>,
    /// How the execution ended
    pub kind: OutcomeKind,
    /// Human-readable result
    pub message: String,
    /// Wall-clock time spent running
    pub duration_ms: u64,
}

/// Agent with statistics derived from its execution history
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct AgentDetails {
    /// The agent itself
    pub agent: Agent,
    /// Request time of the most recent execution
    pub last_execution: Option<DateTime<Utc>>,
    /// Number of executions in the history
    pub total_executions: usize,
    /// Mean running time, `None` without executions
    pub average_duration_ms: Option<u64>,
    /// Percentage of successful executions, `None` without executions
    pub success_rate: Option<f64>,
    /// Most recent records, newest first
    pub recent_executions: Vec<ExecutionRecord>,
}

/// Records included in [`AgentDetails::recent_executions`]
const RECENT_EXECUTIONS: usize = 10;

impl AgentDetails {
    /// Compute details from an agent and its records (oldest first)
    pub fn from_history(agent: Agent, records: &[ExecutionRecord]) -> Self {
        let total = records.len();
        let (average_duration_ms, success_rate) = if total == 0 {
            (None, None)
        } else {
            let total_ms: u64 = records.iter().map(|r| r.duration_ms).sum();
            let succeeded = records
                .iter()
                .filter(|r| r.kind == OutcomeKind::Succeeded)
                .count();
            (
                Some(total_ms / total as u64),
                Some(succeeded as f64 * 100.0 / total as f64),
            )
        };

        Self {
            agent,
            last_execution: records.last().map(|r| r.requested_at),
            total_executions: total,
            average_duration_ms,
            success_rate,
            recent_executions: records.iter().rev().take(RECENT_EXECUTIONS).cloned().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::AgentState;
    use chrono::Duration;

    fn agent() -> Agent {
        Agent::new(1, "Agente Contable", "Finanzas", AgentState::Active, "")
    }

    fn record(kind: OutcomeKind, duration_ms: u64, at: DateTime<Utc>) -> ExecutionRecord {
        ExecutionRecord {
            request_id: Uuid::new_v4(),
            agent_id: 1,
            requested_at: at,
            kind,
            message: String::new(),
            duration_ms,
        }
    }

    #[test]
    fn test_details_without_history() {
        let details = AgentDetails::from_history(agent(), &[]);
        assert_eq!(details.total_executions, 0);
        assert!(details.last_execution.is_none());
        assert!(details.average_duration_ms.is_none());
        assert!(details.success_rate.is_none());
        assert!(details.recent_executions.is_empty());
    }

    #[test]
    fn test_details_statistics() {
        let start = Utc::now();
        let records = vec![
            record(OutcomeKind::Succeeded, 100, start),
            record(OutcomeKind::TimedOut, 300, start + Duration::seconds(1)),
            record(OutcomeKind::Succeeded, 200, start + Duration::seconds(2)),
            record(OutcomeKind::Failed, 400, start + Duration::seconds(3)),
        ];

        let details = AgentDetails::from_history(agent(), &records);
        assert_eq!(details.total_executions, 4);
        assert_eq!(details.average_duration_ms, Some(250));
        assert_eq!(details.success_rate, Some(50.0));
        assert_eq!(details.last_execution, Some(start + Duration::seconds(3)));
        assert_eq!(details.recent_executions[0].kind, OutcomeKind::Failed);
    }
}
