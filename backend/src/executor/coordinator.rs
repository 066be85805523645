//! Execution coordinator
//!
//! Admits or rejects execution requests and drives admitted ones to an outcome.
//!
//! Checks run in this order: the agent exists, the agent is active, the
//! critical-area confirmation is present, and no other execution of the same
//! agent is running. The last check and the setting of the running flag happen
//! under one write lock, so two requests can never both start the same agent.

use super::error::ExecutionError;
use super::events::ExecutionEvent;
use super::outcome::{Confirmation, ExecutionOutcome};
use super::runner::{AgentRunner, SimulatedRunner};
use crate::config::ExecutionConfig;
use crate::state::{Agent, AgentId, AgentState, SharedState};
use chrono::{DateTime, Utc};
use std::sync::Arc;
use tokio::sync::broadcast;
use tokio::time::{timeout, Instant};
use tracing::{error, info, warn};
use uuid::Uuid;

/// Buffered events per subscriber before old ones are dropped
const EVENT_CHANNEL_CAPACITY: usize = 100;

/// Coordinates agent executions against the shared registry
#[derive(Clone)]
pub struct ExecutionCoordinator {
    state: SharedState,
    config: Arc<ExecutionConfig>,
    runner: Arc<dyn AgentRunner>,
    events: broadcast::Sender<ExecutionEvent>,
}

impl ExecutionCoordinator {
    /// Create a coordinator using the given runner
    pub fn new(state: SharedState, config: ExecutionConfig, runner: Arc<dyn AgentRunner>) -> Self {
        let (events, _) = broadcast::channel(EVENT_CHANNEL_CAPACITY);
        Self {
            state,
            config: Arc::new(config),
            runner,
            events,
        }
    }

    /// Create a coordinator with a [`SimulatedRunner`] configured from `config`
    pub fn simulated(state: SharedState, config: ExecutionConfig) -> Self {
        let runner = Arc::new(SimulatedRunner::new(config.simulated_run()));
        Self::new(state, config, runner)
    }

    /// Execution configuration in use
    pub fn config(&self) -> &ExecutionConfig {
        &self.config
    }

    /// Registry the coordinator operates on
    pub fn state(&self) -> &SharedState {
        &self.state
    }

    /// Receive execution events published from now on
    pub fn subscribe(&self) -> broadcast::Receiver<ExecutionEvent> {
        self.events.subscribe()
    }

    /// Handle one execution request
    ///
    /// Never fails: every rejection or runtime error is reported through the
    /// returned [`ExecutionOutcome`]. Once admitted, the run continues on its
    /// own task, so the running flag is released even if the caller stops
    /// waiting.
    pub async fn execute(&self, agent_id: AgentId, confirmation: Confirmation) -> ExecutionOutcome {
        let requested_at = Utc::now();

        let agent = match self.admit(agent_id, confirmation).await {
            Ok(agent) => agent,
            Err(error) => {
                info!(agent_id, reason = %error, "Execution request rejected");
                let outcome = ExecutionOutcome::rejected(agent_id, requested_at, &error);
                self.publish(ExecutionEvent::ExecutionFinished {
                    outcome: outcome.clone(),
                });
                return outcome;
            }
        };

        let request_id = Uuid::new_v4();
        let coordinator = self.clone();
        let run = tokio::spawn(async move {
            coordinator
                .run_admitted(request_id, agent, requested_at)
                .await
        });

        match run.await {
            Ok(outcome) => outcome,
            Err(join_error) => {
                error!(
                    agent_id,
                    request_id = %request_id,
                    error = %join_error,
                    "Execution task stopped unexpectedly"
                );
                self.state.write().await.set_running(agent_id, false);
                ExecutionOutcome::finished(
                    request_id,
                    agent_id,
                    requested_at,
                    0,
                    Err(ExecutionError::Failed("unexpected internal error".to_string())),
                )
            }
        }
    }

    /// Run every admission check and mark the agent as running
    async fn admit(
        &self,
        agent_id: AgentId,
        confirmation: Confirmation,
    ) -> Result<Agent, ExecutionError> {
        let mut state = self.state.write().await;
        let agent = state
            .get_agent_mut(agent_id)
            .ok_or(ExecutionError::NotFound(agent_id))?;

        if agent.state != AgentState::Active {
            return Err(ExecutionError::NotEligible(agent.state));
        }

        // Re-evaluated on every request; a previous confirmation is never reused.
        if self.config.is_critical(&agent.area) {
            match confirmation {
                Confirmation::Absent => {
                    return Err(ExecutionError::ConfirmationRequired(agent.area.clone()));
                }
                Confirmation::Declined => return Err(ExecutionError::ConfirmationDeclined),
                Confirmation::Confirmed => {}
            }
        }

        if agent.running {
            return Err(ExecutionError::AlreadyRunning);
        }
        agent.running = true;
        Ok(agent.clone())
    }

    async fn run_admitted(
        &self,
        request_id: Uuid,
        agent: Agent,
        requested_at: DateTime<Utc>,
    ) -> ExecutionOutcome {
        info!(
            agent_id = agent.id,
            agent_name = %agent.name,
            request_id = %request_id,
            "Executing agent"
        );
        self.publish(ExecutionEvent::ExecutionStarted {
            request_id,
            agent_id: agent.id,
            started_at: Utc::now(),
        });

        let start = Instant::now();
        let result = self.run_with_timeout(&agent).await;
        let duration_ms = start.elapsed().as_millis() as u64;

        let outcome =
            ExecutionOutcome::finished(request_id, agent.id, requested_at, duration_ms, result);
        self.release(&outcome).await;

        info!(
            agent_id = agent.id,
            request_id = %request_id,
            kind = ?outcome.kind,
            duration_ms,
            "Execution finished"
        );
        self.publish(ExecutionEvent::ExecutionFinished {
            outcome: outcome.clone(),
        });
        outcome
    }

    /// Race the runner against the configured timeout
    async fn run_with_timeout(&self, agent: &Agent) -> Result<String, ExecutionError> {
        let runner = Arc::clone(&self.runner);
        let task_agent = agent.clone();
        let mut handle = tokio::spawn(async move { runner.run(&task_agent).await });

        match timeout(self.config.timeout(), &mut handle).await {
            Ok(Ok(Ok(message))) => Ok(message),
            Ok(Ok(Err(e))) => {
                warn!(agent_id = agent.id, error = %e, "Agent run failed");
                Err(ExecutionError::Failed(e.to_string()))
            }
            Ok(Err(join_error)) => {
                error!(
                    agent_id = agent.id,
                    error = %join_error,
                    "Agent runner stopped unexpectedly"
                );
                Err(ExecutionError::Failed(
                    "unexpected error while running the agent".to_string(),
                ))
            }
            Err(_) => {
                handle.abort();
                error!(
                    agent_id = agent.id,
                    timeout_secs = self.config.default_timeout_secs,
                    "Agent execution timed out"
                );
                Err(ExecutionError::Timeout(self.config.default_timeout_secs))
            }
        }
    }

    /// Clear the running flag and record the outcome in the history
    async fn release(&self, outcome: &ExecutionOutcome) {
        let mut state = self.state.write().await;
        state.set_running(outcome.agent_id, false);
        if let Some(record) = outcome.to_record() {
            state.record_execution(record);
        }
    }

    fn publish(&self, event: ExecutionEvent) {
        // No subscribers is not an error.
        let _ = self.events.send(event);
    }
}
