//! Agent runners
//!
//! A runner performs the actual work of an agent once the coordinator has
//! admitted the request. Agents are simulated; no external process is started.

use crate::state::Agent;
use async_trait::async_trait;
use std::time::Duration;
use tracing::debug;

/// Performs one run of an agent
#[async_trait]
pub trait AgentRunner: Send + Sync {
    /// Run the agent to completion
    ///
    /// # Returns
    /// * `Ok(String)` - message shown to the user on success
    /// * `Err(anyhow::Error)` - the run failed
    async fn run(&self, agent: &Agent) -> anyhow::Result<String>;
}

/// Runner that waits for a fixed duration and reports success
#[derive(Debug, Clone)]
pub struct SimulatedRunner {
    duration: Duration,
}

impl SimulatedRunner {
    /// Create a simulated runner taking `duration` per run
    pub fn new(duration: Duration) -> Self {
        Self { duration }
    }

    /// Get the simulated run duration
    pub fn duration(&self) -> Duration {
        self.duration
    }
}

#[async_trait]
impl AgentRunner for SimulatedRunner {
    async fn run(&self, agent: &Agent) -> anyhow::Result<String> {
        debug!(
            agent_id = agent.id,
            duration_ms = self.duration.as_millis() as u64,
            "Simulating agent run"
        );
        tokio::time::sleep(self.duration).await;
        Ok(format!("{} ejecutado exitosamente", agent.name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::AgentState;

    #[tokio::test(start_paused = true)]
    async fn test_simulated_runner_reports_success() {
        let runner = SimulatedRunner::new(Duration::from_secs(1));
        assert_eq!(runner.duration(), Duration::from_secs(1));

        let agent = Agent::new(1, "Agente Contable", "Finanzas", AgentState::Active, "");
        let start = tokio::time::Instant::now();
        let message = runner.run(&agent).await.unwrap();

        assert_eq!(message, "Agente Contable ejecutado exitosamente");
        assert!(start.elapsed() >= Duration::from_secs(1));
    }
}
