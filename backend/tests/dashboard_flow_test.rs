//! End-to-end checks of the query engine and execution coordinator working
//! against one shared registry, without the HTTP layer.

use agent_dashboard_backend::config::ExecutionConfig;
use agent_dashboard_backend::executor::{
    AgentRunner, Confirmation, ExecutionCoordinator, ExecutionEvent, OutcomeKind,
};
use agent_dashboard_backend::query::{search, FilterCriteria};
use agent_dashboard_backend::state::{Agent, AgentState, AppState};
use async_trait::async_trait;
use std::sync::Arc;

/// Runner that never completes on its own
struct StuckRunner;

#[async_trait]
impl AgentRunner for StuckRunner {
    async fn run(&self, _agent: &Agent) -> anyhow::Result<String> {
        std::future::pending::<()>().await;
        unreachable!()
    }
}

#[tokio::test(start_paused = true)]
async fn test_search_then_execute_critical_agent() {
    let state = AppState::seeded().into_shared();
    let coordinator = ExecutionCoordinator::simulated(state.clone(), ExecutionConfig::default());

    let results = {
        let state = state.read().await;
        search(state.agents(), &FilterCriteria::all().with_term("contable"))
    };
    assert_eq!(results.len(), 1);
    let agent = &results[0];
    assert_eq!(agent.id, 1);
    assert_eq!(agent.area, "Finanzas");
    assert_eq!(agent.state, AgentState::Active);

    let outcome = coordinator.execute(agent.id, Confirmation::Absent).await;
    assert_eq!(outcome.kind, OutcomeKind::ConfirmationRequired);
    assert!(!state.read().await.get_agent(1).unwrap().running);

    let outcome = coordinator.execute(agent.id, Confirmation::Confirmed).await;
    assert_eq!(outcome.kind, OutcomeKind::Succeeded);
    assert!(outcome.duration_ms.unwrap() < coordinator.config().timeout().as_millis() as u64);
}

#[tokio::test(start_paused = true)]
async fn test_timed_out_execution_does_not_block_searches_or_other_agents() {
    let state = AppState::seeded().into_shared();
    let config = ExecutionConfig {
        default_timeout_secs: 5,
        ..ExecutionConfig::default()
    };
    let coordinator = ExecutionCoordinator::new(state.clone(), config, Arc::new(StuckRunner));
    let mut events = coordinator.subscribe();

    let stuck = {
        let coordinator = coordinator.clone();
        tokio::spawn(async move { coordinator.execute(2, Confirmation::Absent).await })
    };

    // Wait for the start event; the registry stays readable meanwhile
    match events.recv().await.unwrap() {
        ExecutionEvent::ExecutionStarted { agent_id, .. } => assert_eq!(agent_id, 2),
        other => panic!("Expected start event, got: {:?}", other),
    }
    {
        let state = state.read().await;
        let running = search(state.agents(), &FilterCriteria::all().with_term("compras"));
        assert!(running[0].running);
    }

    let duplicate = coordinator.execute(2, Confirmation::Absent).await;
    assert_eq!(duplicate.kind, OutcomeKind::AlreadyRunning);

    let outcome = stuck.await.unwrap();
    assert_eq!(outcome.kind, OutcomeKind::TimedOut);
    assert!(!state.read().await.get_agent(2).unwrap().running);

    let details = state.read().await.agent_details(2).unwrap();
    assert_eq!(details.total_executions, 1);
    assert_eq!(details.success_rate, Some(0.0));
}
