//! Agent listing and search API handlers
//!
//! Read-only endpoints over the agent registry.

use crate::api::ApiContext;
use crate::error::AppError;
use crate::query::{self, FilterCriteria};
use crate::state::{Agent, AgentDetails, AgentId, AgentState, ExecutionRecord};
use axum::{
    extract::{rejection::PathRejection, Path, Query, State},
    response::Json,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Agent response type
#[derive(Debug, Serialize)]
pub struct AgentResponse {
    /// Unique identifier for the agent
    pub id: AgentId,
    /// Human-readable name of the agent
    pub name: String,
    /// Business area of the agent
    pub area: String,
    /// Current state of the agent
    pub state: AgentState,
    /// What the agent automates
    pub description: String,
    /// Badge color derived from the state
    pub status_color: &'static str,
    /// Whether an execution is currently running
    pub running: bool,
}

impl From<&Agent> for AgentResponse {
    fn from(agent: &Agent) -> Self {
        Self {
            id: agent.id,
            name: agent.name.clone(),
            area: agent.area.clone(),
            state: agent.state,
            description: agent.description.clone(),
            status_color: agent.status_color(),
            running: agent.running,
        }
    }
}

/// Agents list response
#[derive(Debug, Serialize)]
pub struct AgentsListResponse {
    /// Agents in display order
    pub agents: Vec<AgentResponse>,
    /// Number of agents returned
    pub count: usize,
}

impl AgentsListResponse {
    fn from_agents(agents: &[Agent]) -> Self {
        let agents: Vec<AgentResponse> = agents.iter().map(AgentResponse::from).collect();
        Self {
            count: agents.len(),
            agents,
        }
    }
}

/// Agent details response
#[derive(Debug, Serialize)]
pub struct AgentDetailsResponse {
    /// The agent itself
    #[serde(flatten)]
    pub agent: AgentResponse,
    /// Request time of the most recent execution
    pub last_execution: Option<DateTime<Utc>>,
    /// Number of recorded executions
    pub total_executions: usize,
    /// Mean running time in milliseconds
    pub average_duration_ms: Option<u64>,
    /// Percentage of successful executions
    pub success_rate: Option<f64>,
    /// Most recent executions, newest first
    pub recent_executions: Vec<ExecutionRecord>,
}

impl From<AgentDetails> for AgentDetailsResponse {
    fn from(details: AgentDetails) -> Self {
        Self {
            agent: AgentResponse::from(&details.agent),
            last_execution: details.last_execution,
            total_executions: details.total_executions,
            average_duration_ms: details.average_duration_ms,
            success_rate: details.success_rate,
            recent_executions: details.recent_executions,
        }
    }
}

/// Search query parameters
#[derive(Debug, Default, Deserialize)]
pub struct SearchParams {
    /// Free-text term matched against name and description
    pub term: Option<String>,
    /// Exact area, or `Todos` for any
    pub area: Option<String>,
    /// Exact state, or `Todos` for any
    pub state: Option<String>,
    /// Optional sort key (`id`, `name`, `area`, `state`)
    pub sort: Option<String>,
}

/// Distinct areas response
#[derive(Debug, Serialize)]
pub struct AreasResponse {
    /// Areas present in the registry, sorted
    pub areas: Vec<String>,
}

/// Distinct states response
#[derive(Debug, Serialize)]
pub struct StatesResponse {
    /// States present in the registry
    pub states: Vec<AgentState>,
}

/// GET /api/agents - List all agents in registry order
pub async fn list_agents(State(ctx): State<ApiContext>) -> Json<AgentsListResponse> {
    let state = ctx.state.read().await;
    Json(AgentsListResponse::from_agents(state.agents()))
}

/// GET /api/agents/search - Filter agents by term, area and state
pub async fn search_agents(
    State(ctx): State<ApiContext>,
    Query(params): Query<SearchParams>,
) -> Result<Json<AgentsListResponse>, AppError> {
    let criteria = FilterCriteria::from_params(
        params.term.as_deref(),
        params.area.as_deref(),
        params.state.as_deref(),
        params.sort.as_deref(),
    )?;

    let state = ctx.state.read().await;
    let results = query::search(state.agents(), &criteria);
    tracing::debug!(?criteria, matches = results.len(), "Search executed");

    Ok(Json(AgentsListResponse::from_agents(&results)))
}

/// GET /api/agents/:id - Get an agent with its execution statistics
pub async fn get_agent(
    State(ctx): State<ApiContext>,
    path: Result<Path<AgentId>, PathRejection>,
) -> Result<Json<AgentDetailsResponse>, AppError> {
    let Path(id) = path?;
    let state = ctx.state.read().await;
    let details = state
        .agent_details(id)
        .ok_or(AppError::AgentNotFound(id))?;

    Ok(Json(AgentDetailsResponse::from(details)))
}

/// GET /api/areas - Distinct areas for the area filter
pub async fn list_areas(State(ctx): State<ApiContext>) -> Json<AreasResponse> {
    let state = ctx.state.read().await;
    Json(AreasResponse {
        areas: query::areas(state.agents()),
    })
}

/// GET /api/states - Distinct states for the state filter
pub async fn list_states(State(ctx): State<ApiContext>) -> Json<StatesResponse> {
    let state = ctx.state.read().await;
    Json(StatesResponse {
        states: query::states(state.agents()),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ExecutionConfig;
    use crate::executor::ExecutionCoordinator;
    use crate::state::AppState;

    fn create_test_context(state: AppState) -> ApiContext {
        ApiContext::new(ExecutionCoordinator::simulated(
            state.into_shared(),
            ExecutionConfig::default(),
        ))
    }

    #[tokio::test]
    async fn test_list_agents_empty() {
        let ctx = create_test_context(AppState::new());
        let response = list_agents(State(ctx)).await;
        assert_eq!(response.count, 0);
        assert!(response.agents.is_empty());
    }

    #[tokio::test]
    async fn test_list_agents_in_registry_order() {
        let ctx = create_test_context(AppState::seeded());
        let response = list_agents(State(ctx)).await;
        assert_eq!(response.count, 6);
        let ids: Vec<AgentId> = response.agents.iter().map(|a| a.id).collect();
        assert_eq!(ids, vec![1, 2, 3, 4, 5, 6]);
        assert_eq!(response.agents[2].status_color, "warning");
    }

    #[tokio::test]
    async fn test_search_agents_by_term() {
        let ctx = create_test_context(AppState::seeded());
        let params = SearchParams {
            term: Some("contable".to_string()),
            ..Default::default()
        };
        let response = search_agents(State(ctx), Query(params)).await.unwrap();
        assert_eq!(response.count, 1);
        assert_eq!(response.agents[0].name, "Agente Contable");
    }

    #[tokio::test]
    async fn test_search_agents_wildcards() {
        let ctx = create_test_context(AppState::seeded());
        let params = SearchParams {
            area: Some("Todos".to_string()),
            state: Some("Todos".to_string()),
            ..Default::default()
        };
        let response = search_agents(State(ctx), Query(params)).await.unwrap();
        assert_eq!(response.count, 6);
    }

    #[tokio::test]
    async fn test_search_agents_invalid_state() {
        let ctx = create_test_context(AppState::seeded());
        let params = SearchParams {
            state: Some("Pausado".to_string()),
            ..Default::default()
        };
        let result = search_agents(State(ctx), Query(params)).await;
        match result.unwrap_err() {
            AppError::Validation(_) => {
                // Expected error
            }
            other => {
                panic!("Expected Validation error, got: {:?}", other);
            }
        }
    }

    #[tokio::test]
    async fn test_get_agent_not_found() {
        let ctx = create_test_context(AppState::seeded());
        let result = get_agent(State(ctx), Ok(Path(999))).await;
        match result.unwrap_err() {
            AppError::AgentNotFound(id) => assert_eq!(id, 999),
            other => {
                panic!("Expected AgentNotFound error, got: {:?}", other);
            }
        }
    }

    #[tokio::test]
    async fn test_get_agent_without_history() {
        let ctx = create_test_context(AppState::seeded());
        let response = get_agent(State(ctx), Ok(Path(6))).await.unwrap();
        assert_eq!(response.agent.name, "Agente Legal");
        assert_eq!(response.total_executions, 0);
        assert!(response.success_rate.is_none());
    }

    #[tokio::test]
    async fn test_facets() {
        let ctx = create_test_context(AppState::seeded());
        let areas = list_areas(State(ctx.clone())).await;
        assert_eq!(areas.areas.len(), 4);
        let states = list_states(State(ctx)).await;
        assert_eq!(
            states.states,
            vec![AgentState::Active, AgentState::Maintenance]
        );
    }
}
