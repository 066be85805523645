// Application state management
// Contains the agent registry and per-agent execution history

use crate::state::history::{AgentDetails, ExecutionRecord, MAX_HISTORY_PER_AGENT};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;
use tokio::sync::RwLock;

/// Unique identifier for an agent
pub type AgentId = u32;

/// Application state shared between HTTP handlers and the execution coordinator
pub type SharedState = Arc<RwLock<AppState>>;

/// Agent state enumeration
/// Represents whether an agent may currently be executed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum AgentState {
    /// Agent can be executed
    #[serde(rename = "Activo", alias = "Active")]
    Active,
    /// Agent is temporarily unavailable
    #[serde(rename = "En mantenimiento", alias = "Maintenance")]
    Maintenance,
    /// Agent is switched off
    #[serde(rename = "Inactivo", alias = "Inactive")]
    Inactive,
}

impl AgentState {
    /// All states in display order
    pub const ALL: [AgentState; 3] = [
        AgentState::Active,
        AgentState::Maintenance,
        AgentState::Inactive,
    ];

    /// Label shown in the dashboard (same as the wire name)
    pub fn label(self) -> &'static str {
        match self {
            AgentState::Active => "Activo",
            AgentState::Maintenance => "En mantenimiento",
            AgentState::Inactive => "Inactivo",
        }
    }

    /// Presentation hint for the status badge
    pub fn status_color(self) -> &'static str {
        match self {
            AgentState::Active => "success",
            AgentState::Maintenance => "warning",
            AgentState::Inactive => "secondary",
        }
    }

    /// Parse either the dashboard label or the English variant name, ignoring case
    pub fn parse(raw: &str) -> Option<Self> {
        let raw = raw.trim();
        Self::ALL.into_iter().find(|state| {
            state.label().eq_ignore_ascii_case(raw)
                || format!("{state:?}").eq_ignore_ascii_case(raw)
        })
    }
}

impl fmt::Display for AgentState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Agent structure
/// Represents one pre-defined automation task
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Agent {
    /// Unique identifier for the agent
    pub id: AgentId,
    /// Display name of the agent
    #[serde(alias = "nombre")]
    pub name: String,
    /// Business area the agent belongs to
    pub area: String,
    /// Current state of the agent
    #[serde(alias = "estado")]
    pub state: AgentState,
    /// What the agent automates
    #[serde(alias = "descripcion")]
    pub description: String,
    /// True only while an execution of this agent is running
    #[serde(default, skip_deserializing)]
    pub running: bool,
}

impl Agent {
    /// Create a new, idle agent
    pub fn new(
        id: AgentId,
        name: impl Into<String>,
        area: impl Into<String>,
        state: AgentState,
        description: impl Into<String>,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            area: area.into(),
            state,
            description: description.into(),
            running: false,
        }
    }

    /// Presentation hint derived from the agent state
    pub fn status_color(&self) -> &'static str {
        self.state.status_color()
    }

    /// Validate the agent record
    /// Returns Ok(()) if valid, Err with message if invalid
    pub fn validate(&self) -> Result<(), String> {
        if self.name.trim().is_empty() {
            return Err(format!("Agent {} has an empty name", self.id));
        }
        if self.area.trim().is_empty() {
            return Err(format!("Agent {} has an empty area", self.id));
        }
        Ok(())
    }
}

/// Main application state
/// Owns the agent registry (in display order) and the execution history
#[derive(Debug, Clone, Default)]
pub struct AppState {
    agents: Vec<Agent>,
    history: HashMap<AgentId, Vec<ExecutionRecord>>,
}

impl AppState {
    /// Create an empty application state
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a state seeded with the built-in agents
    pub fn seeded() -> Self {
        Self::with_agents(super::seed::default_agents())
    }

    /// Create a state from the given agents, skipping duplicate ids
    pub fn with_agents(agents: impl IntoIterator<Item = Agent>) -> Self {
        let mut state = Self::new();
        for agent in agents {
            let id = agent.id;
            if !state.add_agent(agent) {
                tracing::warn!(agent_id = id, "Skipping agent with duplicate id");
            }
        }
        state
    }

    /// Wrap the state for sharing across tasks
    pub fn into_shared(self) -> SharedState {
        Arc::new(RwLock::new(self))
    }

    /// Add an agent to the end of the registry
    /// Returns true if the agent was added (false if ID already exists)
    pub fn add_agent(&mut self, agent: Agent) -> bool {
        if self.agents.iter().any(|a| a.id == agent.id) {
            false
        } else {
            self.agents.push(agent);
            true
        }
    }

    /// Registry in display order
    pub fn agents(&self) -> &[Agent] {
        &self.agents
    }

    /// Owned copy of the registry in display order
    pub fn list_agents(&self) -> Vec<Agent> {
        self.agents.clone()
    }

    /// Get an agent by ID
    pub fn get_agent(&self, id: AgentId) -> Option<&Agent> {
        self.agents.iter().find(|a| a.id == id)
    }

    /// Get a mutable reference to an agent by ID
    pub fn get_agent_mut(&mut self, id: AgentId) -> Option<&mut Agent> {
        self.agents.iter_mut().find(|a| a.id == id)
    }

    /// Get the number of agents in the registry
    pub fn agent_count(&self) -> usize {
        self.agents.len()
    }

    /// Update an agent's running flag
    /// Returns true if the agent was found and updated
    pub fn set_running(&mut self, id: AgentId, running: bool) -> bool {
        if let Some(agent) = self.get_agent_mut(id) {
            agent.running = running;
            true
        } else {
            false
        }
    }

    /// Append an execution record, dropping the oldest beyond the history limit
    pub fn record_execution(&mut self, record: ExecutionRecord) {
        let records = self.history.entry(record.agent_id).or_default();
        records.push(record);
        if records.len() > MAX_HISTORY_PER_AGENT {
            let excess = records.len() - MAX_HISTORY_PER_AGENT;
            records.drain(..excess);
        }
    }

    /// Execution records for an agent, oldest first
    pub fn history(&self, id: AgentId) -> &[ExecutionRecord] {
        self.history.get(&id).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Agent plus statistics computed from its execution history
    pub fn agent_details(&self, id: AgentId) -> Option<AgentDetails> {
        self.get_agent(id)
            .map(|agent| AgentDetails::from_history(agent.clone(), self.history(id)))
    }

    /// Load agents from a seed file
    /// Replaces all current agents and clears the history
    /// Returns the number of agents loaded, or an error if loading failed
    pub fn load_agents<P: AsRef<std::path::Path>>(
        &mut self,
        path: P,
    ) -> Result<usize, super::persistence::PersistenceError> {
        let loaded_agents = super::persistence::AgentRegistry::load_from_file(path)?;
        let count = loaded_agents.len();
        self.agents = loaded_agents;
        self.history.clear();
        Ok(count)
    }
}
