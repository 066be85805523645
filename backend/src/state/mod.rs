// State management module
// Handles the agent registry, execution history, and seed loading

pub mod app_state;
pub mod history;
pub mod persistence;
pub mod seed;

pub use app_state::{Agent, AgentId, AgentState, AppState, SharedState};
pub use history::{AgentDetails, ExecutionRecord};
pub use persistence::PersistenceError;
