// Seed file loading
// Reads the agent registry from a JSON file instead of the built-in seed

use super::app_state::{Agent, AgentId};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs;
use std::path::Path;
use thiserror::Error;

/// Current seed file format version
pub const SEED_VERSION: u32 = 1;

/// Error types for seed loading
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PersistenceError {
    /// File I/O error
    #[error("IO Error: {0}")]
    IoError(String),
    /// JSON deserialization error
    #[error("JSON Error: {0}")]
    JsonError(String),
    /// Invalid data format
    #[error("Invalid Data: {0}")]
    InvalidData(String),
}

/// Serializable structure of a seed file
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AgentRegistryData {
    /// Version of the seed format
    pub version: u32,
    /// Agents in display order
    pub agents: Vec<Agent>,
}

/// Seed file operations
pub struct AgentRegistry;

impl AgentRegistry {
    /// Load agents from a JSON seed file
    ///
    /// # Arguments
    /// * `path` - Path to the JSON file
    ///
    /// # Returns
    /// * `Ok(Vec<Agent>)` in file order if successful
    /// * `Err(PersistenceError)` if the file is unreadable or invalid
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Vec<Agent>, PersistenceError> {
        let json = fs::read_to_string(path.as_ref())
            .map_err(|e| PersistenceError::IoError(e.to_string()))?;

        let data: AgentRegistryData =
            serde_json::from_str(&json).map_err(|e| PersistenceError::JsonError(e.to_string()))?;

        if data.version != SEED_VERSION {
            return Err(PersistenceError::InvalidData(format!(
                "Unsupported seed version: {}",
                data.version
            )));
        }

        Self::validate(&data.agents)?;
        Ok(data.agents)
    }

    /// Check every agent record and that ids are unique
    pub fn validate(agents: &[Agent]) -> Result<(), PersistenceError> {
        let mut seen: HashSet<AgentId> = HashSet::new();
        for agent in agents {
            agent.validate().map_err(PersistenceError::InvalidData)?;
            if !seen.insert(agent.id) {
                return Err(PersistenceError::InvalidData(format!(
                    "Duplicate agent id: {}",
                    agent.id
                )));
            }
        }
        Ok(())
    }
}
