//! Agent execution module
//!
//! Coordinates execution requests: eligibility, the critical-area
//! confirmation gate, the per-agent running guard, and the timeout.

pub mod coordinator;
pub mod error;
pub mod events;
pub mod outcome;
pub mod runner;

pub use coordinator::ExecutionCoordinator;
pub use error::ExecutionError;
pub use events::ExecutionEvent;
pub use outcome::{Confirmation, ExecutionOutcome, OutcomeKind};
pub use runner::{AgentRunner, SimulatedRunner};
