//! Query engine
//!
//! Free-text search and categorical filtering over the agent registry.
//! Everything here is a pure function of its inputs.

pub mod criteria;
pub mod engine;

pub use criteria::{FilterCriteria, QueryError, SortKey, MAX_TERM_LENGTH};
pub use engine::{areas, search, states};
