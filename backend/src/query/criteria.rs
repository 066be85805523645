//! Filter criteria and their validation

use crate::state::AgentState;
use serde::Serialize;
use std::str::FromStr;
use thiserror::Error;

/// Maximum search term length in characters
pub const MAX_TERM_LENGTH: usize = 200;

/// Filter values meaning "no filter", compared ignoring case
const WILDCARDS: &[&str] = &["", "todos", "all"];

/// Malformed filter input
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum QueryError {
    /// Search term exceeds [`MAX_TERM_LENGTH`]
    #[error("Search term exceeds maximum length of {0} characters")]
    TermTooLong(usize),

    /// State filter is not one of the known states
    #[error("Unknown agent state: {0}")]
    UnknownState(String),

    /// Sort key is not supported
    #[error("Unknown sort key: {0}")]
    UnknownSortKey(String),
}

/// Explicit ordering for search results
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SortKey {
    /// By agent id
    Id,
    /// By name (case-insensitive)
    Name,
    /// By area (case-insensitive)
    Area,
    /// By state, in [`AgentState::ALL`] order
    State,
}

impl FromStr for SortKey {
    type Err = QueryError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "id" => Ok(SortKey::Id),
            "name" | "nombre" => Ok(SortKey::Name),
            "area" => Ok(SortKey::Area),
            "state" | "estado" => Ok(SortKey::State),
            _ => Err(QueryError::UnknownSortKey(raw.to_string())),
        }
    }
}

/// Conjunctive search criteria; `None` fields match everything
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterCriteria {
    /// Case-insensitive substring of name or description
    pub term: Option<String>,
    /// Exact area
    pub area: Option<String>,
    /// Exact state
    pub state: Option<AgentState>,
    /// Explicit ordering; registry order when absent
    pub sort: Option<SortKey>,
}

impl FilterCriteria {
    /// Criteria that match the whole registry
    pub fn all() -> Self {
        Self::default()
    }

    /// Restrict to agents whose name or description contains `term`
    pub fn with_term(mut self, term: impl Into<String>) -> Self {
        self.term = Some(term.into());
        self
    }

    /// Restrict to one area
    pub fn with_area(mut self, area: impl Into<String>) -> Self {
        self.area = Some(area.into());
        self
    }

    /// Restrict to one state
    pub fn with_state(mut self, state: AgentState) -> Self {
        self.state = Some(state);
        self
    }

    /// Order the results explicitly
    pub fn sorted_by(mut self, key: SortKey) -> Self {
        self.sort = Some(key);
        self
    }

    /// True when no filter is active
    pub fn is_empty(&self) -> bool {
        self.term.is_none() && self.area.is_none() && self.state.is_none()
    }

    /// Build criteria from raw request parameters
    ///
    /// Blank values and the wildcards `Todos` / `All` mean "no filter".
    ///
    /// # Returns
    /// * `Ok(FilterCriteria)` - normalized criteria
    /// * `Err(QueryError)` - term too long, unknown state or sort key
    pub fn from_params(
        term: Option<&str>,
        area: Option<&str>,
        state: Option<&str>,
        sort: Option<&str>,
    ) -> Result<Self, QueryError> {
        let term = term.map(str::trim).filter(|t| !t.is_empty());
        if let Some(term) = term {
            let len = term.chars().count();
            if len > MAX_TERM_LENGTH {
                return Err(QueryError::TermTooLong(MAX_TERM_LENGTH));
            }
        }

        let state = match non_wildcard(state) {
            Some(raw) => Some(
                AgentState::parse(raw).ok_or_else(|| QueryError::UnknownState(raw.to_string()))?,
            ),
            None => None,
        };

        let sort = match sort.map(str::trim).filter(|s| !s.is_empty()) {
            Some(raw) => Some(raw.parse::<SortKey>()?),
            None => None,
        };

        Ok(Self {
            term: term.map(str::to_string),
            area: non_wildcard(area).map(str::to_string),
            state,
            sort,
        })
    }
}

fn non_wildcard(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| {
        !WILDCARDS
            .iter()
            .any(|wildcard| v.eq_ignore_ascii_case(wildcard))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_params_empty_is_wildcard() {
        let criteria = FilterCriteria::from_params(None, None, None, None).unwrap();
        assert!(criteria.is_empty());
        assert_eq!(criteria, FilterCriteria::all());

        let criteria =
            FilterCriteria::from_params(Some("   "), Some("Todos"), Some("all"), Some("")).unwrap();
        assert!(criteria.is_empty());
        assert!(criteria.sort.is_none());
    }

    #[test]
    fn test_from_params_normalizes_values() {
        let criteria = FilterCriteria::from_params(
            Some("  contable "),
            Some(" Finanzas"),
            Some("activo"),
            Some("Name"),
        )
        .unwrap();

        assert_eq!(criteria.term.as_deref(), Some("contable"));
        assert_eq!(criteria.area.as_deref(), Some("Finanzas"));
        assert_eq!(criteria.state, Some(AgentState::Active));
        assert_eq!(criteria.sort, Some(SortKey::Name));
    }

    #[test]
    fn test_from_params_rejects_long_term() {
        let term = "a".repeat(MAX_TERM_LENGTH + 1);
        let result = FilterCriteria::from_params(Some(&term), None, None, None);
        assert_eq!(result, Err(QueryError::TermTooLong(MAX_TERM_LENGTH)));

        let term = "ñ".repeat(MAX_TERM_LENGTH);
        assert!(FilterCriteria::from_params(Some(&term), None, None, None).is_ok());
    }

    #[test]
    fn test_from_params_rejects_unknown_state() {
        let result = FilterCriteria::from_params(None, None, Some("Pausado"), None);
        assert_eq!(result, Err(QueryError::UnknownState("Pausado".to_string())));
    }

    #[test]
    fn test_from_params_rejects_unknown_sort() {
        let result = FilterCriteria::from_params(None, None, None, Some("color"));
        assert!(matches!(result, Err(QueryError::UnknownSortKey(_))));
    }
}
