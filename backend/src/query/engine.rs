//! Search and facet functions over a slice of agents

use super::criteria::{FilterCriteria, SortKey};
use crate::state::{Agent, AgentState};
use std::collections::BTreeSet;

/// Return the agents matching every active criterion
///
/// Results keep the order of `agents` unless `criteria.sort` is set, in
/// which case a stable sort is applied. The result is always an owned copy.
pub fn search(agents: &[Agent], criteria: &FilterCriteria) -> Vec<Agent> {
    let term = criteria.term.as_deref().map(str::to_lowercase);

    let mut results: Vec<Agent> = agents
        .iter()
        .filter(|agent| {
            term.as_deref().map_or(true, |term| matches_term(agent, term))
                && criteria.area.as_deref().map_or(true, |area| agent.area == area)
                && criteria.state.map_or(true, |state| agent.state == state)
        })
        .cloned()
        .collect();

    if let Some(key) = criteria.sort {
        sort_agents(&mut results, key);
    }

    results
}

/// Distinct areas present in `agents`, sorted
pub fn areas(agents: &[Agent]) -> Vec<String> {
    agents
        .iter()
        .map(|agent| agent.area.clone())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

/// Distinct states present in `agents`, in [`AgentState::ALL`] order
pub fn states(agents: &[Agent]) -> Vec<AgentState> {
    agents
        .iter()
        .map(|agent| agent.state)
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

// `term` is already lowercased
fn matches_term(agent: &Agent, term: &str) -> bool {
    agent.name.to_lowercase().contains(term) || agent.description.to_lowercase().contains(term)
}

fn sort_agents(agents: &mut [Agent], key: SortKey) {
    match key {
        SortKey::Id => agents.sort_by_key(|a| a.id),
        SortKey::Name => agents.sort_by_cached_key(|a| a.name.to_lowercase()),
        SortKey::Area => agents.sort_by_cached_key(|a| a.area.to_lowercase()),
        SortKey::State => agents.sort_by_key(|a| a.state),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::seed::default_agents;

    fn ids(agents: &[Agent]) -> Vec<u32> {
        agents.iter().map(|a| a.id).collect()
    }

    #[test]
    fn test_empty_criteria_returns_full_registry_in_order() {
        let agents = default_agents();
        let results = search(&agents, &FilterCriteria::all());
        assert_eq!(results, agents);
    }

    #[test]
    fn test_empty_registry() {
        assert!(search(&[], &FilterCriteria::all()).is_empty());
        assert!(search(&[], &FilterCriteria::all().with_term("x")).is_empty());
        assert!(areas(&[]).is_empty());
        assert!(states(&[]).is_empty());
    }

    #[test]
    fn test_term_matches_name_case_insensitively() {
        let agents = default_agents();
        let results = search(&agents, &FilterCriteria::all().with_term("contable"));
        assert_eq!(ids(&results), vec![1]);

        let results = search(&agents, &FilterCriteria::all().with_term("CONTABLE"));
        assert_eq!(ids(&results), vec![1]);
    }

    #[test]
    fn test_term_matches_description() {
        let agents = default_agents();
        let results = search(&agents, &FilterCriteria::all().with_term("Conciliacion"));
        assert_eq!(ids(&results), vec![2, 5]);
    }

    #[test]
    fn test_every_substring_of_name_finds_the_agent() {
        let agents = default_agents();
        for agent in &agents {
            let chars: Vec<char> = agent.name.chars().collect();
            for start in 0..chars.len() {
                for end in (start + 1)..=chars.len() {
                    let term: String = chars[start..end].iter().collect::<String>().to_uppercase();
                    let results = search(&agents, &FilterCriteria::all().with_term(term.clone()));
                    assert!(
                        results.iter().any(|a| a.id == agent.id),
                        "term {term:?} should find agent {}",
                        agent.id
                    );
                }
            }
        }
    }

    #[test]
    fn test_area_and_state_are_conjunctive() {
        let mut agents = default_agents();
        agents[3].state = AgentState::Inactive; // Agente Logistica

        let criteria = FilterCriteria::all()
            .with_area("Operaciones")
            .with_state(AgentState::Active);
        let results = search(&agents, &criteria);
        assert_eq!(ids(&results), vec![2]);
        assert!(results
            .iter()
            .all(|a| a.area == "Operaciones" && a.state == AgentState::Active));
    }

    #[test]
    fn test_area_is_exact_match() {
        let agents = default_agents();
        assert!(search(&agents, &FilterCriteria::all().with_area("finanzas")).is_empty());
        assert_eq!(
            ids(&search(&agents, &FilterCriteria::all().with_area("Finanzas"))),
            vec![1, 5]
        );
    }

    #[test]
    fn test_term_and_filters_combined() {
        let agents = default_agents();
        let criteria = FilterCriteria::all()
            .with_term("agente")
            .with_state(AgentState::Maintenance);
        assert_eq!(ids(&search(&agents, &criteria)), vec![3]);
    }

    #[test]
    fn test_sort_by_name_is_explicit() {
        let agents = default_agents();
        let results = search(&agents, &FilterCriteria::all().sorted_by(SortKey::Name));
        let names: Vec<&str> = results.iter().map(|a| a.name.as_str()).collect();
        assert_eq!(
            names,
            vec![
                "Agente Compras",
                "Agente Contable",
                "Agente Legal",
                "Agente Logistica",
                "Agente Recaudo",
                "Agente Soporte",
            ]
        );
    }

    #[test]
    fn test_sort_by_area_is_stable() {
        let agents = default_agents();
        let results = search(&agents, &FilterCriteria::all().sorted_by(SortKey::Area));
        assert_eq!(ids(&results), vec![6, 3, 1, 5, 2, 4]);
    }

    #[test]
    fn test_sort_by_state() {
        let agents = default_agents();
        let results = search(&agents, &FilterCriteria::all().sorted_by(SortKey::State));
        assert_eq!(ids(&results), vec![1, 2, 4, 5, 6, 3]);
    }

    #[test]
    fn test_facets() {
        let agents = default_agents();
        assert_eq!(
            areas(&agents),
            vec!["Backoffice", "CX", "Finanzas", "Operaciones"]
        );
        assert_eq!(
            states(&agents),
            vec![AgentState::Active, AgentState::Maintenance]
        );
    }
}
