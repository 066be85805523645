//! Built-in agent registry
//!
//! The registry the dashboard starts with when no seed file is configured.

use super::app_state::{Agent, AgentState};

/// The default agents, in display order
pub fn default_agents() -> Vec<Agent> {
    vec![
        Agent::new(
            1,
            "Agente Contable",
            "Finanzas",
            AgentState::Active,
            "Envio automatico de facturas y recordatorios.",
        ),
        Agent::new(
            2,
            "Agente Compras",
            "Operaciones",
            AgentState::Active,
            "Descarga de ordenes y conciliacion con proveedores.",
        ),
        Agent::new(
            3,
            "Agente Soporte",
            "CX",
            AgentState::Maintenance,
            "Clasificacion de tickets y respuestas sugeridas.",
        ),
        Agent::new(
            4,
            "Agente Logistica",
            "Operaciones",
            AgentState::Active,
            "Descarga de guias y alertas de entrega.",
        ),
        Agent::new(
            5,
            "Agente Recaudo",
            "Finanzas",
            AgentState::Active,
            "Notificacion de pagos y conciliacion bancaria.",
        ),
        Agent::new(
            6,
            "Agente Legal",
            "Backoffice",
            AgentState::Active,
            "Validacion documental y seguimiento de contratos.",
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_default_agents_are_valid_and_unique() {
        let agents = default_agents();
        let ids: HashSet<_> = agents.iter().map(|a| a.id).collect();
        assert_eq!(ids.len(), agents.len());
        assert!(agents.iter().all(|a| a.validate().is_ok()));
    }
}
