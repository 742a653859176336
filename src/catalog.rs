//! Role: Read-only reference data loaded once at bootstrap.
//!
//! The agent catalog maps agent ids to names and interface lists; the
//! protocol catalog is the set of known protocol names. Both exist only to
//! power autocomplete and interface filtering. A failed load leaves the
//! default (empty) catalog in place, which simply yields empty candidate
//! sets downstream.

use std::collections::HashMap;

use itertools::Itertools;
use serde::{Deserialize, Serialize};

/// One agent record as served by `/agents`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Agent {
    #[serde(rename = "Name")]
    pub name: String,
    #[serde(rename = "Interfaces", default)]
    pub interfaces: Vec<String>,
}

/// Catalog of flow agents, keyed by agent id.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AgentCatalog {
    #[serde(rename = "Agents", default)]
    pub agents: HashMap<String, Agent>,
}

impl AgentCatalog {
    /// Agent names for the agent-field autocomplete, sorted for stable order.
    pub fn agent_names(&self) -> Vec<String> {
        self.agents.values().map(|a| a.name.clone()).sorted().collect()
    }

    /// Interfaces of every agent whose name matches exactly.
    ///
    /// No match yields an empty list, not an error. Ids sharing one name all
    /// contribute their interfaces.
    pub fn interfaces_for(&self, agent_name: &str) -> Vec<String> {
        let mut interfaces = Vec::new();
        for agent in self.agents.values() {
            if agent.name != agent_name {
                continue;
            }
            interfaces.extend(agent.interfaces.iter().cloned());
        }
        interfaces.sort();
        interfaces
    }
}

/// Catalog of known protocol names, served as a JSON object whose keys are
/// the names. Value content is unused here.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProtocolCatalog(pub HashMap<String, serde_json::Value>);

impl ProtocolCatalog {
    /// Protocol names for the protocol-field autocomplete, sorted.
    pub fn protocol_names(&self) -> Vec<String> {
        self.0.keys().cloned().sorted().collect()
    }
}
