use std::fs::File;

use anyhow::Result;
use serde::{Deserialize, Serialize};

/// Endpoint configuration for the dashboard. Built once at startup and
/// treated as immutable afterwards.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DashboardConfig {
    /// Base URL of the flow-record backend, e.g. "http://localhost:4440".
    pub base_url: String,
    #[serde(default = "default_query_path")]
    pub query_path: String,
    #[serde(default = "default_agents_path")]
    pub agents_path: String,
    #[serde(default = "default_protocols_path")]
    pub protocols_path: String,
}

fn default_query_path() -> String {
    "/query".to_string()
}

fn default_agents_path() -> String {
    "/agents".to_string()
}

fn default_protocols_path() -> String {
    "/protocols".to_string()
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:4440".to_string(),
            query_path: default_query_path(),
            agents_path: default_agents_path(),
            protocols_path: default_protocols_path(),
        }
    }
}

impl DashboardConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Self::default()
        }
    }

    /// Load configuration from a JSON file
    pub fn from_json_file(path: &str) -> Result<Self> {
        let file = File::open(path)?;
        Ok(serde_json::from_reader(file)?)
    }

    pub fn query_url(&self, fragment: &str) -> String {
        format!("{}{}?{}", self.base_url, self.query_path, fragment)
    }

    pub fn agents_url(&self) -> String {
        format!("{}{}", self.base_url, self.agents_path)
    }

    pub fn protocols_url(&self) -> String {
        format!("{}{}", self.base_url, self.protocols_path)
    }
}
