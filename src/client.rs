//! Role: The backend's three endpoints behind one trait.
//!
//! `GET /query?<fragment>` returns a delimited-text table; `/agents` and
//! `/protocols` return the JSON catalogs. Tests substitute an in-memory
//! implementation.

use tracing::debug;

use crate::catalog::{AgentCatalog, ProtocolCatalog};
use crate::config::DashboardConfig;
use crate::error::QueryError;

/// Read access to the flow-record backend.
pub trait FlowApi {
    /// Run a query; the fragment is passed through as the query string.
    /// The error carries the raw payload for verbatim display.
    fn query(
        &self,
        fragment: &str,
    ) -> impl std::future::Future<Output = Result<String, QueryError>> + Send;

    fn agents(&self) -> impl std::future::Future<Output = anyhow::Result<AgentCatalog>> + Send;

    fn protocols(
        &self,
    ) -> impl std::future::Future<Output = anyhow::Result<ProtocolCatalog>> + Send;
}

/// HTTP implementation over reqwest.
#[derive(Debug, Clone)]
pub struct HttpFlowApi {
    client: reqwest::Client,
    config: DashboardConfig,
}

impl HttpFlowApi {
    pub fn new(config: DashboardConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            config,
        }
    }
}

impl FlowApi for HttpFlowApi {
    async fn query(&self, fragment: &str) -> Result<String, QueryError> {
        let url = self.config.query_url(fragment);
        debug!(%url, "query");

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| QueryError::new(e.to_string()))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| QueryError::new(e.to_string()))?;

        if status.is_success() {
            Ok(body)
        } else {
            // surface the server's error payload, not a synthesized message
            Err(QueryError::new(body))
        }
    }

    async fn agents(&self) -> anyhow::Result<AgentCatalog> {
        let url = self.config.agents_url();
        debug!(%url, "loading agent catalog");
        Ok(self
            .client
            .get(&url)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?)
    }

    async fn protocols(&self) -> anyhow::Result<ProtocolCatalog> {
        let url = self.config.protocols_url();
        debug!(%url, "loading protocol catalog");
        Ok(self
            .client
            .get(&url)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?)
    }
}
