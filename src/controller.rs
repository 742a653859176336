//! Role: Ties the codec, the catalogs and the renderer together.
//!
//! The current fragment is the single source of truth; the form and the
//! chart are derived views. Setting a fragment first syncs the form, then
//! renders, and both steps read the same stored snapshot, so they cannot
//! observe different queries. Fragment changes are also published on a
//! watch channel for any outer UI that mirrors them (e.g. into a location
//! bar).

use tokio::sync::watch;
use tracing::{debug, warn};

use crate::catalog::{AgentCatalog, ProtocolCatalog};
use crate::chart::table::ChartTable;
use crate::chart::view::{ChartOutput, ChartSpec, ChartWidget};
use crate::client::FlowApi;
use crate::error::QueryError;
use crate::state::codec;
use crate::state::fields::FieldKey;
use crate::state::form::QueryForm;

/// Default query window seeded into an untouched form: the last 15 minutes.
const DEFAULT_WINDOW_SECS: i64 = 900;

/// Generation stamp handed out when a render starts; completions whose
/// stamp is no longer current are discarded instead of drawing a stale
/// chart.
#[derive(Debug, Clone)]
pub struct RenderTicket {
    generation: u64,
    fragment: Option<String>,
}

impl RenderTicket {
    pub fn fragment(&self) -> Option<&str> {
        self.fragment.as_deref()
    }
}

/// The dashboard controller.
pub struct Dashboard<A: FlowApi> {
    api: A,
    agents: AgentCatalog,
    protocols: ProtocolCatalog,
    form: QueryForm,
    fragment: Option<String>,
    chart: ChartOutput,
    generation: u64,
    fragment_tx: watch::Sender<Option<String>>,
}

impl<A: FlowApi> Dashboard<A> {
    pub fn new(api: A) -> Self {
        let (fragment_tx, _) = watch::channel(None);
        Self {
            api,
            agents: AgentCatalog::default(),
            protocols: ProtocolCatalog::default(),
            form: QueryForm::new(),
            fragment: None,
            chart: ChartOutput::Idle,
            generation: 0,
            fragment_tx,
        }
    }

    /// Load both catalogs concurrently, seed the default time window, and
    /// populate the form from any fragment already set.
    ///
    /// A failed catalog load is not an error: it leaves the empty catalog in
    /// place and autocomplete simply has no candidates.
    pub async fn bootstrap(&mut self) {
        let (agents, protocols) = tokio::join!(self.api.agents(), self.api.protocols());

        match agents {
            Ok(catalog) => self.agents = catalog,
            Err(e) => warn!(error = %e, "agent catalog unavailable"),
        }
        match protocols {
            Ok(catalog) => self.protocols = catalog,
            Err(e) => warn!(error = %e, "protocol catalog unavailable"),
        }

        self.seed_default_window();

        if let Some(fragment) = self.fragment.clone() {
            codec::decode(&fragment, &self.agents, &mut self.form);
        } else {
            self.form.refresh_interface_candidates(&self.agents);
        }
    }

    /// Pre-fill an empty time window with the last 15 minutes.
    fn seed_default_window(&mut self) {
        let now = chrono::Local::now().timestamp();
        if self.form.value(FieldKey::TimestampGt).is_none() {
            if let Some(display) = codec::display_from_epoch(now - DEFAULT_WINDOW_SECS) {
                self.form.set_value(FieldKey::TimestampGt, display);
            }
        }
        if self.form.value(FieldKey::TimestampLt).is_none() {
            if let Some(display) = codec::display_from_epoch(now) {
                self.form.set_value(FieldKey::TimestampLt, display);
            }
        }
    }

    /// Submit the form: encode it into a fragment, make that the current
    /// query, and render.
    pub async fn submit(&mut self) -> &ChartOutput {
        let fragment = codec::encode(&self.form);
        self.set_fragment(fragment).await
    }

    /// External navigation (hash change): adopt the fragment, sync the form,
    /// render. An empty fragment clears the query.
    pub async fn set_fragment(&mut self, fragment: impl Into<String>) -> &ChartOutput {
        let fragment = fragment.into();
        self.fragment = if fragment.is_empty() {
            None
        } else {
            Some(fragment)
        };
        // notify before the handlers run; both read the stored snapshot
        let _ = self.fragment_tx.send(self.fragment.clone());

        if let Some(fragment) = self.fragment.clone() {
            codec::decode(&fragment, &self.agents, &mut self.form);
        }
        self.render().await
    }

    /// Fetch and rebuild the chart for the current fragment.
    pub async fn render(&mut self) -> &ChartOutput {
        let ticket = self.begin_render();
        let response = match ticket.fragment() {
            None => None,
            Some(fragment) => Some(self.api.query(fragment).await),
        };
        self.finish_render(ticket, response);
        &self.chart
    }

    /// Start a render for the current fragment.
    pub fn begin_render(&mut self) -> RenderTicket {
        self.generation += 1;
        RenderTicket {
            generation: self.generation,
            fragment: self.fragment.clone(),
        }
    }

    /// Apply a completed fetch. Returns false when the ticket is stale (a
    /// newer render has started) and the response was discarded.
    pub fn finish_render(
        &mut self,
        ticket: RenderTicket,
        response: Option<Result<String, QueryError>>,
    ) -> bool {
        if ticket.generation != self.generation {
            debug!(
                stale = ticket.generation,
                current = self.generation,
                "discarding stale query response"
            );
            return false;
        }

        self.chart = match response {
            None => ChartOutput::Idle,
            Some(Err(e)) => ChartOutput::ErrorText(e.body),
            Some(Ok(body)) => match ChartTable::parse(&body) {
                Ok(None) => ChartOutput::NoData,
                Ok(Some(table)) => ChartOutput::Chart(ChartSpec::new(table)),
                Err(e) => ChartOutput::ErrorText(e.to_string()),
            },
        };
        true
    }

    /// Push the current chart state into a widget.
    pub fn present<W: ChartWidget>(&self, widget: &mut W) {
        self.chart.present(widget);
    }

    /// Subscribe to fragment changes (the durable, shareable query state).
    pub fn subscribe(&self) -> watch::Receiver<Option<String>> {
        self.fragment_tx.subscribe()
    }

    pub fn fragment(&self) -> Option<&str> {
        self.fragment.as_deref()
    }

    pub fn chart(&self) -> &ChartOutput {
        &self.chart
    }

    pub fn form(&self) -> &QueryForm {
        &self.form
    }

    pub fn form_mut(&mut self) -> &mut QueryForm {
        &mut self.form
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    pub fn agent_candidates(&self) -> Vec<String> {
        self.agents.agent_names()
    }

    pub fn protocol_candidates(&self) -> Vec<String> {
        self.protocols.protocol_names()
    }
}
