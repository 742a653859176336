use std::collections::BTreeMap;

use crate::catalog::AgentCatalog;
use crate::state::fields::{FieldKey, BREAKDOWN_DIMENSIONS};

/// One breakdown checkbox: an opaque dimension identifier plus its state.
#[derive(Debug, Clone)]
pub struct BreakdownBox {
    pub id: String,
    pub checked: bool,
}

/// In-memory model of the query-editing form.
///
/// Field values hold what the user sees (timestamps as local-time display
/// strings); the codec converts to and from the fragment representation.
/// A field is "filled" only when non-empty, so the map never stores empty
/// strings.
#[derive(Debug, Clone, Default)]
pub struct QueryForm {
    values: BTreeMap<FieldKey, String>,
    breakdown: Vec<BreakdownBox>,
    /// Interface-autocomplete candidates derived from the selected agent.
    pub interface_candidates: Vec<String>,
}

impl QueryForm {
    /// Form with the standard breakdown checkboxes in UI order.
    pub fn new() -> Self {
        Self::with_breakdown_boxes(BREAKDOWN_DIMENSIONS.iter().map(|s| s.to_string()))
    }

    /// Form with a custom checkbox set, in the given (DOM) order.
    pub fn with_breakdown_boxes(ids: impl IntoIterator<Item = String>) -> Self {
        Self {
            values: BTreeMap::new(),
            breakdown: ids
                .into_iter()
                .map(|id| BreakdownBox { id, checked: false })
                .collect(),
            interface_candidates: Vec::new(),
        }
    }

    pub fn value(&self, field: FieldKey) -> Option<&str> {
        self.values.get(&field).map(|s| s.as_str())
    }

    /// Set a field; an empty value clears it.
    pub fn set_value(&mut self, field: FieldKey, value: impl Into<String>) {
        let value = value.into();
        if value.is_empty() {
            self.values.remove(&field);
        } else {
            self.values.insert(field, value);
        }
    }

    pub fn clear_value(&mut self, field: FieldKey) {
        self.values.remove(&field);
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty() && !self.breakdown.iter().any(|b| b.checked)
    }

    pub fn breakdown_boxes(&self) -> &[BreakdownBox] {
        &self.breakdown
    }

    /// Checked breakdown identifiers in checkbox order.
    pub fn checked_breakdowns(&self) -> Vec<&str> {
        self.breakdown
            .iter()
            .filter(|b| b.checked)
            .map(|b| b.id.as_str())
            .collect()
    }

    /// Set one checkbox. Unknown identifiers are ignored, there is no
    /// checkbox to flip.
    pub fn set_checked(&mut self, id: &str, checked: bool) {
        if let Some(b) = self.breakdown.iter_mut().find(|b| b.id == id) {
            b.checked = checked;
        }
    }

    pub fn is_checked(&self, id: &str) -> bool {
        self.breakdown.iter().any(|b| b.id == id && b.checked)
    }

    /// Re-derive interface-autocomplete candidates from the selected agent.
    pub fn refresh_interface_candidates(&mut self, catalog: &AgentCatalog) {
        self.interface_candidates = match self.value(FieldKey::Agent) {
            Some(agent) => catalog.interfaces_for(agent),
            None => Vec::new(),
        };
    }
}
