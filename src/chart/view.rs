//! Role: The chart-facing surface of the pipeline.
//!
//! The widget itself is an external collaborator; it only ever sees a
//! finished `ChartSpec` or a line of text. Display options are fixed, the
//! query is the only thing a user configures.

use crate::chart::table::ChartTable;

pub const NO_DATA_TEXT: &str = "No data found";

/// Fixed display options: stacked area, value axis floored at zero.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChartOptions {
    pub stacked: bool,
    pub title: String,
    pub time_axis_title: String,
    pub value_axis_min: i64,
}

impl Default for ChartOptions {
    fn default() -> Self {
        Self {
            stacked: true,
            title: "NetFlow bps of top flows".to_string(),
            time_axis_title: "Time".to_string(),
            value_axis_min: 0,
        }
    }
}

/// A drawable chart: the typed grid plus its fixed options.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChartSpec {
    pub table: ChartTable,
    pub options: ChartOptions,
}

impl ChartSpec {
    pub fn new(table: ChartTable) -> Self {
        Self {
            table,
            options: ChartOptions::default(),
        }
    }
}

/// What the chart area currently shows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChartOutput {
    /// No query yet (absent fragment).
    Idle,
    /// Query ran fine but matched nothing.
    NoData,
    /// Raw transport/server error payload or parse diagnostic, verbatim.
    ErrorText(String),
    Chart(ChartSpec),
}

impl ChartOutput {
    /// Push the current state into a widget.
    pub fn present<W: ChartWidget>(&self, widget: &mut W) {
        match self {
            ChartOutput::Idle => {}
            ChartOutput::NoData => widget.show_text(NO_DATA_TEXT),
            ChartOutput::ErrorText(text) => widget.show_text(text),
            ChartOutput::Chart(spec) => widget.draw(spec),
        }
    }
}

/// The narrow interface the chart widget is consumed through.
pub trait ChartWidget {
    fn draw(&mut self, spec: &ChartSpec);
    fn show_text(&mut self, text: &str);
}
