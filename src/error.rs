//! Role: The few hard failures in the pipeline.
//!
//! Everything else degrades to a visible UI state (no data, diagnostic text)
//! rather than an error value; see `chart::view::ChartOutput`.

use thiserror::Error;

/// A query response body that could not be turned into a chart table.
#[derive(Debug, Error)]
pub enum ChartError {
    #[error("row {row} has {got} columns, header has {expected}")]
    RaggedRow {
        row: usize,
        expected: usize,
        got: usize,
    },

    #[error("row {row}, column {col}: {value:?} is not an integer magnitude")]
    BadMagnitude {
        row: usize,
        col: usize,
        value: String,
    },

    #[error("malformed response body: {0}")]
    Csv(#[from] csv::Error),
}

/// Transport or server failure on the query endpoint.
///
/// Carries the raw error payload; the renderer surfaces it verbatim as
/// diagnostic text instead of modelling it further.
#[derive(Debug, Error)]
#[error("{body}")]
pub struct QueryError {
    pub body: String,
}

impl QueryError {
    pub fn new(body: impl Into<String>) -> Self {
        Self { body: body.into() }
    }
}
