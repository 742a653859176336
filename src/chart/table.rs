//! Role: Turn the query endpoint's delimited-text body into a typed grid.
//!
//! Row 0 holds column headers (first header = time-axis label, the rest are
//! series labels); every following row is one time bucket with integer
//! magnitudes per series. Rows that do not match the header width, or cells
//! that are not integers, fail the whole parse. Quoted fields are honored.

use crate::error::ChartError;

/// One time bucket: the axis value plus one magnitude per series.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChartRow {
    pub bucket: String,
    pub values: Vec<i64>,
}

/// The rectangular grid handed to the chart widget.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChartTable {
    /// Header row: time-axis label followed by series labels.
    pub headers: Vec<String>,
    pub rows: Vec<ChartRow>,
}

impl ChartTable {
    /// Parse a comma-delimited response body.
    ///
    /// Returns `Ok(None)` for an empty or whitespace-only body, which is the
    /// normal "no data" state.
    pub fn parse(body: &str) -> Result<Option<ChartTable>, ChartError> {
        let body = body.trim();
        if body.is_empty() {
            return Ok(None);
        }

        // flexible so ragged rows reach our own width check and get a
        // precise error instead of csv's generic one
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .from_reader(body.as_bytes());

        let mut records = Vec::new();
        for record in reader.records() {
            records.push(record?);
        }
        let Some(header_record) = records.first() else {
            return Ok(None);
        };

        let headers: Vec<String> = header_record.iter().map(|s| s.to_string()).collect();
        let width = headers.len();

        let mut rows = Vec::with_capacity(records.len() - 1);
        for (i, record) in records.iter().enumerate().skip(1) {
            if record.len() != width {
                return Err(ChartError::RaggedRow {
                    row: i,
                    expected: width,
                    got: record.len(),
                });
            }

            let mut cells = record.iter();
            // column 0 stays a string, it is the time/category axis
            let bucket = cells.next().unwrap_or_default().to_string();
            let mut values = Vec::with_capacity(width - 1);
            for (j, cell) in cells.enumerate() {
                let value =
                    cell.trim()
                        .parse::<i64>()
                        .map_err(|_| ChartError::BadMagnitude {
                            row: i,
                            col: j + 1,
                            value: cell.to_string(),
                        })?;
                values.push(value);
            }
            rows.push(ChartRow { bucket, values });
        }

        Ok(Some(ChartTable { headers, rows }))
    }

    /// Number of value series (columns minus the axis column).
    pub fn series_count(&self) -> usize {
        self.headers.len().saturating_sub(1)
    }

    /// Total row count including the header row.
    pub fn row_count(&self) -> usize {
        self.rows.len() + 1
    }
}
