//! CSV dataset loading

use crate::error::PipelineError;
use crate::types::table::RawTable;
use std::fs::File;
use std::path::Path;
use tracing::{debug, info};

/// Read a delimited text dataset into a [`RawTable`].
///
/// The first row is the header naming each column. Cells stay textual;
/// the schema aligner owns all numeric interpretation.
pub fn load_csv(path: &Path) -> Result<RawTable, PipelineError> {
    info!(path = %path.display(), "loading input dataset");

    let file = File::open(path).map_err(|e| PipelineError::DatasetUnreadable {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;

    let mut reader = csv::Reader::from_reader(file);

    let headers: Vec<String> = reader
        .headers()
        .map_err(|e| PipelineError::DatasetUnreadable {
            path: path.to_path_buf(),
            reason: format!("header row: {e}"),
        })?
        .iter()
        .map(str::to_string)
        .collect();

    let mut rows = Vec::new();
    for (i, record) in reader.records().enumerate() {
        let record = record.map_err(|e| PipelineError::DatasetUnreadable {
            path: path.to_path_buf(),
            // +2: one for the header, one for 1-based line numbering
            reason: format!("row {}: {e}", i + 2),
        })?;
        rows.push(record.iter().map(str::to_string).collect());
    }

    let table = RawTable::new(headers, rows);
    info!(
        rows = table.n_rows(),
        cols = table.n_cols(),
        "raw dataset loaded"
    );
    debug!(columns = ?table.headers, "provided columns");

    Ok(table)
}
