//! Schema alignment: reconcile an arbitrary input table with the exact
//! feature vector the classifier was trained on.
//!
//! Capture data varies in which columns it carries (one-hot categorical
//! columns depend on which categories appeared in that capture), so the
//! aligner repairs schema drift deterministically instead of rejecting
//! it: absent features are zero-filled, extra columns are dropped, and
//! the result has exactly the expected columns in the expected order.

use crate::error::PipelineError;
use crate::types::table::{AlignedTable, Column, RawTable};
use tracing::{debug, info};

/// Name prefixes marking one-hot categorical-indicator columns: protocol,
/// service, and connection-state encodings. These are always forced to
/// integer type.
pub const INDICATOR_PREFIXES: [&str; 3] = ["proto_", "service_", "state_"];

fn is_indicator(name: &str) -> bool {
    INDICATOR_PREFIXES.iter().any(|p| name.starts_with(p))
}

/// Reconciles a raw table against an expected feature list. Never fails
/// on schema mismatch; unparseable cells coerce to 0 by design (a lossy
/// default, load-bearing for the never-fail contract).
pub struct SchemaAligner;

impl SchemaAligner {
    pub fn new() -> Self {
        Self
    }

    /// Produce a table with exactly `expected` as its columns, in that
    /// order, every value numeric.
    pub fn align(
        &self,
        raw: &RawTable,
        expected: &[String],
    ) -> Result<AlignedTable, PipelineError> {
        let n_rows = raw.n_rows();

        let missing: Vec<&String> = expected
            .iter()
            .filter(|name| raw.column_index(name).is_none())
            .collect();
        info!(
            common = expected.len() - missing.len(),
            expected = expected.len(),
            "alignment: shared columns"
        );
        if !missing.is_empty() {
            info!(count = missing.len(), columns = ?missing, "alignment: missing columns zero-filled");
        }

        let mut data = Vec::with_capacity(expected.len());
        for name in expected {
            let column = match raw.column_index(name) {
                None => Column::Int(vec![0; n_rows]),
                Some(idx) => {
                    let cells = raw.column(idx);
                    if is_indicator(name) {
                        Column::Int(cells.iter().map(|c| parse_int_lossy(c)).collect())
                    } else {
                        coerce_numeric(name, &cells)
                    }
                }
            };
            data.push(column);
        }

        let aligned = AlignedTable::new(expected.to_vec(), data);

        // Construction above guarantees this; a mismatch here is a bug,
        // not a property of the input.
        if aligned.columns() != expected {
            return Err(PipelineError::AlignmentInvariantViolated {
                reason: format!(
                    "got {} columns, expected {}",
                    aligned.n_cols(),
                    expected.len()
                ),
            });
        }

        Ok(aligned)
    }
}

impl Default for SchemaAligner {
    fn default() -> Self {
        Self::new()
    }
}

/// Truncating/parsing conversion to integer. Unparseable cells become 0.
fn parse_int_lossy(cell: &str) -> i64 {
    let cell = cell.trim();
    if let Ok(i) = cell.parse::<i64>() {
        return i;
    }
    if let Ok(f) = cell.parse::<f64>() {
        return f as i64;
    }
    0
}

/// Coerce a non-indicator column to numeric storage.
///
/// Columns whose cells are already wholly integer-looking stay integers
/// and wholly float-looking columns stay floats, so aligning an already
/// aligned table changes nothing. Anything else is parsed best-effort to
/// float with unparseable cells becoming 0.0.
fn coerce_numeric(name: &str, cells: &[&str]) -> Column {
    let trimmed: Vec<&str> = cells.iter().map(|c| c.trim()).collect();

    if trimmed
        .iter()
        .all(|c| c.is_empty() || c.parse::<i64>().is_ok())
    {
        return Column::Int(
            trimmed
                .iter()
                .map(|c| c.parse::<i64>().unwrap_or(0))
                .collect(),
        );
    }

    let all_numeric = trimmed
        .iter()
        .all(|c| c.is_empty() || c.parse::<f64>().is_ok());
    if !all_numeric {
        debug!(column = %name, "textual column coerced to numeric, unparseable cells set to 0");
    }

    Column::Float(
        trimmed
            .iter()
            .map(|c| c.parse::<f64>().unwrap_or(0.0))
            .collect(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    fn raw(headers: &[&str], rows: &[&[&str]]) -> RawTable {
        RawTable::new(
            names(headers),
            rows.iter()
                .map(|r| r.iter().map(|c| c.to_string()).collect())
                .collect(),
        )
    }

    #[test]
    fn test_missing_columns_zero_filled() {
        let expected = names(&["dur", "sbytes", "proto_tcp"]);
        let table = raw(&["dur"], &[&["0.5"], &["1.5"]]);

        let aligned = SchemaAligner::new().align(&table, &expected).unwrap();
        assert_eq!(aligned.columns(), expected.as_slice());
        assert_eq!(aligned.column("sbytes"), Some(&Column::Int(vec![0, 0])));
        assert_eq!(aligned.column("proto_tcp"), Some(&Column::Int(vec![0, 0])));
    }

    #[test]
    fn test_extra_columns_dropped() {
        let expected = names(&["dur"]);
        let table = raw(&["dur", "label", "attack_cat"], &[&["0.5", "1", "dos"]]);

        let aligned = SchemaAligner::new().align(&table, &expected).unwrap();
        assert_eq!(aligned.columns(), expected.as_slice());
        assert!(aligned.column("label").is_none());
    }

    #[test]
    fn test_column_order_follows_expected() {
        let expected = names(&["c", "a", "b"]);
        let table = raw(&["a", "b", "c"], &[&["1", "2", "3"]]);

        let aligned = SchemaAligner::new().align(&table, &expected).unwrap();
        assert_eq!(aligned.columns(), expected.as_slice());
        assert_eq!(aligned.row(0), vec![3.0, 1.0, 2.0]);
    }

    #[test]
    fn test_indicator_columns_forced_to_int() {
        let expected = names(&["proto_tcp", "service_http", "state_fin"]);
        let table = raw(
            &["proto_tcp", "service_http", "state_fin"],
            &[&["1.9", "true", "0"]],
        );

        let aligned = SchemaAligner::new().align(&table, &expected).unwrap();
        // Float truncates, garbage coerces to 0, integers pass through.
        assert_eq!(aligned.column("proto_tcp"), Some(&Column::Int(vec![1])));
        assert_eq!(aligned.column("service_http"), Some(&Column::Int(vec![0])));
        assert_eq!(aligned.column("state_fin"), Some(&Column::Int(vec![0])));
        assert!(aligned.column("proto_tcp").unwrap().is_int());
    }

    #[test]
    fn test_textual_column_parsed_best_effort() {
        let expected = names(&["sload"]);
        let table = raw(&["sload"], &[&["12.5"], &["garbage"], &[""]]);

        let aligned = SchemaAligner::new().align(&table, &expected).unwrap();
        assert_eq!(
            aligned.column("sload"),
            Some(&Column::Float(vec![12.5, 0.0, 0.0]))
        );
    }

    #[test]
    fn test_numeric_columns_left_as_is() {
        let expected = names(&["spkts", "rate"]);
        let table = raw(&["spkts", "rate"], &[&["4", "1.25"], &["7", "0.5"]]);

        let aligned = SchemaAligner::new().align(&table, &expected).unwrap();
        assert_eq!(aligned.column("spkts"), Some(&Column::Int(vec![4, 7])));
        assert_eq!(
            aligned.column("rate"),
            Some(&Column::Float(vec![1.25, 0.5]))
        );
    }

    #[test]
    fn test_alignment_is_idempotent() {
        let expected = names(&["dur", "proto_tcp", "sbytes"]);
        let table = raw(
            &["dur", "proto_tcp", "sbytes"],
            &[&["0.5", "1", "100"], &["1.5", "0", "200"]],
        );

        let aligner = SchemaAligner::new();
        let once = aligner.align(&table, &expected).unwrap();

        // Re-align the already-aligned content.
        let round_trip = RawTable::new(
            once.columns().to_vec(),
            (0..once.n_rows())
                .map(|i| {
                    expected
                        .iter()
                        .map(|name| match once.column(name).unwrap() {
                            Column::Int(v) => v[i].to_string(),
                            Column::Float(v) => v[i].to_string(),
                        })
                        .collect()
                })
                .collect(),
        );
        let twice = aligner.align(&round_trip, &expected).unwrap();

        assert_eq!(once.columns(), twice.columns());
        for name in &expected {
            assert_eq!(once.column(name), twice.column(name));
        }
    }

    #[test]
    fn test_partial_overlap_scenario() {
        // Expected [a, b, c]; input carries [b, d] with one row.
        let expected = names(&["a", "b", "c"]);
        let table = raw(&["b", "d"], &[&["3", "x"]]);

        let aligned = SchemaAligner::new().align(&table, &expected).unwrap();
        assert_eq!(aligned.columns(), expected.as_slice());
        assert_eq!(aligned.n_rows(), 1);
        assert_eq!(aligned.row(0), vec![0.0, 3.0, 0.0]);
        assert!(aligned.column("d").is_none());
    }

    #[test]
    fn test_zero_row_input() {
        let expected = names(&["a", "b"]);
        let table = raw(&["a"], &[]);

        let aligned = SchemaAligner::new().align(&table, &expected).unwrap();
        assert_eq!(aligned.n_rows(), 0);
        assert_eq!(aligned.columns(), expected.as_slice());
    }
}
