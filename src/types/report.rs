//! The structured analysis report printed to stdout

use crate::error::PipelineError;
use serde::{Deserialize, Serialize};

/// Machine-readable error code carried by the error report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// Wrong invocation arity; reported before the pipeline runs.
    InvalidArgs,
    /// Any failure while loading, aligning, or inferring.
    ProcessingError,
}

/// Aggregate prediction statistics.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictionStats {
    pub total: usize,
    pub normal: usize,
    pub attack: usize,
    pub attack_percentage: f64,
}

impl PredictionStats {
    /// Aggregate a label vector (0 = benign, 1 = anomalous).
    ///
    /// `attack_percentage` is defined as 0.0 for an empty vector.
    pub fn from_labels(labels: &[u8]) -> Self {
        let total = labels.len();
        let attack = labels.iter().filter(|&&l| l == 1).count();
        let normal = total - attack;
        let attack_percentage = if total == 0 {
            0.0
        } else {
            100.0 * attack as f64 / total as f64
        };

        Self {
            total,
            normal,
            attack,
            attack_percentage,
        }
    }
}

/// Run metadata attached to a successful report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportMetadata {
    /// Column list of the aligned table, in classifier order.
    pub input_columns: Vec<String>,
    pub processed_rows: usize,
    /// Elapsed wall clock, formatted as e.g. "0.42s".
    pub processing_time: String,
}

/// The single JSON document every invocation emits, success or not.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum AnalysisReport {
    Success {
        predictions: Vec<u8>,
        stats: PredictionStats,
        metadata: ReportMetadata,
    },
    Error {
        message: String,
        code: ErrorCode,
        #[serde(skip_serializing_if = "Option::is_none")]
        details: Option<String>,
    },
}

impl AnalysisReport {
    /// Report for a malformed command line. No diagnostic trace: the
    /// pipeline never started.
    pub fn invalid_args(message: impl Into<String>) -> Self {
        AnalysisReport::Error {
            message: message.into(),
            code: ErrorCode::InvalidArgs,
            details: None,
        }
    }

    /// Report for a failure inside the pipeline, with the typed error's
    /// debug rendering as the diagnostic trace.
    pub fn processing_error(err: &PipelineError) -> Self {
        AnalysisReport::Error {
            message: err.to_string(),
            code: ErrorCode::ProcessingError,
            details: Some(format!("{err:?}")),
        }
    }

    pub fn is_error(&self) -> bool {
        matches!(self, AnalysisReport::Error { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stats_aggregation() {
        let stats = PredictionStats::from_labels(&[0, 1, 1, 0, 1]);
        assert_eq!(stats.total, 5);
        assert_eq!(stats.normal, 2);
        assert_eq!(stats.attack, 3);
        assert!((stats.attack_percentage - 60.0).abs() < 1e-9);
    }

    #[test]
    fn test_stats_empty_labels() {
        let stats = PredictionStats::from_labels(&[]);
        assert_eq!(stats.total, 0);
        assert_eq!(stats.normal, 0);
        assert_eq!(stats.attack, 0);
        assert_eq!(stats.attack_percentage, 0.0);
    }

    #[test]
    fn test_success_report_shape() {
        let report = AnalysisReport::Success {
            predictions: vec![0, 1],
            stats: PredictionStats::from_labels(&[0, 1]),
            metadata: ReportMetadata {
                input_columns: vec!["dur".to_string()],
                processed_rows: 2,
                processing_time: "0.01s".to_string(),
            },
        };

        let json = serde_json::to_string(&report).unwrap();
        assert!(json.contains("\"status\":\"success\""));
        assert!(json.contains("\"predictions\":[0,1]"));
        assert!(json.contains("\"attack_percentage\":50.0"));

        let parsed: AnalysisReport = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, report);
    }

    #[test]
    fn test_error_report_codes() {
        let json =
            serde_json::to_string(&AnalysisReport::invalid_args("usage")).unwrap();
        assert!(json.contains("\"status\":\"error\""));
        assert!(json.contains("\"code\":\"INVALID_ARGS\""));
        // No details on invocation errors.
        assert!(!json.contains("details"));

        let err = PipelineError::ArtifactCorrupt {
            reason: "missing columns".to_string(),
        };
        let json = serde_json::to_string(&AnalysisReport::processing_error(&err)).unwrap();
        assert!(json.contains("\"code\":\"PROCESSING_ERROR\""));
        assert!(json.contains("details"));
    }

    #[test]
    fn test_is_error() {
        assert!(AnalysisReport::invalid_args("usage").is_error());
        let report = AnalysisReport::Success {
            predictions: Vec::new(),
            stats: PredictionStats::from_labels(&[]),
            metadata: ReportMetadata {
                input_columns: Vec::new(),
                processed_rows: 0,
                processing_time: "0.00s".to_string(),
            },
        };
        assert!(!report.is_error());
    }
}
