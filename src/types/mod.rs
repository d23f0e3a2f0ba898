//! Type definitions for the inference pipeline

pub mod report;
pub mod table;

pub use report::{AnalysisReport, ErrorCode, PredictionStats, ReportMetadata};
pub use table::{AlignedTable, Column, RawTable};
