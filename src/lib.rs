//! Intrusion Detection Inference Pipeline Library
//!
//! Reconciles an arbitrary tabular dataset against the feature schema a
//! trained binary intrusion classifier expects, runs inference, and
//! packages per-row and aggregate outcomes into one structured report.

pub mod aligner;
pub mod config;
pub mod dataset;
pub mod error;
pub mod models;
pub mod pipeline;
pub mod types;

pub use aligner::SchemaAligner;
pub use config::AppConfig;
pub use error::PipelineError;
pub use models::{ArtifactLoader, Classifier, ClassifierArtifact};
pub use pipeline::Pipeline;
pub use types::{AlignedTable, AnalysisReport, RawTable};
