//! Failure taxonomy for the inference pipeline

use std::path::PathBuf;
use thiserror::Error;

/// Typed failures raised by the pipeline components.
///
/// The orchestrator in [`crate::pipeline`] is the single boundary that
/// converts these into the error variant of the output report; nothing
/// below that boundary prints or exits.
#[derive(Debug, Error)]
pub enum PipelineError {
    /// The serialized classifier bundle is not on disk.
    #[error("classifier artifact not found: {path}")]
    ArtifactNotFound { path: PathBuf },

    /// The artifact exists but does not decode into a usable bundle.
    #[error("classifier artifact is corrupt: {reason}")]
    ArtifactCorrupt { reason: String },

    /// The input dataset is missing or not parseable as delimited text.
    #[error("cannot read dataset {path}: {reason}")]
    DatasetUnreadable { path: PathBuf, reason: String },

    /// Post-alignment column check failed. This signals a bug in the
    /// aligner, not bad user input.
    #[error("aligned columns diverge from the expected schema: {reason}")]
    AlignmentInvariantViolated { reason: String },

    /// The classifier rejected the aligned table.
    #[error("inference failed: {reason}")]
    Inference { reason: String },
}
