//! The inference orchestrator: one forward pass from dataset path to
//! structured report, with a single error boundary.

use crate::aligner::SchemaAligner;
use crate::config::AppConfig;
use crate::dataset;
use crate::error::PipelineError;
use crate::models::loader::ArtifactLoader;
use crate::types::report::{AnalysisReport, PredictionStats, ReportMetadata};
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing::{error, info};

/// Validate the invocation arity before any artifact or dataset work.
/// Exactly one positional argument — the dataset path — is accepted.
pub fn parse_invocation(args: &[String]) -> Result<PathBuf, AnalysisReport> {
    if args.len() != 2 {
        return Err(AnalysisReport::invalid_args(
            "Usage: ids-predict <dataset.csv>",
        ));
    }
    Ok(PathBuf::from(&args[1]))
}

/// Single-shot inference pipeline. [`Pipeline::run`] is the boundary
/// that converts every internal failure into the error report shape; it
/// never returns `Err` and always yields exactly one report.
pub struct Pipeline {
    config: AppConfig,
    aligner: SchemaAligner,
}

impl Pipeline {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            config: config.clone(),
            aligner: SchemaAligner::new(),
        }
    }

    /// Analyze one dataset: load artifact, read table, align, predict,
    /// aggregate.
    pub fn run(&self, dataset_path: &Path) -> AnalysisReport {
        let started = Instant::now();
        info!(dataset = %dataset_path.display(), "starting analysis");

        match self.analyze(dataset_path, started) {
            Ok(report) => report,
            Err(err) => {
                error!(error = %err, "analysis failed");
                AnalysisReport::processing_error(&err)
            }
        }
    }

    fn analyze(
        &self,
        dataset_path: &Path,
        started: Instant,
    ) -> Result<AnalysisReport, PipelineError> {
        let artifact = ArtifactLoader::load(&self.config.model.artifact_path())?;
        let raw = dataset::load_csv(dataset_path)?;
        let aligned = self.aligner.align(&raw, artifact.feature_names())?;

        info!(
            model = artifact.classifier().name(),
            rows = aligned.n_rows(),
            "running predictions"
        );
        let predictions = artifact.classifier().predict(&aligned)?;

        let stats = PredictionStats::from_labels(&predictions);
        let metadata = ReportMetadata {
            input_columns: aligned.columns().to_vec(),
            processed_rows: aligned.n_rows(),
            processing_time: format!("{:.2}s", started.elapsed().as_secs_f64()),
        };

        info!(
            total = stats.total,
            normal = stats.normal,
            attack = stats.attack,
            "analysis complete"
        );

        Ok(AnalysisReport::Success {
            predictions,
            stats,
            metadata,
        })
    }
}
