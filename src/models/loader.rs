//! Classifier artifact loading

use crate::error::PipelineError;
use crate::models::classifier::{Classifier, ModelSpec};
use serde::Deserialize;
use std::fs;
use std::path::Path;
use std::time::Instant;
use tracing::info;

/// On-disk artifact layout: a JSON bundle of the trained model and the
/// ordered feature list it was trained on. Both parts are optional here
/// so their absence surfaces as a structural-validation error rather
/// than a parse error.
#[derive(Debug, Deserialize)]
struct ArtifactFile {
    #[serde(default)]
    model: Option<ModelSpec>,
    #[serde(default)]
    columns: Option<Vec<String>>,
}

/// Immutable bundle of a trained classifier and its expected feature
/// list. Read-only for the rest of the run.
pub struct ClassifierArtifact {
    classifier: Box<dyn Classifier>,
    feature_names: Vec<String>,
}

impl std::fmt::Debug for ClassifierArtifact {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClassifierArtifact")
            .field("classifier", &self.classifier.name())
            .field("feature_names", &self.feature_names)
            .finish()
    }
}

impl ClassifierArtifact {
    pub fn classifier(&self) -> &dyn Classifier {
        self.classifier.as_ref()
    }

    /// Ordered feature names the classifier expects as input columns.
    pub fn feature_names(&self) -> &[String] {
        &self.feature_names
    }
}

/// Loader for the serialized classifier bundle.
pub struct ArtifactLoader;

impl ArtifactLoader {
    /// Load and structurally validate the artifact at `path`.
    pub fn load(path: &Path) -> Result<ClassifierArtifact, PipelineError> {
        let started = Instant::now();
        info!(path = %path.display(), "loading classifier artifact");

        if !path.exists() {
            return Err(PipelineError::ArtifactNotFound {
                path: path.to_path_buf(),
            });
        }

        let text = fs::read_to_string(path).map_err(|e| PipelineError::ArtifactCorrupt {
            reason: format!("read failed: {e}"),
        })?;

        let raw: ArtifactFile =
            serde_json::from_str(&text).map_err(|e| PipelineError::ArtifactCorrupt {
                reason: format!("invalid JSON: {e}"),
            })?;

        let model = raw.model.ok_or_else(|| PipelineError::ArtifactCorrupt {
            reason: "bundle has no model".to_string(),
        })?;
        let feature_names = raw.columns.ok_or_else(|| PipelineError::ArtifactCorrupt {
            reason: "bundle has no feature-name sequence".to_string(),
        })?;

        let classifier = model.into_classifier();
        info!(
            model = classifier.name(),
            features = feature_names.len(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "classifier artifact loaded"
        );

        Ok(ClassifierArtifact {
            classifier,
            feature_names,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_artifact(dir: &tempfile::TempDir, content: &str) -> std::path::PathBuf {
        let path = dir.path().join("classifier.json");
        let mut file = fs::File::create(&path).unwrap();
        file.write_all(content.as_bytes()).unwrap();
        path
    }

    #[test]
    fn test_missing_artifact() {
        let dir = tempfile::tempdir().unwrap();
        let err = ArtifactLoader::load(&dir.path().join("absent.json")).unwrap_err();
        assert!(matches!(err, PipelineError::ArtifactNotFound { .. }));
    }

    #[test]
    fn test_invalid_json_is_corrupt() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_artifact(&dir, "not json at all");
        let err = ArtifactLoader::load(&path).unwrap_err();
        assert!(matches!(err, PipelineError::ArtifactCorrupt { .. }));
    }

    #[test]
    fn test_structurally_incomplete_bundle() {
        let dir = tempfile::tempdir().unwrap();

        let path = write_artifact(&dir, r#"{"columns": ["dur"]}"#);
        match ArtifactLoader::load(&path).unwrap_err() {
            PipelineError::ArtifactCorrupt { reason } => {
                assert!(reason.contains("model"));
            }
            other => panic!("unexpected error: {other:?}"),
        }

        let path = write_artifact(
            &dir,
            r#"{"model": {"type": "logistic", "weights": [0.1], "bias": 0.0}}"#,
        );
        match ArtifactLoader::load(&path).unwrap_err() {
            PipelineError::ArtifactCorrupt { reason } => {
                assert!(reason.contains("feature-name"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_well_formed_bundle() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_artifact(
            &dir,
            r#"{
                "model": {"type": "logistic", "weights": [0.5, -0.5], "bias": 0.1},
                "columns": ["dur", "proto_tcp"]
            }"#,
        );

        let artifact = ArtifactLoader::load(&path).unwrap();
        assert_eq!(artifact.feature_names(), ["dur", "proto_tcp"]);
        assert_eq!(artifact.classifier().name(), "logistic");
    }
}
