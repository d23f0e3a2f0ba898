//! Trained binary classifiers deserialized from the artifact bundle.
//!
//! The pipeline depends only on the [`Classifier`] trait: given a table
//! with the exact expected columns, return one label per row, order
//! preserving. Concrete model internals stay behind that boundary.

use crate::error::PipelineError;
use crate::types::table::AlignedTable;
use serde::Deserialize;

/// Label for a benign row.
pub const LABEL_NORMAL: u8 = 0;
/// Label for an anomalous row.
pub const LABEL_ATTACK: u8 = 1;

/// Opaque prediction capability of a trained binary model.
pub trait Classifier: Send + Sync {
    /// Short identifier for logging.
    fn name(&self) -> &str;

    /// One label (0 = benign, 1 = anomalous) per row of `table`, in row
    /// order.
    fn predict(&self, table: &AlignedTable) -> Result<Vec<u8>, PipelineError>;
}

/// Tagged model description as stored in the artifact's `model` object.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ModelSpec {
    Logistic(LogisticModel),
    GradientBoosted(GradientBoostedModel),
}

impl ModelSpec {
    pub fn into_classifier(self) -> Box<dyn Classifier> {
        match self {
            ModelSpec::Logistic(model) => Box::new(model),
            ModelSpec::GradientBoosted(model) => Box::new(model),
        }
    }
}

fn default_threshold() -> f64 {
    0.5
}

/// Numerically stable logistic sigmoid.
fn sigmoid(z: f64) -> f64 {
    if z >= 0.0 {
        1.0 / (1.0 + (-z).exp())
    } else {
        let ez = z.exp();
        ez / (1.0 + ez)
    }
}

/// Logistic regression over the aligned feature vector.
#[derive(Debug, Clone, Deserialize)]
pub struct LogisticModel {
    /// One weight per expected feature, in feature order.
    pub weights: Vec<f64>,
    pub bias: f64,
    /// Decision threshold: score >= threshold labels the row anomalous.
    #[serde(default = "default_threshold")]
    pub threshold: f64,
}

impl Classifier for LogisticModel {
    fn name(&self) -> &str {
        "logistic"
    }

    fn predict(&self, table: &AlignedTable) -> Result<Vec<u8>, PipelineError> {
        if self.weights.len() != table.n_cols() {
            return Err(PipelineError::Inference {
                reason: format!(
                    "model expects {} features, table has {}",
                    self.weights.len(),
                    table.n_cols()
                ),
            });
        }

        let mut labels = Vec::with_capacity(table.n_rows());
        for i in 0..table.n_rows() {
            let row = table.row(i);
            let z: f64 = self
                .weights
                .iter()
                .zip(row.iter())
                .map(|(w, x)| w * x)
                .sum::<f64>()
                + self.bias;
            let label = if sigmoid(z) >= self.threshold {
                LABEL_ATTACK
            } else {
                LABEL_NORMAL
            };
            labels.push(label);
        }
        Ok(labels)
    }
}

/// One node of a flattened decision tree.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum TreeNode {
    Split {
        /// Index into the aligned feature vector.
        feature: usize,
        /// Row goes left when `value < threshold`, right otherwise.
        threshold: f64,
        left: usize,
        right: usize,
    },
    Leaf {
        value: f64,
    },
}

/// A flattened binary decision tree; node 0 is the root.
#[derive(Debug, Clone, Deserialize)]
pub struct Tree {
    pub nodes: Vec<TreeNode>,
}

impl Tree {
    /// Margin contribution of this tree for one feature row.
    fn output(&self, row: &[f64]) -> Result<f64, PipelineError> {
        let mut idx = 0;
        // A well-formed tree reaches a leaf in fewer steps than it has
        // nodes; the bound turns a malformed cyclic tree into an error.
        for _ in 0..=self.nodes.len() {
            match self.nodes.get(idx) {
                Some(TreeNode::Leaf { value }) => return Ok(*value),
                Some(TreeNode::Split {
                    feature,
                    threshold,
                    left,
                    right,
                }) => {
                    let value = row.get(*feature).ok_or_else(|| PipelineError::Inference {
                        reason: format!(
                            "tree references feature {} but row has {}",
                            feature,
                            row.len()
                        ),
                    })?;
                    idx = if *value < *threshold { *left } else { *right };
                }
                None => {
                    return Err(PipelineError::Inference {
                        reason: format!("tree child index {idx} out of range"),
                    })
                }
            }
        }
        Err(PipelineError::Inference {
            reason: "tree traversal did not reach a leaf".to_string(),
        })
    }
}

/// Gradient-boosted tree ensemble: sigmoid of the summed tree margins,
/// thresholded into a binary label.
#[derive(Debug, Clone, Deserialize)]
pub struct GradientBoostedModel {
    pub trees: Vec<Tree>,
    #[serde(default)]
    pub base_score: f64,
    #[serde(default = "default_threshold")]
    pub threshold: f64,
}

impl Classifier for GradientBoostedModel {
    fn name(&self) -> &str {
        "gradient_boosted"
    }

    fn predict(&self, table: &AlignedTable) -> Result<Vec<u8>, PipelineError> {
        let mut labels = Vec::with_capacity(table.n_rows());
        for i in 0..table.n_rows() {
            let row = table.row(i);
            let mut margin = self.base_score;
            for tree in &self.trees {
                margin += tree.output(&row)?;
            }
            let label = if sigmoid(margin) >= self.threshold {
                LABEL_ATTACK
            } else {
                LABEL_NORMAL
            };
            labels.push(label);
        }
        Ok(labels)
    }
}
