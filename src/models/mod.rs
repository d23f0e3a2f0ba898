//! Classifier models and artifact loading

pub mod classifier;
pub mod loader;

pub use classifier::{Classifier, GradientBoostedModel, LogisticModel, ModelSpec};
pub use loader::{ArtifactLoader, ClassifierArtifact};
