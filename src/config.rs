//! Configuration management for the inference pipeline

use anyhow::{Context, Result};
use config::{Config, File};
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Main application configuration
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct AppConfig {
    pub model: ModelConfig,
    pub logging: LoggingConfig,
}

/// Classifier artifact configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ModelConfig {
    /// Artifact file, resolved relative to the executable's directory
    /// unless absolute. Deliberately not a command-line argument: the
    /// artifact ships with the installation.
    pub file: String,
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            file: "models/unsw_nb15_classifier.json".to_string(),
        }
    }
}

impl ModelConfig {
    /// Absolute location of the artifact. Relative names resolve against
    /// the executable's own directory, falling back to the working
    /// directory when the executable path is unavailable.
    pub fn artifact_path(&self) -> PathBuf {
        let file = Path::new(&self.file);
        if file.is_absolute() {
            return file.to_path_buf();
        }
        std::env::current_exe()
            .ok()
            .and_then(|exe| exe.parent().map(Path::to_path_buf))
            .map(|dir| dir.join(file))
            .unwrap_or_else(|| file.to_path_buf())
    }
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Default log level when RUST_LOG is unset (trace, debug, info,
    /// warn, error)
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

impl AppConfig {
    /// Load configuration from the shipped config file.
    pub fn load() -> Result<Self> {
        Self::load_from_path("config/config.toml")
    }

    /// Load configuration from a specific path.
    pub fn load_from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let config = Config::builder()
            .add_source(File::from(path.as_ref()))
            .build()
            .context("Failed to build configuration")?;

        config
            .try_deserialize()
            .context("Failed to deserialize configuration")
    }
}
