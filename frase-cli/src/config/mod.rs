//! Configuration module

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::CliError;

/// CLI configuration structure
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct CliConfig {
    /// Where pipeline outputs go
    #[serde(default)]
    pub paths: PathsConfig,

    /// Language identification pass
    #[serde(default)]
    pub language_check: LanguageCheckConfig,

    /// Progress and summary reporting
    #[serde(default)]
    pub report: ReportConfig,
}

/// Output locations
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct PathsConfig {
    /// Default directory for `run`
    pub out_dir: PathBuf,
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            out_dir: PathBuf::from("output"),
        }
    }
}

/// Language identification settings
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct LanguageCheckConfig {
    /// Classify only the first N lines; later lines pass unchecked
    pub sample_size: Option<usize>,

    /// Minimum classifier confidence, 0.0 to 1.0
    #[serde(default)]
    pub min_confidence: f64,
}

/// Reporting settings
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ReportConfig {
    /// Log a progress line every N lines
    pub progress_interval: usize,

    /// Sentence count the corpus is expected to reach
    pub target: usize,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            progress_interval: 1000,
            target: 12000,
        }
    }
}

impl CliConfig {
    /// Load from a TOML file, or defaults when no file is given
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let Some(path) = path else {
            return Ok(Self::default());
        };

        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        let config: CliConfig = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        if !(0.0..=1.0).contains(&self.language_check.min_confidence) {
            return Err(CliError::ConfigError(format!(
                "min_confidence must be between 0 and 1, got {}",
                self.language_check.min_confidence
            ))
            .into());
        }
        if self.report.progress_interval == 0 {
            return Err(
                CliError::ConfigError("progress_interval must be positive".to_string()).into(),
            );
        }
        Ok(())
    }
}
