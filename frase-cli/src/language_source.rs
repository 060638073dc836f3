//! Language source management for CLI

use anyhow::{Context, Result};
use frase_core::{get_rules, RuleSet};
use std::path::PathBuf;
use std::sync::Arc;

/// Source of language rules
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LanguageSource {
    /// Embedded configuration, by code or name
    BuiltIn(String),
    /// External configuration file
    External(PathBuf),
}

impl LanguageSource {
    /// An external file wins over the built-in language
    pub fn from_args(language: &str, language_config: Option<&PathBuf>) -> Self {
        match language_config {
            Some(path) => LanguageSource::External(path.clone()),
            None => LanguageSource::BuiltIn(language.to_string()),
        }
    }

    pub fn load(&self) -> Result<Arc<RuleSet>> {
        match self {
            LanguageSource::BuiltIn(language) => Ok(get_rules(language)?),
            LanguageSource::External(path) => {
                let rules = RuleSet::from_file(path).with_context(|| {
                    format!("Failed to load language config: {}", path.display())
                })?;
                Ok(Arc::new(rules))
            }
        }
    }

    /// Get the display name for the language source
    pub fn display_name(&self) -> String {
        match self {
            LanguageSource::BuiltIn(language) => format!("Built-in: {language}"),
            LanguageSource::External(path) => format!("External: {}", path.display()),
        }
    }
}
