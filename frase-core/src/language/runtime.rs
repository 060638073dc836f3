//! Runtime rule set
//!
//! Bridges a parsed [`LanguageConfig`] and the stage components: every regex
//! is compiled once here and the components are shared by all documents.

use std::path::Path;

use regex::Regex;

use crate::{
    clean::Cleaner,
    error::{Error, Result},
    final_filter::FinalFilterRules,
    gate::ValidityGate,
    language::config::LanguageConfig,
    normalize::Normalizer,
    segment::Segmenter,
    words::WordCounter,
};

/// Compiled extraction rules for one language
#[derive(Debug, Clone)]
pub struct RuleSet {
    config: LanguageConfig,
    normalizer: Normalizer,
    segmenter: Segmenter,
    gate: ValidityGate,
    cleaner: Cleaner,
    final_rules: FinalFilterRules,
}

impl RuleSet {
    /// Validate the configuration and compile every stage
    pub fn from_config(config: LanguageConfig) -> Result<Self> {
        config.validate().map_err(Error::Configuration)?;

        let normalizer = Normalizer::from_config(&config.normalize)?;
        let segmenter = Segmenter::new(&config.segmentation.delimiters)?;
        let gate = ValidityGate::from_config(&config)?;
        let cleaner = Cleaner::from_config(&config.cleanup)?;
        let final_rules = FinalFilterRules::from_config(&config.final_filter)?;

        Ok(Self {
            config,
            normalizer,
            segmenter,
            gate,
            cleaner,
            final_rules,
        })
    }

    /// Parse and compile a TOML rule table
    pub fn from_toml_str(toml_str: &str) -> Result<Self> {
        let config: LanguageConfig = toml::from_str(toml_str)?;
        Self::from_config(config)
    }

    /// Load an external rule table from disk
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| Error::io(path, e))?;
        Self::from_toml_str(&content)
    }

    pub fn code(&self) -> &str {
        &self.config.metadata.code
    }

    pub fn name(&self) -> &str {
        &self.config.metadata.name
    }

    /// ISO 639-3 code the language classifier reports for this language
    pub fn detect_code(&self) -> &str {
        &self.config.metadata.detect_code
    }

    /// Whether undecodable books may be read as latin-1
    pub fn latin1_fallback(&self) -> bool {
        self.config.input.latin1_fallback
    }

    pub fn config(&self) -> &LanguageConfig {
        &self.config
    }

    pub fn normalizer(&self) -> &Normalizer {
        &self.normalizer
    }

    pub fn segmenter(&self) -> &Segmenter {
        &self.segmenter
    }

    pub fn gate(&self) -> &ValidityGate {
        &self.gate
    }

    pub fn cleaner(&self) -> &Cleaner {
        &self.cleaner
    }

    pub fn word_counter(&self) -> &WordCounter {
        self.gate.word_counter()
    }

    pub fn final_rules(&self) -> &FinalFilterRules {
        &self.final_rules
    }
}

/// Compile a pattern, reporting which one failed
pub(crate) fn compile(pattern: &str) -> Result<Regex> {
    Regex::new(pattern).map_err(|source| Error::Regex {
        pattern: pattern.to_string(),
        source,
    })
}

/// Compile a case-insensitive pattern anchored at the start of the text
pub(crate) fn compile_anchored(pattern: &str) -> Result<Regex> {
    Regex::new(&format!("(?i)^(?:{pattern})")).map_err(|source| Error::Regex {
        pattern: pattern.to_string(),
        source,
    })
}

/// Compile a case-insensitive pattern matched anywhere
pub(crate) fn compile_insensitive(pattern: &str) -> Result<Regex> {
    Regex::new(&format!("(?i){pattern}")).map_err(|source| Error::Regex {
        pattern: pattern.to_string(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::language::loader::embedded_config_source;

    #[test]
    fn test_from_toml_str_exposes_metadata() {
        let source = embedded_config_source("ca").unwrap();
        let rules = RuleSet::from_toml_str(source).unwrap();
        assert_eq!(rules.code(), "ca");
        assert_eq!(rules.name(), "Catalan");
        assert_eq!(rules.detect_code(), "cat");
        assert!(rules.latin1_fallback());
    }

    #[test]
    fn test_invalid_regex_is_reported() {
        let source = embedded_config_source("it")
            .unwrap()
            .replace(r"delimiters = '[.!?;…]+'", "delimiters = '[.!?'");
        match RuleSet::from_toml_str(&source) {
            Err(Error::Regex { pattern, .. }) => assert_eq!(pattern, "[.!?"),
            other => panic!("expected regex error, got {other:?}"),
        }
    }

    #[test]
    fn test_failed_validation_is_configuration_error() {
        let source = embedded_config_source("it")
            .unwrap()
            .replace("min_chars = 40", "min_chars = 4000");
        assert!(matches!(
            RuleSet::from_toml_str(&source),
            Err(Error::Configuration(_))
        ));
    }

    #[test]
    fn test_malformed_toml_is_toml_error() {
        assert!(matches!(
            RuleSet::from_toml_str("[metadata\ncode = "),
            Err(Error::Toml(_))
        ));
    }

    #[test]
    fn test_from_file_missing_path() {
        let err = RuleSet::from_file(Path::new("/nonexistent/rules.toml")).unwrap_err();
        assert!(matches!(err, Error::Io { .. }));
    }

    #[test]
    fn test_anchored_pattern_is_case_insensitive() {
        let re = compile_anchored(r"CAP[ÍI]TOL?\s+\d+").unwrap();
        assert!(re.is_match("Capítol 3 La tornada"));
        assert!(!re.is_match("Al capítol 3"));
    }
}
