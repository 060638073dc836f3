//! Configuration structures and validation
//!
//! This module defines the TOML schema for per-language extraction rules.

use serde::{Deserialize, Serialize};

/// Root language configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LanguageConfig {
    pub metadata: Metadata,
    #[serde(default)]
    pub input: InputConfig,
    #[serde(default)]
    pub normalize: NormalizeConfig,
    pub segmentation: SegmentationConfig,
    pub limits: LimitsConfig,
    pub characters: CharactersConfig,
    #[serde(default)]
    pub words: WordsConfig,
    #[serde(default)]
    pub cleanup: CleanupConfig,
    #[serde(default)]
    pub final_filter: FinalFilterConfig,
}

/// Language metadata
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Metadata {
    pub code: String,
    pub name: String,
    /// ISO 639-3 code reported by the language classifier
    pub detect_code: String,
}

/// How book files are decoded
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct InputConfig {
    #[serde(default)]
    pub latin1_fallback: bool,
}

/// Whole-document normalization
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NormalizeConfig {
    #[serde(default)]
    pub front_matter_markers: Vec<String>,
    #[serde(default)]
    pub truncate_markers: Vec<String>,
    #[serde(default)]
    pub strip_patterns: Vec<String>,
    #[serde(default)]
    pub replacements: Vec<Replacement>,
}

/// Literal text substitution
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Replacement {
    pub from: String,
    pub to: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SegmentationConfig {
    pub delimiters: String,
}

/// Validity gate bounds
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LimitsConfig {
    pub min_chars: usize,
    pub max_chars: usize,
    pub min_words: usize,
    pub max_words: usize,
    #[serde(default = "default_digit_pattern")]
    pub digit_pattern: String,
}

/// Character-set rules
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CharactersConfig {
    pub script: ScriptKind,
    /// Extra non-letter characters; `None` disables the allowed-set rule
    #[serde(default)]
    pub allowed: Option<String>,
    #[serde(default)]
    pub start: StartRule,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScriptKind {
    Latin,
    Japanese,
}

/// Required class of the first character
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StartRule {
    #[default]
    Any,
    JapaneseOrLatin,
}

/// Word counting rules
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WordsConfig {
    #[serde(default)]
    pub counter: CounterKind,
    #[serde(default = "default_min_word_length")]
    pub min_word_length: usize,
    #[serde(default)]
    pub function_words: Vec<String>,
    #[serde(default)]
    pub short_but_meaningful: Vec<String>,
}

impl Default for WordsConfig {
    fn default() -> Self {
        Self {
            counter: CounterKind::default(),
            min_word_length: default_min_word_length(),
            function_words: Vec::new(),
            short_but_meaningful: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CounterKind {
    #[default]
    FunctionWords,
    PseudoTokens,
}

/// Regex rewrite applied by the cleaner
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RewriteRule {
    pub pattern: String,
    pub replacement: String,
}

/// Sentence cleaner rules
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CleanupConfig {
    pub chapter_markers: Vec<String>,
    pub glued_words: Vec<RewriteRule>,
    pub artifacts: Vec<RewriteRule>,
    pub strip_italics: bool,
    pub quote_chars: String,
    pub strip_brackets: bool,
    pub symbol_blacklist: String,
    pub dialogue_dashes: String,
    pub collapse_ellipsis: bool,
    pub fix_punctuation_spacing: bool,
    pub capitalize: bool,
    pub terminal_marks: String,
    pub default_terminal: char,
    pub min_tokens: usize,
}

impl Default for CleanupConfig {
    fn default() -> Self {
        Self {
            chapter_markers: Vec::new(),
            glued_words: Vec::new(),
            artifacts: Vec::new(),
            strip_italics: false,
            quote_chars: String::new(),
            strip_brackets: true,
            symbol_blacklist: String::new(),
            dialogue_dashes: String::new(),
            collapse_ellipsis: true,
            fix_punctuation_spacing: false,
            capitalize: false,
            terminal_marks: ".!?".to_string(),
            default_terminal: '.',
            min_tokens: 0,
        }
    }
}

/// Post-cleanup filter rules
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FinalFilterConfig {
    pub word_bounds: Option<[usize; 2]>,
    pub max_caps_words: Option<usize>,
    pub caps_min_len: usize,
    pub chapter_pattern: Option<String>,
    pub date_pattern: Option<String>,
    pub reject_html: bool,
    pub reject_urls: bool,
    pub reject_latin: bool,
    pub flag_digits: bool,
    pub terminal_marks: String,
    pub default_terminal: char,
}

impl Default for FinalFilterConfig {
    fn default() -> Self {
        Self {
            word_bounds: None,
            max_caps_words: None,
            caps_min_len: 2,
            chapter_pattern: None,
            date_pattern: None,
            reject_html: true,
            reject_urls: true,
            reject_latin: false,
            flag_digits: false,
            terminal_marks: ".!?".to_string(),
            default_terminal: '.',
        }
    }
}

fn default_digit_pattern() -> String {
    r"\d".to_string()
}

fn default_min_word_length() -> usize {
    5
}

impl LanguageConfig {
    /// Validate configuration
    pub(crate) fn validate(&self) -> Result<(), String> {
        if self.metadata.code.trim().is_empty() {
            return Err("Language code must not be empty".to_string());
        }

        if self.segmentation.delimiters.is_empty() {
            return Err("No sentence delimiters defined".to_string());
        }

        let limits = &self.limits;
        if limits.min_chars > limits.max_chars {
            return Err(format!(
                "min_chars ({}) exceeds max_chars ({})",
                limits.min_chars, limits.max_chars
            ));
        }
        if limits.min_words > limits.max_words {
            return Err(format!(
                "min_words ({}) exceeds max_words ({})",
                limits.min_words, limits.max_words
            ));
        }

        // The cleaner and the final filter must recognize their own terminal
        if !self
            .cleanup
            .terminal_marks
            .contains(self.cleanup.default_terminal)
        {
            return Err(format!(
                "cleanup.default_terminal '{}' is not one of the terminal marks",
                self.cleanup.default_terminal
            ));
        }
        if !self
            .final_filter
            .terminal_marks
            .contains(self.final_filter.default_terminal)
        {
            return Err(format!(
                "final_filter.default_terminal '{}' is not one of the terminal marks",
                self.final_filter.default_terminal
            ));
        }

        if let Some([min, max]) = self.final_filter.word_bounds {
            if min > max {
                return Err(format!("final_filter.word_bounds [{min}, {max}] is empty"));
            }
        }

        if self.final_filter.caps_min_len == 0 {
            return Err("final_filter.caps_min_len must be at least 1".to_string());
        }

        Ok(())
    }
}
