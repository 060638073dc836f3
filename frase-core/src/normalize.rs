//! Whole-document normalization

use std::sync::LazyLock;

use regex::Regex;

use crate::{
    error::Result,
    language::{config::NormalizeConfig, runtime::compile},
};

static DIGIT_ONLY_LINE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^[\d \t\r.,;:!?]+$").unwrap());
static PARENTHESIZED: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\([^)]*\)").unwrap());
static BRACKETED: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\[[^\]]*\]").unwrap());
static WHITESPACE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").unwrap());

/// Turns a raw book into one clean line of text
#[derive(Debug, Clone)]
pub struct Normalizer {
    front_matter: Vec<Regex>,
    truncate: Vec<Regex>,
    strip: Vec<Regex>,
    replacements: Vec<(String, String)>,
}

impl Normalizer {
    pub fn from_config(config: &NormalizeConfig) -> Result<Self> {
        let compile_all = |patterns: &[String]| -> Result<Vec<Regex>> {
            patterns.iter().map(|p| compile(p)).collect()
        };

        Ok(Self {
            front_matter: compile_all(&config.front_matter_markers)?,
            truncate: compile_all(&config.truncate_markers)?,
            strip: compile_all(&config.strip_patterns)?,
            replacements: config
                .replacements
                .iter()
                .map(|r| (r.from.clone(), r.to.clone()))
                .collect(),
        })
    }

    /// Normalize a book
    ///
    /// Order: front matter cut, truncation, stripped patterns, literal
    /// replacements, number-only lines, parenthesized and bracketed spans,
    /// whitespace collapse.
    pub fn normalize(&self, text: &str) -> String {
        let mut text = text;

        // First marker that matches wins
        if let Some(start) = self
            .front_matter
            .iter()
            .find_map(|re| re.find(text).map(|m| m.start()))
        {
            text = &text[start..];
        }

        let end = self
            .truncate
            .iter()
            .filter_map(|re| re.find(text).map(|m| m.start()))
            .min()
            .unwrap_or(text.len());
        let mut text = text[..end].to_string();

        for re in &self.strip {
            text = re.replace_all(&text, "").into_owned();
        }
        for (from, to) in &self.replacements {
            text = text.replace(from.as_str(), to);
        }

        let text = DIGIT_ONLY_LINE.replace_all(&text, "");
        let text = PARENTHESIZED.replace_all(&text, "");
        let text = BRACKETED.replace_all(&text, "");
        WHITESPACE.replace_all(text.trim(), " ").into_owned()
    }
}
