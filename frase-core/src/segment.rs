//! Sentence segmentation

use regex::Regex;

use crate::{error::Result, language::runtime::compile};

/// One delimiter-separated piece of a normalized book
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate {
    pub text: String,
    /// Book the candidate came from
    pub source: String,
    /// 1-based position within the book
    pub ordinal: usize,
}

/// Splits text on a delimiter pattern
///
/// Delimiters are discarded and abbreviations are not protected.
#[derive(Debug, Clone)]
pub struct Segmenter {
    delimiters: Regex,
}

impl Segmenter {
    pub fn new(delimiters: &str) -> Result<Self> {
        Ok(Self {
            delimiters: compile(delimiters)?,
        })
    }

    /// Trimmed, non-empty pieces in text order
    pub fn split<'a>(&'a self, text: &'a str) -> impl Iterator<Item = &'a str> + 'a {
        self.delimiters
            .split(text)
            .map(str::trim)
            .filter(|piece| !piece.is_empty())
    }

    pub fn segment(&self, source: &str, text: &str) -> Vec<Candidate> {
        self.split(text)
            .enumerate()
            .map(|(idx, piece)| Candidate {
                text: piece.to_string(),
                source: source.to_string(),
                ordinal: idx + 1,
            })
            .collect()
    }
}
