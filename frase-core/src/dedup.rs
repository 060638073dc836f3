//! Content-hash deduplication

use std::collections::HashSet;
use std::path::Path;

use sha2::{Digest, Sha256};

use crate::error::{Error, Result};

/// SHA-256 of a sentence's canonical form
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ContentHash([u8; 32]);

impl ContentHash {
    pub fn of(text: &str) -> Self {
        ContentHash(Sha256::digest(canonical_form(text).as_bytes()).into())
    }
}

/// Lowercased, whitespace runs collapsed, trimmed
pub fn canonical_form(text: &str) -> String {
    text.split_whitespace()
        .map(str::to_lowercase)
        .collect::<Vec<_>>()
        .join(" ")
}

/// Run-scoped set of accepted sentence hashes
#[derive(Debug, Clone, Default)]
pub struct DedupIndex {
    seen: HashSet<ContentHash>,
}

impl DedupIndex {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, text: &str) -> bool {
        self.seen.contains(&ContentHash::of(text))
    }

    /// Record a sentence; false when it was already seen
    pub fn admit(&mut self, text: &str) -> bool {
        self.seen.insert(ContentHash::of(text))
    }

    pub fn len(&self) -> usize {
        self.seen.len()
    }

    pub fn is_empty(&self) -> bool {
        self.seen.is_empty()
    }

    pub fn clear(&mut self) {
        self.seen.clear();
    }

    /// Admit previously written sentences, skipping blank lines
    ///
    /// Returns how many new hashes were added.
    pub fn seed<'a, I>(&mut self, lines: I) -> usize
    where
        I: IntoIterator<Item = &'a str>,
    {
        lines
            .into_iter()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .filter(|line| self.admit(line))
            .count()
    }

    /// Seed from an existing output file; a missing file seeds nothing
    pub fn seed_from_file(&mut self, path: &Path) -> Result<usize> {
        match std::fs::read_to_string(path) {
            Ok(content) => Ok(self.seed(content.lines())),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(0),
            Err(e) => Err(Error::io(path, e)),
        }
    }
}

/// Duplicate summary of a sentence file
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DuplicateReport {
    pub total: usize,
    pub unique: usize,
    /// 1-based line numbers of repeated lines
    pub duplicate_lines: Vec<usize>,
}

impl DuplicateReport {
    pub fn duplicates(&self) -> usize {
        self.total - self.unique
    }

    pub fn uniqueness_percent(&self) -> f64 {
        if self.total == 0 {
            return 100.0;
        }
        self.unique as f64 / self.total as f64 * 100.0
    }
}

/// Count exact (canonical) repeats among non-blank lines
pub fn duplicate_report<'a, I>(lines: I) -> DuplicateReport
where
    I: IntoIterator<Item = &'a str>,
{
    let mut index = DedupIndex::new();
    let mut report = DuplicateReport::default();

    for (idx, line) in lines.into_iter().enumerate() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        report.total += 1;
        if index.admit(line) {
            report.unique += 1;
        } else {
            report.duplicate_lines.push(idx + 1);
        }
    }
    report
}

/// Keep the first occurrence of every non-blank line, in order
pub fn remove_duplicates<'a, I>(lines: I) -> Vec<String>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut index = DedupIndex::new();
    lines
        .into_iter()
        .map(str::trim)
        .filter(|line| !line.is_empty() && index.admit(line))
        .map(str::to_string)
        .collect()
}
