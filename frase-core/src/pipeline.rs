//! Extraction pipeline
//!
//! Drives one book at a time through normalize → segment → gate → clean →
//! dedup, keeping the run-scoped [`DedupIndex`] and [`RunStats`].

use std::path::Path;
use std::sync::Arc;

use crate::{
    dedup::DedupIndex,
    document::RawDocument,
    error::Result,
    gate::RejectReason,
    language::RuleSet,
    segment::Candidate,
    stats::RunStats,
};

/// A cleaned, unique sentence ready for output
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AcceptedSentence {
    pub text: String,
    pub source: String,
    pub ordinal: usize,
}

/// A candidate that was dropped, with the first rule it failed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RejectionRecord {
    pub source: String,
    pub ordinal: usize,
    pub reason: RejectReason,
    pub text: String,
}

/// Everything the pipeline decided about one book
#[derive(Debug, Clone, Default)]
pub struct DocumentOutcome {
    pub source: String,
    pub candidates: usize,
    pub accepted: Vec<AcceptedSentence>,
    pub rejected: Vec<RejectionRecord>,
}

/// Single-threaded extraction run for one language
#[derive(Debug)]
pub struct Pipeline {
    rules: Arc<RuleSet>,
    index: DedupIndex,
    stats: RunStats,
}

impl Pipeline {
    pub fn new(rules: Arc<RuleSet>) -> Self {
        Self {
            rules,
            index: DedupIndex::new(),
            stats: RunStats::default(),
        }
    }

    pub fn rules(&self) -> &RuleSet {
        &self.rules
    }

    pub fn index(&self) -> &DedupIndex {
        &self.index
    }

    pub fn stats(&self) -> &RunStats {
        &self.stats
    }

    /// Start a fresh run with the same rules
    pub fn reset(&mut self) {
        self.index.clear();
        self.stats = RunStats::default();
    }

    /// Count a book that could not be read
    pub fn record_skipped(&mut self) {
        self.stats.record_skipped();
    }

    /// Treat sentences from an earlier run as already accepted
    pub fn seed<'a, I>(&mut self, lines: I) -> usize
    where
        I: IntoIterator<Item = &'a str>,
    {
        self.index.seed(lines)
    }

    pub fn seed_from_file(&mut self, path: &Path) -> Result<usize> {
        self.index.seed_from_file(path)
    }

    pub fn process_document(&mut self, document: &RawDocument) -> DocumentOutcome {
        self.process_text(&document.source, &document.text)
    }

    pub fn process_text(&mut self, source: &str, text: &str) -> DocumentOutcome {
        let normalized = self.rules.normalizer().normalize(text);
        let candidates = self.rules.segmenter().segment(source, &normalized);

        let mut outcome = DocumentOutcome {
            source: source.to_string(),
            candidates: candidates.len(),
            ..DocumentOutcome::default()
        };

        for candidate in candidates {
            match self.admit_candidate(&candidate) {
                Ok(text) => outcome.accepted.push(AcceptedSentence {
                    text,
                    source: candidate.source,
                    ordinal: candidate.ordinal,
                }),
                Err(reason) => outcome.rejected.push(RejectionRecord {
                    source: candidate.source,
                    ordinal: candidate.ordinal,
                    reason,
                    text: candidate.text,
                }),
            }
        }

        self.stats.record_document(&outcome);
        self.stats.unique_hashes = self.index.len();
        outcome
    }

    /// Gate, clean, recheck and admit one candidate
    fn admit_candidate(
        &mut self,
        candidate: &Candidate,
    ) -> std::result::Result<String, RejectReason> {
        let gate = self.rules.gate();
        gate.check(&candidate.text, &self.index)?;

        let cleaned = self.rules.cleaner().clean(&candidate.text);
        if cleaned.is_empty() {
            return Err(RejectReason::EmptyAfterCleanup);
        }
        gate.check_cleaned(&cleaned)?;
        if !self.index.admit(&cleaned) {
            return Err(RejectReason::Duplicate);
        }
        Ok(cleaned)
    }
}
