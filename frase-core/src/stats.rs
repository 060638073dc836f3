//! Run statistics and their text reports

use std::collections::BTreeMap;
use std::fmt::Write;

use crate::{
    final_filter::{FilterFlag, FilterOutcome, FilterReason},
    gate::RejectReason,
    langid::Verdict,
    pipeline::DocumentOutcome,
};

/// Counters for an extraction run
#[derive(Debug, Clone, Default)]
pub struct RunStats {
    pub books_processed: usize,
    pub books_skipped: usize,
    pub candidates: usize,
    pub accepted: usize,
    pub rejected: BTreeMap<RejectReason, usize>,
    /// Accepted sentences per book, in processing order
    pub by_book: Vec<(String, usize)>,
    pub unique_hashes: usize,
}

impl RunStats {
    pub fn record_document(&mut self, outcome: &DocumentOutcome) {
        self.books_processed += 1;
        self.candidates += outcome.candidates;
        self.accepted += outcome.accepted.len();
        for record in &outcome.rejected {
            *self.rejected.entry(record.reason).or_default() += 1;
        }
        self.by_book
            .push((outcome.source.clone(), outcome.accepted.len()));
    }

    pub fn record_skipped(&mut self) {
        self.books_skipped += 1;
    }

    pub fn rejected_total(&self) -> usize {
        self.rejected.values().sum()
    }

    pub fn acceptance_rate(&self) -> f64 {
        if self.candidates == 0 {
            return 0.0;
        }
        self.accepted as f64 / self.candidates as f64 * 100.0
    }

    pub fn render(&self, language: &str) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "{language} extraction statistics");
        let _ = writeln!(out, "==============================");
        let _ = writeln!(out, "Books processed: {}", self.books_processed);
        let _ = writeln!(out, "Books skipped: {}", self.books_skipped);
        let _ = writeln!(out, "Candidates: {}", self.candidates);
        let _ = writeln!(
            out,
            "Accepted: {} ({:.1}%)",
            self.accepted,
            self.acceptance_rate()
        );
        let _ = writeln!(out, "Unique hashes: {}", self.unique_hashes);
        let _ = writeln!(out);
        let _ = writeln!(out, "Rejections: {}", self.rejected_total());
        for reason in RejectReason::ALL {
            let count = self.rejected.get(&reason).copied().unwrap_or(0);
            let _ = writeln!(out, "  {}: {count}", reason.label());
        }
        if !self.by_book.is_empty() {
            let _ = writeln!(out);
            let _ = writeln!(out, "Sentences per book:");
            for (book, count) in &self.by_book {
                let _ = writeln!(out, "  {book}: {count}");
            }
        }
        out
    }
}

/// Counters for a final-filter pass
#[derive(Debug, Clone, Default)]
pub struct FilterStats {
    pub processed: usize,
    pub accepted: usize,
    pub rejected: BTreeMap<FilterReason, usize>,
    pub flagged: BTreeMap<FilterFlag, usize>,
}

impl FilterStats {
    pub fn record(&mut self, outcome: &FilterOutcome) {
        self.processed += 1;
        match outcome {
            FilterOutcome::Accepted { flags, .. } => {
                self.accepted += 1;
                for flag in flags {
                    *self.flagged.entry(*flag).or_default() += 1;
                }
            }
            FilterOutcome::Rejected(reason) => {
                *self.rejected.entry(*reason).or_default() += 1;
            }
        }
    }

    pub fn render(&self) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "Lines processed: {}", self.processed);
        let _ = writeln!(out, "Lines kept: {}", self.accepted);
        for (reason, count) in &self.rejected {
            let _ = writeln!(out, "  {}: {count}", reason.label());
        }
        for (flag, count) in &self.flagged {
            let _ = writeln!(out, "  flagged {}: {count}", flag.label());
        }
        out
    }
}

/// Counters for a language-identification pass
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LanguageStats {
    pub kept: usize,
    pub rejected: usize,
    pub unknown: usize,
    pub unchecked: usize,
}

impl LanguageStats {
    pub fn record(&mut self, verdict: &Verdict) {
        match verdict {
            Verdict::Kept => self.kept += 1,
            Verdict::Rejected { .. } => self.rejected += 1,
            Verdict::Unknown => self.unknown += 1,
            Verdict::Unchecked => self.unchecked += 1,
        }
    }

    pub fn total(&self) -> usize {
        self.kept + self.rejected + self.unknown + self.unchecked
    }

    pub fn render(&self) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "Lines checked: {}", self.total() - self.unchecked);
        let _ = writeln!(out, "Kept: {}", self.kept);
        let _ = writeln!(out, "Other language: {}", self.rejected);
        let _ = writeln!(out, "Unknown: {}", self.unknown);
        let _ = writeln!(out, "Passed unchecked: {}", self.unchecked);
        out
    }
}
