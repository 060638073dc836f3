//! Sentence admission pipeline for speech-synthesis corpora
//!
//! This crate turns raw book text into a clean, deduplicated list of
//! sentences suitable for recording prompts. One pipeline shape is shared by
//! every supported language; the per-language differences (delimiters,
//! thresholds, function words, cleanup patterns) live in TOML rule tables.
//!
//! # Pipeline
//!
//! - **Loader**: [`RawDocument`] reads a book, falling back to latin-1
//! - **Normalizer**: collapses whitespace and strips footnotes
//! - **Segmenter**: splits on language-specific sentence delimiters
//! - **Validity gate**: ordered predicates, first failure wins
//! - **Cleaner**: ordered rewrites producing the final surface form
//! - **Deduplicator**: content-hash index scoped to one run
//!
//! The [`FinalFilter`] and [`LanguageFilter`] passes run over already
//! accepted output.
//!
//! # Example
//!
//! ```rust
//! use frase_core::{get_rules, Pipeline, RawDocument};
//!
//! let rules = get_rules("ca").unwrap();
//! let mut pipeline = Pipeline::new(rules);
//!
//! let doc = RawDocument::from_text(
//!     "llibre.txt",
//!     "Era un dia molt fred i la pluja no parava de caure sobre la ciutat",
//! );
//! let outcome = pipeline.process_document(&doc);
//!
//! assert_eq!(outcome.accepted.len(), 1);
//! assert_eq!(
//!     outcome.accepted[0].text,
//!     "Era un dia molt fred i la pluja no parava de caure sobre la ciutat."
//! );
//! ```

pub mod clean;
pub mod dedup;
pub mod document;
pub mod error;
pub mod final_filter;
pub mod gate;
pub mod langid;
pub mod language;
pub mod normalize;
pub mod pipeline;
pub mod script;
pub mod segment;
pub mod stats;
pub mod words;

pub use clean::Cleaner;
pub use dedup::{duplicate_report, remove_duplicates, ContentHash, DedupIndex, DuplicateReport};
pub use document::{RawDocument, SourceEncoding};
pub use error::{Error, Result};
pub use final_filter::{FilterFlag, FilterOutcome, FilterReason, FinalFilter};
pub use gate::{RejectReason, ValidityGate};
pub use langid::{ClassifyError, LanguageClassifier, LanguageFilter, Verdict, WhatlangClassifier};
pub use language::{
    embedded_config_source, get_rules, list_available_languages, LanguageConfig, RuleSet,
};
pub use normalize::Normalizer;
pub use pipeline::{AcceptedSentence, DocumentOutcome, Pipeline, RejectionRecord};
pub use segment::{Candidate, Segmenter};
pub use stats::{FilterStats, LanguageStats, RunStats};
pub use words::WordCounter;
