//! Language identification filter

use thiserror::Error;

use crate::language::RuleSet;

/// Why a classifier produced no language
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ClassifyError {
    #[error("text is empty")]
    Empty,
    #[error("language could not be determined")]
    Undetermined,
}

/// Anything that can name the language of a line
pub trait LanguageClassifier {
    /// ISO 639-3 code of the detected language
    fn detect(&self, text: &str) -> Result<String, ClassifyError>;
}

/// Trigram classifier backed by `whatlang`
#[derive(Debug, Clone, Copy, Default)]
pub struct WhatlangClassifier {
    min_confidence: f64,
}

impl WhatlangClassifier {
    pub fn new(min_confidence: f64) -> Self {
        Self { min_confidence }
    }
}

impl LanguageClassifier for WhatlangClassifier {
    fn detect(&self, text: &str) -> Result<String, ClassifyError> {
        if text.trim().is_empty() {
            return Err(ClassifyError::Empty);
        }
        let info = whatlang::detect(text).ok_or(ClassifyError::Undetermined)?;
        if info.confidence() < self.min_confidence {
            return Err(ClassifyError::Undetermined);
        }
        Ok(info.lang().code().to_string())
    }
}

/// Outcome of the language check for one line
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Verdict {
    Kept,
    Rejected { code: String },
    /// The classifier gave no answer; the line is dropped
    Unknown,
    /// Beyond the sample window; kept without checking
    Unchecked,
}

impl Verdict {
    pub fn is_kept(&self) -> bool {
        matches!(self, Verdict::Kept | Verdict::Unchecked)
    }
}

/// Keeps lines the classifier attributes to the target language
#[derive(Debug, Clone)]
pub struct LanguageFilter {
    target: String,
    sample_size: Option<usize>,
}

impl LanguageFilter {
    /// `sample_size` limits how many lines are classified; later lines pass
    pub fn new(target: impl Into<String>, sample_size: Option<usize>) -> Self {
        Self {
            target: target.into(),
            sample_size,
        }
    }

    pub fn for_rules(rules: &RuleSet, sample_size: Option<usize>) -> Self {
        Self::new(rules.detect_code(), sample_size)
    }

    pub fn target(&self) -> &str {
        &self.target
    }

    /// Check the line at 0-based `position` among the lines being filtered
    pub fn check<C>(&self, classifier: &C, position: usize, line: &str) -> Verdict
    where
        C: LanguageClassifier + ?Sized,
    {
        if self.sample_size.is_some_and(|n| position >= n) {
            return Verdict::Unchecked;
        }
        match classifier.detect(line) {
            Ok(code) if code == self.target => Verdict::Kept,
            Ok(code) => Verdict::Rejected { code },
            Err(_) => Verdict::Unknown,
        }
    }
}

/// Audit log line for a dropped line; `None` for kept lines
pub fn log_line(line_no: usize, verdict: &Verdict, text: &str) -> Option<String> {
    match verdict {
        Verdict::Rejected { code } => Some(format!("{line_no}: [{code}] {text}")),
        Verdict::Unknown => Some(format!("{line_no}: [UNKNOWN] {text}")),
        Verdict::Kept | Verdict::Unchecked => None,
    }
}
