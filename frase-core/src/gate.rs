//! Candidate validity gate

use std::collections::HashSet;
use std::fmt;

use regex::Regex;

use crate::{
    dedup::DedupIndex,
    error::Result,
    language::{runtime::compile, LanguageConfig, ScriptKind, StartRule},
    script,
    words::WordCounter,
};

/// Why a candidate was not accepted
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum RejectReason {
    TooShort,
    TooLong,
    HasDigits,
    BadChars,
    InvalidStart,
    WordCount,
    Duplicate,
    EmptyAfterCleanup,
}

impl RejectReason {
    pub const ALL: [RejectReason; 8] = [
        RejectReason::TooShort,
        RejectReason::TooLong,
        RejectReason::HasDigits,
        RejectReason::BadChars,
        RejectReason::InvalidStart,
        RejectReason::WordCount,
        RejectReason::Duplicate,
        RejectReason::EmptyAfterCleanup,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            RejectReason::TooShort => "too_short",
            RejectReason::TooLong => "too_long",
            RejectReason::HasDigits => "has_digits",
            RejectReason::BadChars => "bad_chars",
            RejectReason::InvalidStart => "invalid_start",
            RejectReason::WordCount => "word_count",
            RejectReason::Duplicate => "duplicate",
            RejectReason::EmptyAfterCleanup => "empty_after_cleanup",
        }
    }
}

impl fmt::Display for RejectReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Letters of the script plus a set of extra characters
#[derive(Debug, Clone)]
struct AllowedChars {
    script: ScriptKind,
    extra: HashSet<char>,
}

impl AllowedChars {
    fn allows(&self, ch: char) -> bool {
        let letter = match self.script {
            ScriptKind::Latin => script::is_latin_letter(ch),
            ScriptKind::Japanese => script::is_japanese_or_latin(ch),
        };
        // Underscores survive until the cleaner strips italics markers
        letter
            || ch.is_numeric()
            || ch == '_'
            || ch.is_whitespace()
            || self.extra.contains(&ch)
    }
}

/// Applies the per-language validity rules to a raw candidate
#[derive(Debug, Clone)]
pub struct ValidityGate {
    min_chars: usize,
    max_chars: usize,
    min_words: usize,
    max_words: usize,
    digits: Regex,
    allowed: Option<AllowedChars>,
    start: StartRule,
    counter: WordCounter,
}

impl ValidityGate {
    pub fn from_config(config: &LanguageConfig) -> Result<Self> {
        let limits = &config.limits;
        let allowed = config.characters.allowed.as_ref().map(|extra| AllowedChars {
            script: config.characters.script,
            extra: extra.chars().collect(),
        });

        Ok(Self {
            min_chars: limits.min_chars,
            max_chars: limits.max_chars,
            min_words: limits.min_words,
            max_words: limits.max_words,
            digits: compile(&limits.digit_pattern)?,
            allowed,
            start: config.characters.start,
            counter: WordCounter::from_config(&config.words),
        })
    }

    /// Check a candidate, including whether it was already accepted
    ///
    /// Rules run in a fixed order and the first failure is reported.
    pub fn check(&self, text: &str, index: &DedupIndex) -> std::result::Result<(), RejectReason> {
        self.check_content(text)?;
        if index.contains(text) {
            return Err(RejectReason::Duplicate);
        }
        Ok(())
    }

    /// Every rule except the duplicate check
    pub fn check_content(&self, text: &str) -> std::result::Result<(), RejectReason> {
        self.check_length_and_digits(text)?;
        if let Some(allowed) = &self.allowed {
            if !text.chars().all(|ch| allowed.allows(ch)) {
                return Err(RejectReason::BadChars);
            }
        }
        if self.start == StartRule::JapaneseOrLatin
            && !text.chars().next().is_some_and(script::is_japanese_or_latin)
        {
            return Err(RejectReason::InvalidStart);
        }
        if !self.words_in_bounds(self.counter.count(text)) {
            return Err(RejectReason::WordCount);
        }
        Ok(())
    }

    /// Recheck a sentence after cleanup
    ///
    /// Cleanup removes quotes, brackets and markup and appends a terminal
    /// mark, so length and word count can move out of bounds. The character
    /// and start rules are skipped: cleanup only removes characters or adds
    /// punctuation.
    pub fn check_cleaned(&self, text: &str) -> std::result::Result<(), RejectReason> {
        self.check_length_and_digits(text)?;
        if !self.words_in_bounds(self.counter.count(text)) {
            return Err(RejectReason::WordCount);
        }
        Ok(())
    }

    fn check_length_and_digits(&self, text: &str) -> std::result::Result<(), RejectReason> {
        let chars = text.chars().count();
        if chars < self.min_chars {
            return Err(RejectReason::TooShort);
        }
        if chars > self.max_chars {
            return Err(RejectReason::TooLong);
        }
        if self.digits.is_match(text) {
            return Err(RejectReason::HasDigits);
        }
        Ok(())
    }

    /// Inclusive length bounds in chars
    pub fn char_bounds(&self) -> (usize, usize) {
        (self.min_chars, self.max_chars)
    }

    pub fn words_in_bounds(&self, count: usize) -> bool {
        (self.min_words..=self.max_words).contains(&count)
    }

    pub fn word_count(&self, text: &str) -> usize {
        self.counter.count(text)
    }

    pub fn word_counter(&self) -> &WordCounter {
        &self.counter
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::language::get_rules;

    fn catalan() -> ValidityGate {
        get_rules("ca").unwrap().gate().clone()
    }

    #[test]
    fn test_accepts_plain_sentence() {
        let gate = catalan();
        let text = "Era un dia molt fred i la pluja no parava de caure sobre la ciutat";
        assert_eq!(gate.check(text, &DedupIndex::new()), Ok(()));
    }

    #[test]
    fn test_length_bounds() {
        let gate = catalan();
        assert_eq!(gate.check_content("Capítol 3"), Err(RejectReason::TooShort));
        let long = "paraula ".repeat(60);
        assert_eq!(gate.check_content(long.trim()), Err(RejectReason::TooLong));
    }

    #[test]
    fn test_length_is_counted_in_chars() {
        let gate = catalan();
        // 39 chars, 45 bytes
        let text = "àààààà àààààà àààààà àààààà àààààà àààà";
        assert_eq!(text.chars().count(), 39);
        assert_eq!(gate.check_content(text), Err(RejectReason::TooShort));
    }

    #[test]
    fn test_digits_rejected() {
        let gate = catalan();
        assert_eq!(
            gate.check_content("El 15 de març de 2024 vam anar a Barcelona"),
            Err(RejectReason::HasDigits)
        );
    }

    #[test]
    fn test_foreign_characters_rejected() {
        let gate = catalan();
        assert_eq!(
            gate.check_content("Va dir que la paraula москва no volia dir res de res"),
            Err(RejectReason::BadChars)
        );
        assert_eq!(
            gate.check_content("El preu era massa alt per a tothom = res de res"),
            Err(RejectReason::BadChars)
        );
    }

    #[test]
    fn test_italics_markers_allowed() {
        let gate = catalan();
        assert_eq!(
            gate.check_content("Llegia _Tirant lo Blanc_ cada tarda mentre plovia sense parar"),
            Ok(())
        );
    }

    #[test]
    fn test_word_count_bounds() {
        let gate = catalan();
        assert_eq!(
            gate.check_content("i la de el que per amb els les una uns unes"),
            Err(RejectReason::WordCount)
        );
    }

    #[test]
    fn test_duplicate_is_checked_last() {
        let gate = catalan();
        let text = "Era un dia molt fred i la pluja no parava de caure sobre la ciutat";
        let mut index = DedupIndex::new();
        index.admit(text);
        assert_eq!(gate.check(text, &index), Err(RejectReason::Duplicate));
        // Content rules take precedence over the duplicate check
        index.admit("Capítol 3");
        assert_eq!(gate.check("Capítol 3", &index), Err(RejectReason::TooShort));
    }

    #[test]
    fn test_japanese_start_rule() {
        let gate = get_rules("ja").unwrap().gate().clone();
        let text = "、東京の古い町並みを歩きながら私たちは昔の思い出や友人の話をゆっくりと語り合った";
        assert_eq!(gate.check_content(text), Err(RejectReason::InvalidStart));
    }

    #[test]
    fn test_japanese_fullwidth_digits_rejected() {
        let gate = get_rules("ja").unwrap().gate().clone();
        let text = "東京の古い町並みを３人で歩きながら私たちは昔の思い出や友人の話をゆっくりと語り合った";
        assert_eq!(gate.check_content(text), Err(RejectReason::HasDigits));
    }

    #[test]
    fn test_cleaned_text_rechecks_length_and_digits() {
        let gate = get_rules("ja").unwrap().gate().clone();
        // Quotes removed by cleanup leave 33 chars, below the minimum of 35
        let cleaned = "東京の古い町並みを歩く私達は昔の思い出や友人の話を静かに長く語る。";
        assert_eq!(gate.char_bounds(), (35, 50));
        assert_eq!(gate.check_cleaned(cleaned), Err(RejectReason::TooShort));

        let catalan = catalan();
        assert_eq!(
            catalan.check_cleaned("Era un dia molt fred i la pluja no parava de caure sobre la ciutat."),
            Ok(())
        );
        assert_eq!(
            catalan.check_cleaned("Era el dia 3 i la pluja no parava de caure sobre la ciutat."),
            Err(RejectReason::HasDigits)
        );
    }

    #[test]
    fn test_labels_are_unique() {
        let labels: HashSet<_> = RejectReason::ALL.iter().map(|r| r.label()).collect();
        assert_eq!(labels.len(), RejectReason::ALL.len());
    }
}
