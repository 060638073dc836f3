//! Meaningful-word counting

use std::collections::HashSet;
use std::sync::LazyLock;

use regex::Regex;

use crate::{
    language::{CounterKind, WordsConfig},
    script,
};

static WORD: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\w+").unwrap());

/// Counts the words that carry meaning in a candidate sentence
#[derive(Debug, Clone)]
pub enum WordCounter {
    /// Latin-script tokens that are not function words and are long enough
    FunctionWords {
        function_words: HashSet<String>,
        short_but_meaningful: HashSet<String>,
        min_word_length: usize,
    },
    /// Kanji, katakana and alphabetic runs
    PseudoTokens,
}

impl WordCounter {
    pub fn from_config(config: &WordsConfig) -> Self {
        match config.counter {
            CounterKind::FunctionWords => WordCounter::FunctionWords {
                function_words: config
                    .function_words
                    .iter()
                    .map(|w| w.to_lowercase())
                    .collect(),
                short_but_meaningful: config
                    .short_but_meaningful
                    .iter()
                    .map(|w| w.to_lowercase())
                    .collect(),
                min_word_length: config.min_word_length,
            },
            CounterKind::PseudoTokens => WordCounter::PseudoTokens,
        }
    }

    pub fn count(&self, text: &str) -> usize {
        match self {
            WordCounter::FunctionWords {
                function_words,
                short_but_meaningful,
                min_word_length,
            } => WORD
                .find_iter(text)
                .map(|m| m.as_str().to_lowercase())
                .filter(|word| {
                    !function_words.contains(word)
                        && (word.chars().count() >= *min_word_length
                            || short_but_meaningful.contains(word))
                })
                .count(),
            WordCounter::PseudoTokens => script::count_content_tokens(text),
        }
    }
}
