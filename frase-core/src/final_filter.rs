//! Post-cleanup filter
//!
//! A second pass over a finished sentence file. Each line is checked against
//! the final rules in a fixed order; kept lines may be flagged (digits) or
//! repaired (missing terminal punctuation).

use std::collections::HashSet;
use std::fmt;
use std::sync::LazyLock;

use regex::Regex;

use crate::{
    error::Result,
    language::{
        runtime::{compile, compile_insensitive},
        FinalFilterConfig, RuleSet,
    },
};

static HTML: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"<[^>]+>|&[a-z]+;").unwrap());
static URL_OR_EMAIL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"https?://|www\.|\S+@\S+\.\S+").unwrap());
static LETTER_RUN: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\p{L}+").unwrap());
static LATIN_LETTER: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[A-Za-z]").unwrap());
static DIGIT: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\d").unwrap());

/// Why a line was dropped by the final filter
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum FilterReason {
    TooFewWords,
    TooManyWords,
    ExcessCaps,
    Html,
    ChapterMarker,
    Date,
    UrlEmail,
    LatinScript,
    Repeat,
}

impl FilterReason {
    pub fn label(&self) -> &'static str {
        match self {
            FilterReason::TooFewWords => "TOO FEW WORDS",
            FilterReason::TooManyWords => "TOO MANY WORDS",
            FilterReason::ExcessCaps => "EXCESS CAPS",
            FilterReason::Html => "HTML",
            FilterReason::ChapterMarker => "CHAPTER MARKER",
            FilterReason::Date => "DATE",
            FilterReason::UrlEmail => "URL/EMAIL",
            FilterReason::LatinScript => "LATIN SCRIPT",
            FilterReason::Repeat => "REPEAT",
        }
    }
}

impl fmt::Display for FilterReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Notes attached to a kept line
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum FilterFlag {
    Digits,
    PeriodAdded,
}

impl FilterFlag {
    pub fn label(&self) -> &'static str {
        match self {
            FilterFlag::Digits => "DIGITS",
            FilterFlag::PeriodAdded => "PERIOD ADDED",
        }
    }
}

impl fmt::Display for FilterFlag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FilterOutcome {
    Accepted { text: String, flags: Vec<FilterFlag> },
    Rejected(FilterReason),
}

/// Compiled final-filter rules, shared by every run
#[derive(Debug, Clone)]
pub struct FinalFilterRules {
    word_bounds: Option<(usize, usize)>,
    max_caps_words: Option<usize>,
    caps: Regex,
    chapter: Option<Regex>,
    date: Option<Regex>,
    reject_html: bool,
    reject_urls: bool,
    reject_latin: bool,
    flag_digits: bool,
    terminal_marks: Vec<char>,
    default_terminal: char,
}

impl FinalFilterRules {
    pub fn from_config(config: &FinalFilterConfig) -> Result<Self> {
        Ok(Self {
            word_bounds: config.word_bounds.map(|[min, max]| (min, max)),
            max_caps_words: config.max_caps_words,
            caps: compile(&format!(
                r"\b\p{{Lu}}{{{},}}\b",
                config.caps_min_len
            ))?,
            chapter: config
                .chapter_pattern
                .as_deref()
                .map(compile_insensitive)
                .transpose()?,
            date: config
                .date_pattern
                .as_deref()
                .map(compile_insensitive)
                .transpose()?,
            reject_html: config.reject_html,
            reject_urls: config.reject_urls,
            reject_latin: config.reject_latin,
            flag_digits: config.flag_digits,
            terminal_marks: config.terminal_marks.chars().collect(),
            default_terminal: config.default_terminal,
        })
    }
}

/// Stateful final filter; remembers lines it has kept
#[derive(Debug, Clone)]
pub struct FinalFilter {
    rules: FinalFilterRules,
    seen: HashSet<String>,
}

impl FinalFilter {
    pub fn new(rules: &RuleSet) -> Self {
        Self::with_rules(rules.final_rules().clone())
    }

    pub fn with_rules(rules: FinalFilterRules) -> Self {
        Self {
            rules,
            seen: HashSet::new(),
        }
    }

    /// Check one line
    ///
    /// Order: word bounds, capitals, markup, chapter marker, date, URL or
    /// e-mail, Latin script, digits flag, repeat, terminal punctuation.
    pub fn check(&mut self, line: &str) -> FilterOutcome {
        let line = line.trim();
        let rules = &self.rules;

        if let Some((min, max)) = rules.word_bounds {
            let words = LETTER_RUN.find_iter(line).count();
            if words < min {
                return FilterOutcome::Rejected(FilterReason::TooFewWords);
            }
            if words > max {
                return FilterOutcome::Rejected(FilterReason::TooManyWords);
            }
        }

        if let Some(max) = rules.max_caps_words {
            if rules.caps.find_iter(line).count() > max {
                return FilterOutcome::Rejected(FilterReason::ExcessCaps);
            }
        }

        if rules.reject_html && HTML.is_match(line) {
            return FilterOutcome::Rejected(FilterReason::Html);
        }
        if rules.chapter.as_ref().is_some_and(|re| re.is_match(line)) {
            return FilterOutcome::Rejected(FilterReason::ChapterMarker);
        }
        if rules.date.as_ref().is_some_and(|re| re.is_match(line)) {
            return FilterOutcome::Rejected(FilterReason::Date);
        }
        if rules.reject_urls && URL_OR_EMAIL.is_match(line) {
            return FilterOutcome::Rejected(FilterReason::UrlEmail);
        }
        if rules.reject_latin && LATIN_LETTER.is_match(line) {
            return FilterOutcome::Rejected(FilterReason::LatinScript);
        }

        let mut flags = Vec::new();
        if rules.flag_digits && DIGIT.is_match(line) {
            flags.push(FilterFlag::Digits);
        }

        if !self.seen.insert(repeat_key(line)) {
            return FilterOutcome::Rejected(FilterReason::Repeat);
        }

        let mut text = line.to_string();
        if !text.ends_with(|c: char| rules.terminal_marks.contains(&c)) {
            text.push(rules.default_terminal);
            flags.push(FilterFlag::PeriodAdded);
        }

        FilterOutcome::Accepted { text, flags }
    }
}

/// Lowercased with edge punctuation removed
fn repeat_key(line: &str) -> String {
    line.to_lowercase()
        .trim_matches(|c: char| ".,;!?¿¡".contains(c))
        .to_string()
}

/// Format one audit log line, shortening long text
pub fn log_line(line_no: usize, label: &str, text: &str) -> String {
    format!("{line_no}: {label}: {}", truncate_for_log(text, 100))
}

pub fn truncate_for_log(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => format!("{}...", &text[..idx]),
        None => text.to_string(),
    }
}
