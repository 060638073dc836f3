//! Sentence cleaning
//!
//! The cleaner rewrites a gated candidate into its final surface form. Steps
//! run in a fixed order; one step can expose work for an earlier one (a dash
//! hiding a chapter marker), so the pass repeats until the text stops
//! changing. Cleaning a cleaned sentence returns it unchanged.

use std::collections::HashSet;
use std::sync::LazyLock;

use regex::Regex;

use crate::{
    error::Result,
    language::{
        config::RewriteRule,
        runtime::{compile, compile_anchored},
        CleanupConfig,
    },
};

static ITALICS: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"_([^_]+)_").unwrap());
static PARENTHESIZED: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[(（][^)）]*[)）]").unwrap());
static BRACKETED: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\[[^\]]*\]").unwrap());
static WHITESPACE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").unwrap());
static DOT_RUN: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\.{2,}").unwrap());
static SPACE_BEFORE_PUNCT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+([,.!?;:])").unwrap());
static MISSING_SPACE_AFTER_PUNCT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"([,.!?;:])([^\s,.!?;:])").unwrap());

const MAX_PASSES: usize = 8;

/// Applies the per-language cleanup rules
#[derive(Debug, Clone)]
pub struct Cleaner {
    chapter_markers: Vec<Regex>,
    glued_words: Vec<(Regex, String)>,
    artifacts: Vec<(Regex, String)>,
    strip_italics: bool,
    quotes: HashSet<char>,
    strip_brackets: bool,
    symbols: HashSet<char>,
    dashes: Option<Regex>,
    collapse_ellipsis: bool,
    fix_punctuation_spacing: bool,
    capitalize: bool,
    terminal_marks: Vec<char>,
    default_terminal: char,
    min_tokens: usize,
}

impl Cleaner {
    pub fn from_config(config: &CleanupConfig) -> Result<Self> {
        let dashes = if config.dialogue_dashes.is_empty() {
            None
        } else {
            let alternatives: Vec<String> = config
                .dialogue_dashes
                .chars()
                .map(|ch| regex::escape(&ch.to_string()))
                .collect();
            Some(compile(&format!(r"\s*(?:{})\s*", alternatives.join("|")))?)
        };

        Ok(Self {
            chapter_markers: config
                .chapter_markers
                .iter()
                .map(|p| compile_anchored(p))
                .collect::<Result<_>>()?,
            glued_words: compile_rewrites(&config.glued_words)?,
            artifacts: compile_rewrites(&config.artifacts)?,
            strip_italics: config.strip_italics,
            quotes: config.quote_chars.chars().collect(),
            strip_brackets: config.strip_brackets,
            symbols: config.symbol_blacklist.chars().collect(),
            dashes,
            collapse_ellipsis: config.collapse_ellipsis,
            fix_punctuation_spacing: config.fix_punctuation_spacing,
            capitalize: config.capitalize,
            terminal_marks: config.terminal_marks.chars().collect(),
            default_terminal: config.default_terminal,
            min_tokens: config.min_tokens,
        })
    }

    /// Clean a sentence
    ///
    /// Returns an empty string when nothing usable is left.
    pub fn clean(&self, text: &str) -> String {
        let mut current = self.clean_pass(text);
        for _ in 0..MAX_PASSES {
            let next = self.clean_pass(&current);
            if next == current {
                break;
            }
            current = next;
        }
        current
    }

    fn clean_pass(&self, text: &str) -> String {
        let mut s = self.strip_markup(text.trim());
        s = self.strip_chapter_markers(s);

        for (re, replacement) in &self.glued_words {
            s = re.replace_all(&s, replacement.as_str()).into_owned();
        }

        if let Some(dashes) = &self.dashes {
            s = dashes.replace_all(&s, ", ").into_owned();
            s = s
                .trim_start_matches(|c: char| c == ',' || c.is_whitespace())
                .to_string();
        }

        for (re, replacement) in &self.artifacts {
            s = re.replace_all(&s, replacement.as_str()).into_owned();
        }

        if self.collapse_ellipsis {
            s = s.replace('…', ".");
        }

        s = WHITESPACE.replace_all(s.trim(), " ").into_owned();

        if self.fix_punctuation_spacing {
            s = SPACE_BEFORE_PUNCT.replace_all(&s, "$1").into_owned();
        }
        if self.collapse_ellipsis {
            s = DOT_RUN.replace_all(&s, ".").into_owned();
        }
        if self.fix_punctuation_spacing {
            s = MISSING_SPACE_AFTER_PUNCT
                .replace_all(&s, "$1 $2")
                .into_owned();
        }

        if self.capitalize {
            s = capitalize_first(&s);
        }

        let mut s = s
            .trim_end_matches(|c: char| matches!(c, ',' | ';' | ':') || c.is_whitespace())
            .to_string();
        if !s.chars().any(char::is_alphanumeric) {
            return String::new();
        }
        if !s.ends_with(|c: char| self.terminal_marks.contains(&c)) {
            s.push(self.default_terminal);
        }

        if self.min_tokens > 0 && s.split_whitespace().count() < self.min_tokens {
            return String::new();
        }
        s
    }

    fn strip_markup(&self, text: &str) -> String {
        let mut s = if self.strip_italics {
            ITALICS.replace_all(text, "$1").into_owned()
        } else {
            text.to_string()
        };

        if !self.quotes.is_empty() {
            s.retain(|c| !self.quotes.contains(&c));
        }
        if self.strip_brackets {
            s = PARENTHESIZED.replace_all(&s, "").into_owned();
            s = BRACKETED.replace_all(&s, "").into_owned();
        }
        if !self.symbols.is_empty() {
            s.retain(|c| !self.symbols.contains(&c));
        }
        s
    }

    /// Strip leading chapter markers until none is left
    fn strip_chapter_markers(&self, mut s: String) -> String {
        loop {
            let before = s.len();
            for re in &self.chapter_markers {
                if let Some(m) = re.find(&s) {
                    s = s[m.end()..].trim_start().to_string();
                }
            }
            if s.len() == before {
                return s;
            }
        }
    }
}

fn compile_rewrites(rules: &[RewriteRule]) -> Result<Vec<(Regex, String)>> {
    rules
        .iter()
        .map(|rule| Ok((compile(&rule.pattern)?, rule.replacement.clone())))
        .collect()
}

fn capitalize_first(s: &str) -> String {
    match s.char_indices().find(|(_, c)| c.is_alphabetic()) {
        Some((idx, ch)) if ch.is_lowercase() => {
            let mut out = String::with_capacity(s.len() + 2);
            out.push_str(&s[..idx]);
            out.extend(ch.to_uppercase());
            out.push_str(&s[idx + ch.len_utf8()..]);
            out
        }
        _ => s.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::language::get_rules;

    fn catalan() -> Cleaner {
        get_rules("ca").unwrap().cleaner().clone()
    }

    fn italian() -> Cleaner {
        get_rules("it").unwrap().cleaner().clone()
    }

    fn japanese() -> Cleaner {
        get_rules("ja").unwrap().cleaner().clone()
    }

    #[test]
    fn test_appends_terminal_period() {
        assert_eq!(
            catalan().clean("Era un dia molt fred i la pluja no parava de caure sobre la ciutat"),
            "Era un dia molt fred i la pluja no parava de caure sobre la ciutat."
        );
    }

    #[test]
    fn test_existing_terminal_kept() {
        assert_eq!(catalan().clean("Per què no vens?"), "Per què no vens?");
    }

    #[test]
    fn test_chapter_marker_stripped() {
        assert_eq!(
            catalan().clean("CAPÍTOL IV La tornada a casa va ser llarga"),
            "La tornada a casa va ser llarga."
        );
        assert_eq!(
            italian().clean("Capitolo 2 la strada era lunga e silenziosa"),
            "La strada era lunga e silenziosa."
        );
    }

    #[test]
    fn test_glued_words_repaired() {
        assert_eq!(
            catalan().clean("Van anar a lOest amb dEls cavalls"),
            "Van anar a l Oest amb d Els cavalls."
        );
    }

    #[test]
    fn test_quotes_and_italics_removed() {
        assert_eq!(
            catalan().clean("Va llegir «_El quadern gris_» tota la nit"),
            "Va llegir El quadern gris tota la nit."
        );
    }

    #[test]
    fn test_dialogue_dashes_become_commas() {
        assert_eq!(
            catalan().clean("— Vine aquí — va dir la mare des de la porta"),
            "Vine aquí, va dir la mare des de la porta."
        );
    }

    #[test]
    fn test_artifacts_removed() {
        assert_eq!(
            catalan().clean("Va asseure's, se a la cadira del menjador"),
            "Va asseure's a la cadira del menjador."
        );
    }

    #[test]
    fn test_punctuation_spacing() {
        assert_eq!(
            italian().clean("la casa era grande ,vecchia e fredda"),
            "La casa era grande, vecchia e fredda."
        );
    }

    #[test]
    fn test_ellipsis_collapsed() {
        assert_eq!(
            italian().clean("aspettava… e aspettava ancora"),
            "Aspettava. e aspettava ancora."
        );
    }

    #[test]
    fn test_trailing_separators_dropped() {
        assert_eq!(catalan().clean("Tot estava a punt;"), "Tot estava a punt.");
    }

    #[test]
    fn test_too_few_tokens_yields_empty() {
        assert_eq!(catalan().clean("«Hola» —"), "");
        assert_eq!(catalan().clean("Bon dia"), "");
    }

    #[test]
    fn test_nothing_alphanumeric_yields_empty() {
        assert_eq!(italian().clean("« » ... ,"), "");
    }

    #[test]
    fn test_marker_behind_dash_is_stripped() {
        assert_eq!(
            catalan().clean("— CAPÍTOL IV la tornada va ser llarga"),
            "La tornada va ser llarga."
        );
    }

    #[test]
    fn test_japanese_cleanup() {
        assert_eq!(
            japanese().clean("第三章　「東京」の古い町並み（注）を歩いた"),
            "東京の古い町並みを歩いた。"
        );
    }

    #[test]
    fn test_cleaner_is_stable() {
        let cleaner = catalan();
        for input in [
            "— Vine aquí — va dir, se la mare... i marxà",
            "«_Capítol I_» Capítol II lOest era lluny",
            "la casa , vella ,era buida.. i freda",
            "— CAPÍTOL IV la tornada va ser llarga i freda",
            "Capítol , se —lCAPÍTOL IV c]-;Éi]:",
        ] {
            let once = cleaner.clean(input);
            assert_eq!(cleaner.clean(&once), once, "input: {input}");
        }
    }
}
