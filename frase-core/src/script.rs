//! Script classification
//!
//! A small table-driven classifier mapping characters to the script classes
//! the Japanese rules care about, plus the pseudo-tokenizer that splits text
//! into maximal runs of one class.

/// Script class of a single character
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScriptClass {
    Kanji,
    Katakana,
    Hiragana,
    /// Any other alphabetic character
    Latin,
    Digit,
    /// Punctuation, whitespace and symbols
    Other,
}

/// Sorted, non-overlapping code point ranges
const RANGES: &[(char, char, ScriptClass)] = &[
    // 々 〆 〇
    ('\u{3005}', '\u{3007}', ScriptClass::Kanji),
    ('\u{3040}', '\u{309F}', ScriptClass::Hiragana),
    ('\u{30A0}', '\u{30FF}', ScriptClass::Katakana),
    ('\u{31F0}', '\u{31FF}', ScriptClass::Katakana),
    ('\u{3400}', '\u{4DBF}', ScriptClass::Kanji),
    ('\u{4E00}', '\u{9FFF}', ScriptClass::Kanji),
    ('\u{F900}', '\u{FAFF}', ScriptClass::Kanji),
    ('\u{FF66}', '\u{FF9F}', ScriptClass::Katakana),
];

/// Classify a character
pub fn classify(ch: char) -> ScriptClass {
    let found = RANGES.binary_search_by(|&(start, end, _)| {
        if end < ch {
            std::cmp::Ordering::Less
        } else if start > ch {
            std::cmp::Ordering::Greater
        } else {
            std::cmp::Ordering::Equal
        }
    });

    match found {
        Ok(idx) => RANGES[idx].2,
        Err(_) if ch.is_alphabetic() => ScriptClass::Latin,
        Err(_) if ch.is_numeric() => ScriptClass::Digit,
        Err(_) => ScriptClass::Other,
    }
}

/// Whether the character is a letter of the Latin script proper
pub fn is_latin_letter(ch: char) -> bool {
    ch.is_ascii_alphabetic()
        || (('\u{00C0}'..='\u{024F}').contains(&ch) && ch != '×' && ch != '÷')
        || ('\u{1E00}'..='\u{1EFF}').contains(&ch)
}

/// Whether the character is kanji, kana or an alphabetic character
pub fn is_japanese_or_latin(ch: char) -> bool {
    matches!(
        classify(ch),
        ScriptClass::Kanji | ScriptClass::Katakana | ScriptClass::Hiragana | ScriptClass::Latin
    )
}

/// Iterator over maximal runs of characters sharing a script class
#[derive(Debug, Clone)]
pub struct PseudoTokens<'a> {
    text: &'a str,
    pos: usize,
}

/// Split text into pseudo-tokens
pub fn pseudo_tokens(text: &str) -> PseudoTokens<'_> {
    PseudoTokens { text, pos: 0 }
}

impl<'a> Iterator for PseudoTokens<'a> {
    type Item = (ScriptClass, &'a str);

    fn next(&mut self) -> Option<Self::Item> {
        let rest = &self.text[self.pos..];
        let mut chars = rest.char_indices();
        let (_, first) = chars.next()?;
        let class = classify(first);

        let end = chars
            .find(|&(_, ch)| classify(ch) != class)
            .map(|(idx, _)| idx)
            .unwrap_or(rest.len());

        self.pos += end;
        Some((class, &rest[..end]))
    }
}

/// Count pseudo-tokens that carry content: kanji, katakana or alphabetic runs
pub fn count_content_tokens(text: &str) -> usize {
    pseudo_tokens(text)
        .filter(|(class, _)| {
            matches!(
                class,
                ScriptClass::Kanji | ScriptClass::Katakana | ScriptClass::Latin
            )
        })
        .count()
}
