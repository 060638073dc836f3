//! Language configuration loader
//!
//! Embedded rule tables are parsed on first access and cached.

use std::collections::HashMap;
use std::sync::{Arc, OnceLock};

use crate::{
    error::{Error, Result},
    language::runtime::RuleSet,
};

/// Embedded rule tables: (code, long name, TOML source)
const EMBEDDED_CONFIGS: [(&str, &str, &str); 3] = [
    (
        "ca",
        "catalan",
        include_str!("../../configs/languages/catalan.toml"),
    ),
    (
        "it",
        "italian",
        include_str!("../../configs/languages/italian.toml"),
    ),
    (
        "ja",
        "japanese",
        include_str!("../../configs/languages/japanese.toml"),
    ),
];

type RuleMap = HashMap<&'static str, Arc<RuleSet>>;

static EMBEDDED: OnceLock<std::result::Result<RuleMap, String>> = OnceLock::new();

fn embedded() -> Result<&'static RuleMap> {
    EMBEDDED
        .get_or_init(|| {
            let mut map = HashMap::new();
            for (code, name, source) in EMBEDDED_CONFIGS {
                let rules = RuleSet::from_toml_str(source)
                    .map_err(|e| format!("Failed to load {code} config: {e}"))?;
                let rules = Arc::new(rules);
                map.insert(code, rules.clone());
                map.insert(name, rules);
            }
            Ok(map)
        })
        .as_ref()
        .map_err(|e| Error::Configuration(e.clone()))
}

/// Load embedded language rules by code or long name (case-insensitive)
pub fn get_rules(code: &str) -> Result<Arc<RuleSet>> {
    let key = code.trim().to_lowercase();
    embedded()?
        .get(key.as_str())
        .cloned()
        .ok_or_else(|| Error::UnsupportedLanguage(code.to_string()))
}

/// Codes of the embedded languages, sorted
pub fn list_available_languages() -> Vec<&'static str> {
    let mut codes: Vec<&'static str> = EMBEDDED_CONFIGS.iter().map(|(code, _, _)| *code).collect();
    codes.sort_unstable();
    codes
}

/// Raw TOML source of an embedded rule table
pub fn embedded_config_source(code: &str) -> Option<&'static str> {
    let key = code.trim().to_lowercase();
    EMBEDDED_CONFIGS
        .iter()
        .find(|(short, long, _)| *short == key || *long == key)
        .map(|(_, _, source)| *source)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_embedded_languages_load() {
        for code in list_available_languages() {
            let rules = get_rules(code).unwrap();
            assert_eq!(rules.code(), code);
        }
    }

    #[test]
    fn test_long_names_alias_codes() {
        let short = get_rules("ca").unwrap();
        let long = get_rules("Catalan").unwrap();
        assert!(Arc::ptr_eq(&short, &long));
        assert_eq!(get_rules("japanese").unwrap().code(), "ja");
        assert_eq!(get_rules("IT").unwrap().name(), "Italian");
    }

    #[test]
    fn test_unknown_language() {
        match get_rules("xx") {
            Err(Error::UnsupportedLanguage(code)) => assert_eq!(code, "xx"),
            other => panic!("expected unsupported language, got {other:?}"),
        }
    }

    #[test]
    fn test_list_is_sorted() {
        assert_eq!(list_available_languages(), vec!["ca", "it", "ja"]);
    }

    #[test]
    fn test_embedded_source_lookup() {
        let source = embedded_config_source("italian").unwrap();
        assert!(source.contains("detect_code = \"ita\""));
        assert!(embedded_config_source("klingon").is_none());
    }

    #[test]
    fn test_detect_codes() {
        assert_eq!(get_rules("ca").unwrap().detect_code(), "cat");
        assert_eq!(get_rules("it").unwrap().detect_code(), "ita");
        assert_eq!(get_rules("ja").unwrap().detect_code(), "jpn");
    }
}
