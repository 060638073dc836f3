//! Per-language extraction rules
//!
//! Each language is described by a TOML table ([`LanguageConfig`]) that is
//! compiled into a [`RuleSet`]. Catalan, Italian and Japanese are embedded.

pub mod config;
pub mod loader;
pub mod runtime;

pub use config::{
    CleanupConfig, CounterKind, FinalFilterConfig, LanguageConfig, ScriptKind, StartRule,
    WordsConfig,
};
pub use loader::{embedded_config_source, get_rules, list_available_languages};
pub use runtime::RuleSet;
