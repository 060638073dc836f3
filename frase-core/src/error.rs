//! Error types for corpus extraction

use std::path::PathBuf;
use thiserror::Error;

/// Error type for frase operations
#[derive(Debug, Error)]
pub enum Error {
    /// Invalid or inconsistent language rules
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// No rule table is registered under this code
    #[error("Unsupported language: {0}")]
    UnsupportedLanguage(String),

    /// Reading a book or an existing output file failed
    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A book is not valid UTF-8 and its language forbids the latin-1 fallback
    #[error("Cannot decode {} as UTF-8", path.display())]
    Decode { path: PathBuf },

    /// A rule table contains a pattern that does not compile
    #[error("Invalid pattern `{pattern}`: {source}")]
    Regex {
        pattern: String,
        #[source]
        source: regex::Error,
    },

    /// A rule table is not valid TOML or does not match the schema
    #[error("Failed to parse language config: {0}")]
    Toml(#[from] toml::de::Error),
}

impl Error {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Error::Io {
            path: path.into(),
            source,
        }
    }
}

/// Result type for frase operations
pub type Result<T> = std::result::Result<T, Error>;
