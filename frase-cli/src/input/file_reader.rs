//! File reading utilities

use anyhow::{Context, Result};
use frase_core::{RawDocument, SourceEncoding};
use std::fs;
use std::path::Path;

use crate::error::CliError;

/// Reads books and line-oriented sentence files
pub struct FileReader;

impl FileReader {
    /// Read a sentence file as UTF-8 text
    pub fn read_text(path: &Path) -> Result<String> {
        if !path.is_file() {
            return Err(CliError::FileNotFound(path.display().to_string()).into());
        }
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read file: {}", path.display()))?;

        Ok(content)
    }

    /// Load a book, logging when the latin-1 fallback was used
    pub fn load_book(path: &Path, latin1_fallback: bool) -> Result<RawDocument> {
        let document = RawDocument::load(path, latin1_fallback)
            .with_context(|| format!("Failed to load book: {}", path.display()))?;

        if document.encoding == SourceEncoding::Latin1Fallback {
            log::warn!(
                "{} is not valid UTF-8, decoded as latin-1",
                path.display()
            );
        }
        Ok(document)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_read_text_success() {
        let temp_dir = TempDir::new().unwrap();
        let file_path = temp_dir.path().join("frases.txt");

        let content = "Primera frase.\nSegona frase.\n";
        fs::write(&file_path, content).unwrap();

        assert_eq!(FileReader::read_text(&file_path).unwrap(), content);
    }

    #[test]
    fn test_read_text_nonexistent_file() {
        let err = FileReader::read_text(Path::new("/nonexistent/frases.txt")).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<CliError>(),
            Some(CliError::FileNotFound(_))
        ));
    }

    #[test]
    fn test_load_book_with_fallback() {
        let temp_dir = TempDir::new().unwrap();
        let file_path = temp_dir.path().join("llibre.txt");
        fs::write(&file_path, [0x76, 0x65, 0xE7, 0x61]).unwrap();

        let document = FileReader::load_book(&file_path, true).unwrap();
        assert_eq!(document.text, "veça");
        assert_eq!(document.encoding, SourceEncoding::Latin1Fallback);
    }

    #[test]
    fn test_load_book_without_fallback_fails() {
        let temp_dir = TempDir::new().unwrap();
        let file_path = temp_dir.path().join("romanzo.txt");
        fs::write(&file_path, [0x76, 0x65, 0xE7, 0x61]).unwrap();

        let err = FileReader::load_book(&file_path, false).unwrap_err();
        assert!(err.to_string().contains("Failed to load book"));
        assert!(matches!(
            err.downcast_ref::<frase_core::Error>(),
            Some(frase_core::Error::Decode { .. })
        ));
    }
}
