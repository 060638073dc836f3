//! Book loading and decoding

use std::path::{Path, PathBuf};

use crate::error::{Error, Result};

/// How the bytes of a book were decoded
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceEncoding {
    Utf8,
    /// Invalid UTF-8, decoded as latin-1 (WINDOWS-1252)
    Latin1Fallback,
}

/// The full decoded text of one book
#[derive(Debug, Clone)]
pub struct RawDocument {
    /// File name used as the provenance of every sentence
    pub source: String,
    pub path: Option<PathBuf>,
    pub text: String,
    pub encoding: SourceEncoding,
}

impl RawDocument {
    /// Read and decode a book
    ///
    /// A leading byte order mark is dropped. When the bytes are not valid
    /// UTF-8 the book is decoded as latin-1 if `latin1_fallback` is set,
    /// otherwise [`Error::Decode`] is returned.
    pub fn load(path: &Path, latin1_fallback: bool) -> Result<Self> {
        let bytes = std::fs::read(path).map_err(|e| Error::io(path, e))?;
        let (text, encoding) = match String::from_utf8(bytes) {
            Ok(text) => (text, SourceEncoding::Utf8),
            Err(err) if latin1_fallback => {
                let (text, _, _) = encoding_rs::WINDOWS_1252.decode(err.as_bytes());
                (text.into_owned(), SourceEncoding::Latin1Fallback)
            }
            Err(_) => {
                return Err(Error::Decode {
                    path: path.to_path_buf(),
                })
            }
        };

        Ok(Self {
            source: source_name(path),
            path: Some(path.to_path_buf()),
            text: strip_bom(text),
            encoding,
        })
    }

    /// Wrap text that is already in memory
    pub fn from_text(source: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            path: None,
            text: strip_bom(text.into()),
            encoding: SourceEncoding::Utf8,
        }
    }
}

fn source_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

fn strip_bom(text: String) -> String {
    match text.strip_prefix('\u{feff}') {
        Some(rest) => rest.to_string(),
        None => text,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_load_utf8() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "Bon dia a tothom.").unwrap();

        let doc = RawDocument::load(file.path(), false).unwrap();
        assert_eq!(doc.text, "Bon dia a tothom.");
        assert_eq!(doc.encoding, SourceEncoding::Utf8);
        assert_eq!(doc.path.as_deref(), Some(file.path()));
    }

    #[test]
    fn test_source_is_file_name() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("llibre.txt");
        std::fs::write(&path, "Text").unwrap();

        let doc = RawDocument::load(&path, false).unwrap();
        assert_eq!(doc.source, "llibre.txt");
    }

    #[test]
    fn test_bom_is_stripped() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all("\u{feff}Hola".as_bytes()).unwrap();

        let doc = RawDocument::load(file.path(), false).unwrap();
        assert_eq!(doc.text, "Hola");
    }

    #[test]
    fn test_latin1_fallback() {
        let mut file = NamedTempFile::new().unwrap();
        // "caçador" in latin-1
        file.write_all(&[0x63, 0x61, 0xE7, 0x61, 0x64, 0x6F, 0x72])
            .unwrap();

        let doc = RawDocument::load(file.path(), true).unwrap();
        assert_eq!(doc.text, "caçador");
        assert_eq!(doc.encoding, SourceEncoding::Latin1Fallback);
    }

    #[test]
    fn test_invalid_utf8_without_fallback() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(&[0x63, 0x61, 0xE7, 0x61]).unwrap();

        let err = RawDocument::load(file.path(), false).unwrap_err();
        assert!(matches!(err, Error::Decode { .. }));
    }

    #[test]
    fn test_missing_file() {
        let err = RawDocument::load(Path::new("/nonexistent/llibre.txt"), true).unwrap_err();
        assert!(matches!(err, Error::Io { .. }));
    }
}
