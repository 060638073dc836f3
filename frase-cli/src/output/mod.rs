//! Output writers for accepted sentences and audit logs

use anyhow::{Context, Result};
use frase_core::AcceptedSentence;
use std::fs::{File, OpenOptions};
use std::io::BufWriter;
use std::path::Path;

/// Sink for accepted sentences
pub trait SentenceWriter {
    /// Write one accepted sentence
    fn write_sentence(&mut self, sentence: &AcceptedSentence) -> Result<()>;

    /// Flush everything written so far
    fn finish(&mut self) -> Result<()>;
}

pub mod audit;
pub mod json;
pub mod text;

pub use self::audit::AuditLog;
pub use self::json::{JsonWriter, SentenceRecord};
pub use self::text::TextWriter;

/// Supported sentence file formats
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// One sentence per line
    Text,
    /// One JSON object per line with text, source and ordinal
    Json,
}

/// Open an output file, truncating unless `append` is set
///
/// Missing parent directories are created.
pub fn open_output(path: &Path, append: bool) -> Result<BufWriter<File>> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
    }

    let file = if append {
        OpenOptions::new().create(true).append(true).open(path)
    } else {
        File::create(path)
    }
    .with_context(|| format!("Failed to open output file: {}", path.display()))?;

    Ok(BufWriter::new(file))
}

/// Build the writer for `format` over `path`
pub fn sentence_writer(
    path: &Path,
    format: OutputFormat,
    append: bool,
) -> Result<Box<dyn SentenceWriter>> {
    let file = open_output(path, append)?;
    Ok(match format {
        OutputFormat::Text => Box::new(TextWriter::new(file)),
        OutputFormat::Json => Box::new(JsonWriter::new(file)),
    })
}

/// Sentence texts of an existing JSON Lines output, for dedup seeding
///
/// A missing file yields no sentences.
pub fn existing_json_sentences(path: &Path) -> Result<Vec<String>> {
    if !path.exists() {
        return Ok(Vec::new());
    }
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read existing output: {}", path.display()))?;

    content
        .lines()
        .filter(|line| !line.trim().is_empty())
        .enumerate()
        .map(|(i, line)| {
            serde_json::from_str::<SentenceRecord>(line)
                .map(|record| record.text)
                .with_context(|| format!("{}:{}: invalid JSON line", path.display(), i + 1))
        })
        .collect()
}
