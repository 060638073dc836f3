//! JSON Lines sentence writer

use super::SentenceWriter;
use anyhow::Result;
use frase_core::AcceptedSentence;
use serde::{Deserialize, Serialize};
use std::io::Write;

/// One line of JSON output
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SentenceRecord {
    /// Cleaned sentence
    pub text: String,
    /// Book the sentence came from
    pub source: String,
    /// 1-based position among the book's candidates
    pub ordinal: usize,
}

impl From<&AcceptedSentence> for SentenceRecord {
    fn from(sentence: &AcceptedSentence) -> Self {
        Self {
            text: sentence.text.clone(),
            source: sentence.source.clone(),
            ordinal: sentence.ordinal,
        }
    }
}

/// Writes one [`SentenceRecord`] per line
pub struct JsonWriter<W: Write> {
    writer: W,
}

impl<W: Write> JsonWriter<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }
}

impl<W: Write> SentenceWriter for JsonWriter<W> {
    fn write_sentence(&mut self, sentence: &AcceptedSentence) -> Result<()> {
        serde_json::to_writer(&mut self.writer, &SentenceRecord::from(sentence))?;
        writeln!(self.writer)?;
        Ok(())
    }

    fn finish(&mut self) -> Result<()> {
        self.writer.flush()?;
        Ok(())
    }
}
