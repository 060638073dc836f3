//! Plain text sentence writer

use super::SentenceWriter;
use anyhow::Result;
use frase_core::AcceptedSentence;
use std::io::Write;

/// One sentence per line
pub struct TextWriter<W: Write> {
    writer: W,
}

impl<W: Write> TextWriter<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }
}

impl<W: Write> SentenceWriter for TextWriter<W> {
    fn write_sentence(&mut self, sentence: &AcceptedSentence) -> Result<()> {
        writeln!(self.writer, "{}", sentence.text)?;
        Ok(())
    }

    fn finish(&mut self) -> Result<()> {
        self.writer.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_writer() {
        let mut buffer = Vec::new();
        {
            let mut writer = TextWriter::new(&mut buffer);
            writer
                .write_sentence(&AcceptedSentence {
                    text: "Il mare era calmo quella mattina.".to_string(),
                    source: "romanzo.txt".to_string(),
                    ordinal: 3,
                })
                .unwrap();
            writer.finish().unwrap();
        }
        assert_eq!(
            String::from_utf8(buffer).unwrap(),
            "Il mare era calmo quella mattina.\n"
        );
    }
}
