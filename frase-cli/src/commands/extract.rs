//! Extract command implementation

use anyhow::{Context, Result};
use clap::Args;
use frase_core::{Pipeline, RunStats};
use std::path::{Path, PathBuf};

use super::RunContext;
use crate::input::{resolve_inputs, FileReader};
use crate::language_source::LanguageSource;
use crate::output::{existing_json_sentences, sentence_writer, AuditLog, OutputFormat, SentenceWriter};
use crate::progress::ProgressReporter;

/// Arguments for the extract command
#[derive(Debug, Args)]
pub struct ExtractArgs {
    /// Language code or name of the built-in rules
    #[arg(short, long, value_name = "LANG", required_unless_present = "language_config")]
    pub language: Option<String>,

    /// External language configuration file
    #[arg(long, value_name = "FILE")]
    pub language_config: Option<PathBuf>,

    /// Book directories, files or glob patterns
    #[arg(short, long, value_name = "DIR/FILE/PATTERN", required = true, num_args = 1..)]
    pub input: Vec<String>,

    /// Sentence output file
    #[arg(short, long, value_name = "FILE")]
    pub output: PathBuf,

    /// Log of rejected candidates
    #[arg(long, value_name = "FILE")]
    pub rejections: Option<PathBuf>,

    /// Statistics report
    #[arg(long, value_name = "FILE")]
    pub stats: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "text")]
    pub format: OutputFormat,

    /// Keep the existing output and skip sentences already in it
    #[arg(long)]
    pub append_existing: bool,
}

impl ExtractArgs {
    /// Execute the extract command
    pub fn execute(&self, ctx: &RunContext) -> Result<()> {
        let source = LanguageSource::from_args(
            self.language.as_deref().unwrap_or_default(),
            self.language_config.as_ref(),
        );
        let rules = source.load()?;
        log::info!("Language rules: {}", source.display_name());

        let books = resolve_inputs(&self.input)?;
        log::info!("Found {} books", books.len());

        let mut pipeline = Pipeline::new(rules.clone());
        if self.append_existing {
            let seeded = self.seed_from_output(&mut pipeline)?;
            log::info!("Seeded {seeded} sentences from {}", self.output.display());
        }

        let mut writer = sentence_writer(&self.output, self.format, self.append_existing)?;
        let mut rejections = AuditLog::optional(self.rejections.as_deref())?;

        let stats = extract_books(
            &mut pipeline,
            &books,
            writer.as_mut(),
            &mut rejections,
            ctx.quiet,
        )?;

        if let Some(path) = &self.stats {
            write_stats(path, &stats, rules.name())?;
        }

        if !ctx.quiet {
            eprintln!(
                "{} sentences from {} books written to {}",
                stats.accepted,
                stats.books_processed,
                self.output.display()
            );
        }
        Ok(())
    }

    /// Treat the sentences already in the output file as accepted
    fn seed_from_output(&self, pipeline: &mut Pipeline) -> Result<usize> {
        match self.format {
            OutputFormat::Text => pipeline
                .seed_from_file(&self.output)
                .with_context(|| format!("Failed to seed from {}", self.output.display())),
            OutputFormat::Json => {
                let texts = existing_json_sentences(&self.output)?;
                Ok(pipeline.seed(texts.iter().map(String::as_str)))
            }
        }
    }
}

/// Run the extraction pipeline over `books` in order
///
/// Books that cannot be read or decoded are skipped. The pipeline may be
/// seeded beforehand; seeded sentences count as duplicates.
pub(crate) fn extract_books(
    pipeline: &mut Pipeline,
    books: &[PathBuf],
    writer: &mut dyn SentenceWriter,
    rejections: &mut AuditLog,
    quiet: bool,
) -> Result<RunStats> {
    let latin1_fallback = pipeline.rules().latin1_fallback();

    let mut progress = ProgressReporter::new(quiet);
    progress.init_files(books.len() as u64);

    for path in books {
        let document = match FileReader::load_book(path, latin1_fallback) {
            Ok(document) => document,
            Err(e) => {
                log::warn!("Skipping book: {e:#}");
                pipeline.record_skipped();
                progress.file_completed(&path.display().to_string());
                continue;
            }
        };

        let outcome = pipeline.process_document(&document);
        log::info!(
            "{}: {} candidates, {} accepted",
            outcome.source,
            outcome.candidates,
            outcome.accepted.len()
        );

        for sentence in &outcome.accepted {
            writer.write_sentence(sentence)?;
        }

        if !outcome.rejected.is_empty() {
            rejections.line(&format!("# {}", outcome.source))?;
            for record in &outcome.rejected {
                rejections.line(&format!(
                    "{}: [{}] {}",
                    record.ordinal,
                    record.reason.label(),
                    record.text
                ))?;
            }
        }

        progress.file_completed(&outcome.source);
    }

    progress.finish();
    writer.finish()?;
    rejections.finish()?;

    Ok(pipeline.stats().clone())
}

pub(crate) fn write_stats(path: &Path, stats: &RunStats, language: &str) -> Result<()> {
    std::fs::write(path, stats.render(language))
        .with_context(|| format!("Failed to write stats: {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::output::TextWriter;
    use frase_core::get_rules;
    use std::fs;
    use tempfile::TempDir;

    const SENTENCE: &str = "Era un dia molt fred i la pluja no parava de caure sobre la ciutat";

    #[test]
    fn test_extract_books_writes_and_logs() {
        let dir = TempDir::new().unwrap();
        let book = dir.path().join("llibre.txt");
        fs::write(&book, format!("Capítol 3. {SENTENCE}.")).unwrap();
        let log_path = dir.path().join("rebutjades.log");

        let mut buffer = Vec::new();
        let mut writer = TextWriter::new(&mut buffer);
        let mut log = AuditLog::create(&log_path).unwrap();

        let stats = extract_books(
            &mut Pipeline::new(get_rules("ca").unwrap()),
            &[book],
            &mut writer,
            &mut log,
            true,
        )
        .unwrap();

        assert_eq!(stats.accepted, 1);
        assert_eq!(String::from_utf8(buffer).unwrap(), format!("{SENTENCE}.\n"));
        assert_eq!(
            fs::read_to_string(&log_path).unwrap(),
            "# llibre.txt\n1: [too_short] Capítol 3\n"
        );
    }

    #[test]
    fn test_unreadable_book_is_skipped() {
        let dir = TempDir::new().unwrap();
        let good = dir.path().join("a.txt");
        let bad = dir.path().join("b.txt");
        fs::write(&good, SENTENCE).unwrap();
        fs::write(&bad, [0x66, 0xE8, 0x6C]).unwrap();

        let mut buffer = Vec::new();
        let mut writer = TextWriter::new(&mut buffer);
        let stats = extract_books(
            &mut Pipeline::new(get_rules("it").unwrap()),
            &[good, bad],
            &mut writer,
            &mut AuditLog::disabled(),
            true,
        )
        .unwrap();

        assert_eq!(stats.books_processed, 1);
        assert_eq!(stats.books_skipped, 1);
    }

    #[test]
    fn test_seeded_pipeline_suppresses_known_sentences() {
        let dir = TempDir::new().unwrap();
        let book = dir.path().join("llibre.txt");
        fs::write(&book, SENTENCE).unwrap();

        let existing = dir.path().join("frases.txt");
        fs::write(&existing, format!("{SENTENCE}.\n")).unwrap();
        let mut pipeline = Pipeline::new(get_rules("ca").unwrap());
        assert_eq!(pipeline.seed_from_file(&existing).unwrap(), 1);

        let mut buffer = Vec::new();
        let mut writer = TextWriter::new(&mut buffer);
        let stats = extract_books(
            &mut pipeline,
            &[book],
            &mut writer,
            &mut AuditLog::disabled(),
            true,
        )
        .unwrap();

        assert_eq!(stats.accepted, 0);
        assert!(buffer.is_empty());
    }

    fn args_for(output: PathBuf, format: OutputFormat) -> ExtractArgs {
        ExtractArgs {
            language: Some("ca".to_string()),
            language_config: None,
            input: vec!["llibres".to_string()],
            output,
            rejections: None,
            stats: None,
            format,
            append_existing: true,
        }
    }

    #[test]
    fn test_seed_from_text_output() {
        let dir = TempDir::new().unwrap();
        let output = dir.path().join("frases.txt");
        fs::write(&output, format!("{SENTENCE}.\n\n{SENTENCE}.\n")).unwrap();

        let mut pipeline = Pipeline::new(get_rules("ca").unwrap());
        let seeded = args_for(output, OutputFormat::Text)
            .seed_from_output(&mut pipeline)
            .unwrap();

        assert_eq!(seeded, 1);
        assert_eq!(pipeline.index().len(), 1);
    }

    #[test]
    fn test_seed_from_json_output() {
        let dir = TempDir::new().unwrap();
        let output = dir.path().join("frases.jsonl");
        fs::write(
            &output,
            format!("{{\"text\":\"{SENTENCE}.\",\"source\":\"llibre.txt\",\"ordinal\":1}}\n"),
        )
        .unwrap();

        let mut pipeline = Pipeline::new(get_rules("ca").unwrap());
        let seeded = args_for(output, OutputFormat::Json)
            .seed_from_output(&mut pipeline)
            .unwrap();

        assert_eq!(seeded, 1);
    }

    #[test]
    fn test_seed_from_missing_output() {
        let dir = TempDir::new().unwrap();
        let mut pipeline = Pipeline::new(get_rules("ca").unwrap());
        let seeded = args_for(dir.path().join("nova.txt"), OutputFormat::Text)
            .seed_from_output(&mut pipeline)
            .unwrap();
        assert_eq!(seeded, 0);
    }
}
