//! Langcheck command implementation

use anyhow::{Context, Result};
use clap::Args;
use frase_core::{langid, LanguageClassifier, LanguageFilter, LanguageStats, WhatlangClassifier};
use std::io::Write;
use std::path::PathBuf;

use super::RunContext;
use crate::input::FileReader;
use crate::language_source::LanguageSource;
use crate::output::{open_output, AuditLog};
use crate::progress::ProgressReporter;

/// Arguments for the langcheck command
#[derive(Debug, Args)]
pub struct LangcheckArgs {
    /// Language code or name of the built-in rules
    #[arg(short, long, value_name = "LANG", required_unless_present = "language_config")]
    pub language: Option<String>,

    /// External language configuration file
    #[arg(long, value_name = "FILE")]
    pub language_config: Option<PathBuf>,

    /// Sentence file to check
    #[arg(short, long, value_name = "FILE")]
    pub input: PathBuf,

    /// Lines attributed to the language
    #[arg(short, long, value_name = "FILE")]
    pub output: PathBuf,

    /// Log of dropped lines with the detected language
    #[arg(long, value_name = "FILE")]
    pub rejected: PathBuf,

    /// Classify only the first N lines
    #[arg(long, value_name = "N")]
    pub sample: Option<usize>,

    /// Minimum classifier confidence, 0.0 to 1.0
    #[arg(long, value_name = "F")]
    pub min_confidence: Option<f64>,
}

/// Settings for one language check pass
pub(crate) struct LangcheckOptions {
    pub sample_size: Option<usize>,
    pub min_confidence: f64,
    pub progress_interval: usize,
    pub quiet: bool,
}

impl LangcheckOptions {
    /// Config file values with command-line overrides
    pub(crate) fn resolve(
        ctx: &RunContext,
        sample: Option<usize>,
        min_confidence: Option<f64>,
    ) -> Self {
        Self {
            sample_size: sample.or(ctx.config.language_check.sample_size),
            min_confidence: min_confidence.unwrap_or(ctx.config.language_check.min_confidence),
            progress_interval: ctx.config.report.progress_interval,
            quiet: ctx.quiet,
        }
    }
}

impl LangcheckArgs {
    /// Execute the langcheck command
    pub fn execute(&self, ctx: &RunContext) -> Result<()> {
        let source = LanguageSource::from_args(
            self.language.as_deref().unwrap_or_default(),
            self.language_config.as_ref(),
        );
        let rules = source.load()?;
        let options = LangcheckOptions::resolve(ctx, self.sample, self.min_confidence);
        if !(0.0..=1.0).contains(&options.min_confidence) {
            anyhow::bail!(
                "--min-confidence must be between 0 and 1, got {}",
                options.min_confidence
            );
        }

        let input = FileReader::read_text(&self.input)?;
        let filter = LanguageFilter::for_rules(&rules, options.sample_size);
        let classifier = WhatlangClassifier::new(options.min_confidence);

        let mut output = open_output(&self.output, false)?;
        let mut rejected = AuditLog::create(&self.rejected)?;
        let stats = check_lines(
            &filter,
            &classifier,
            &input,
            &mut output,
            &mut rejected,
            &options,
        )?;

        if !ctx.quiet {
            eprint!("{}", stats.render());
        }
        Ok(())
    }
}

/// Keep the lines of `input` attributed to the filter's language
///
/// Blank lines are skipped. Log lines carry the 1-based line number in
/// `input`.
pub(crate) fn check_lines<W, C>(
    filter: &LanguageFilter,
    classifier: &C,
    input: &str,
    output: &mut W,
    rejected: &mut AuditLog,
    options: &LangcheckOptions,
) -> Result<LanguageStats>
where
    W: Write,
    C: LanguageClassifier + ?Sized,
{
    let lines: Vec<&str> = input.lines().collect();
    let mut stats = LanguageStats::default();
    let mut progress = ProgressReporter::new(options.quiet);
    progress.init_lines(lines.len() as u64);

    let mut position = 0;
    for (i, line) in lines.iter().enumerate() {
        progress.inc(1);
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        let verdict = filter.check(classifier, position, line);
        position += 1;
        stats.record(&verdict);

        if verdict.is_kept() {
            writeln!(output, "{line}").context("Failed to write output")?;
        } else if let Some(entry) = langid::log_line(i + 1, &verdict, line) {
            rejected.line(&entry)?;
        }

        if position % options.progress_interval == 0 {
            log::info!(
                "Checked {position} lines: {} kept, {} rejected",
                stats.kept + stats.unchecked,
                stats.rejected + stats.unknown
            );
        }
    }

    progress.finish();
    output.flush().context("Failed to write output")?;
    rejected.finish()?;
    Ok(stats)
}
