//! Finalize command implementation

use anyhow::{Context, Result};
use clap::Args;
use frase_core::{final_filter, FilterOutcome, FilterStats, FinalFilter};
use std::io::Write;
use std::path::PathBuf;

use super::RunContext;
use crate::input::FileReader;
use crate::language_source::LanguageSource;
use crate::output::{open_output, AuditLog};
use crate::progress::ProgressReporter;

/// Arguments for the finalize command
#[derive(Debug, Args)]
pub struct FinalizeArgs {
    /// Language code or name of the built-in rules
    #[arg(short, long, value_name = "LANG", required_unless_present = "language_config")]
    pub language: Option<String>,

    /// External language configuration file
    #[arg(long, value_name = "FILE")]
    pub language_config: Option<PathBuf>,

    /// Sentence file to clean
    #[arg(short, long, value_name = "FILE")]
    pub input: PathBuf,

    /// Cleaned sentence file
    #[arg(short, long, value_name = "FILE")]
    pub output: PathBuf,

    /// Log of removed and flagged lines
    #[arg(long, value_name = "FILE")]
    pub log: PathBuf,
}

impl FinalizeArgs {
    /// Execute the finalize command
    pub fn execute(&self, ctx: &RunContext) -> Result<()> {
        let source = LanguageSource::from_args(
            self.language.as_deref().unwrap_or_default(),
            self.language_config.as_ref(),
        );
        let rules = source.load()?;
        let input = FileReader::read_text(&self.input)?;

        let mut output = open_output(&self.output, false)?;
        let mut log = AuditLog::create(&self.log)?;
        let mut filter = FinalFilter::new(&rules);
        let stats = finalize_lines(
            &mut filter,
            &input,
            &mut output,
            &mut log,
            &FinalizeOptions::from_context(ctx),
        )?;

        if !ctx.quiet {
            eprint!("{}", stats.render());
        }
        Ok(())
    }
}

/// Progress settings for the final filter
pub(crate) struct FinalizeOptions {
    pub progress_interval: usize,
    pub quiet: bool,
}

impl FinalizeOptions {
    pub fn from_context(ctx: &RunContext) -> Self {
        Self {
            progress_interval: ctx.config.report.progress_interval,
            quiet: ctx.quiet,
        }
    }
}

/// Run every non-blank line of `input` through the final filter
///
/// Rejections and flags are logged against the 1-based line number.
pub(crate) fn finalize_lines<W: Write>(
    filter: &mut FinalFilter,
    input: &str,
    output: &mut W,
    log: &mut AuditLog,
    options: &FinalizeOptions,
) -> Result<FilterStats> {
    let lines: Vec<&str> = input.lines().collect();
    let mut stats = FilterStats::default();
    let mut progress = ProgressReporter::new(options.quiet);
    progress.init_lines(lines.len() as u64);

    for (i, line) in lines.iter().enumerate() {
        progress.inc(1);
        if line.trim().is_empty() {
            continue;
        }

        let outcome = filter.check(line);
        stats.record(&outcome);

        match &outcome {
            FilterOutcome::Accepted { text, flags } => {
                writeln!(output, "{text}").context("Failed to write output")?;
                for flag in flags {
                    log.line(&final_filter::log_line(i + 1, flag.label(), line))?;
                }
            }
            FilterOutcome::Rejected(reason) => {
                log.line(&final_filter::log_line(i + 1, reason.label(), line))?;
            }
        }

        if stats.processed % options.progress_interval == 0 {
            log::info!(
                "Finalized {} lines: {} kept",
                stats.processed,
                stats.accepted
            );
        }
    }

    progress.finish();
    output.flush().context("Failed to write output")?;
    log.finish()?;
    Ok(stats)
}
