//! Run command: every stage with fixed file names

use anyhow::{Context, Result};
use clap::Args;
use frase_core::{FinalFilter, LanguageFilter, Pipeline, WhatlangClassifier};
use std::path::{Path, PathBuf};

use super::extract::extract_books;
use super::finalize::{finalize_lines, FinalizeOptions};
use super::langcheck::{check_lines, LangcheckOptions};
use super::RunContext;
use crate::input::{resolve_inputs, FileReader};
use crate::language_source::LanguageSource;
use crate::output::{open_output, sentence_writer, AuditLog, OutputFormat};

pub const RAW_SENTENCES: &str = "sentences_raw.txt";
pub const REJECTIONS: &str = "rejections.log";
pub const LANGUAGE_SENTENCES: &str = "sentences_lang.txt";
pub const LANGUAGE_REJECTED: &str = "language_rejected.log";
pub const FINAL_SENTENCES: &str = "sentences_final.txt";
pub const CLEANUP_LOG: &str = "cleanup.log";
pub const STATS: &str = "stats.txt";

/// Arguments for the run command
#[derive(Debug, Args)]
pub struct RunArgs {
    /// Language code or name of the built-in rules
    #[arg(short, long, value_name = "LANG", required_unless_present = "language_config")]
    pub language: Option<String>,

    /// External language configuration file
    #[arg(long, value_name = "FILE")]
    pub language_config: Option<PathBuf>,

    /// Book directories, files or glob patterns
    #[arg(short, long, value_name = "DIR/FILE/PATTERN", required = true, num_args = 1..)]
    pub input: Vec<String>,

    /// Directory for every output file (default from config)
    #[arg(long, value_name = "DIR")]
    pub out_dir: Option<PathBuf>,

    /// Go straight from extraction to the final pass
    #[arg(long)]
    pub skip_langcheck: bool,

    /// Expected number of final sentences (default from config)
    #[arg(long, value_name = "N")]
    pub target: Option<usize>,
}

impl RunArgs {
    /// Execute the run command
    pub fn execute(&self, ctx: &RunContext) -> Result<()> {
        let source = LanguageSource::from_args(
            self.language.as_deref().unwrap_or_default(),
            self.language_config.as_ref(),
        );
        let rules = source.load()?;
        log::info!("Language rules: {}", source.display_name());

        let books = resolve_inputs(&self.input)?;
        let out_dir = self
            .out_dir
            .clone()
            .unwrap_or_else(|| ctx.config.paths.out_dir.clone());
        std::fs::create_dir_all(&out_dir)
            .with_context(|| format!("Failed to create directory: {}", out_dir.display()))?;
        let target = self.target.unwrap_or(ctx.config.report.target);

        log::info!("Extracting from {} books", books.len());
        let raw_path = out_dir.join(RAW_SENTENCES);
        let mut writer = sentence_writer(&raw_path, OutputFormat::Text, false)?;
        let mut rejections = AuditLog::create(&out_dir.join(REJECTIONS))?;
        let run_stats = extract_books(
            &mut Pipeline::new(rules.clone()),
            &books,
            writer.as_mut(),
            &mut rejections,
            ctx.quiet,
        )?;
        drop(writer);

        let mut report = run_stats.render(rules.name());

        let final_input = if self.skip_langcheck {
            raw_path
        } else {
            log::info!("Checking language of {} sentences", run_stats.accepted);
            let options = LangcheckOptions::resolve(ctx, None, None);
            let filter = LanguageFilter::for_rules(&rules, options.sample_size);
            let classifier = WhatlangClassifier::new(options.min_confidence);

            let lang_path = out_dir.join(LANGUAGE_SENTENCES);
            let mut output = open_output(&lang_path, false)?;
            let mut rejected = AuditLog::create(&out_dir.join(LANGUAGE_REJECTED))?;
            let stats = check_lines(
                &filter,
                &classifier,
                &FileReader::read_text(&raw_path)?,
                &mut output,
                &mut rejected,
                &options,
            )?;
            report.push_str("\nLanguage check\n");
            report.push_str(&stats.render());
            lang_path
        };

        log::info!("Final cleanup");
        let final_path = out_dir.join(FINAL_SENTENCES);
        let mut output = open_output(&final_path, false)?;
        let mut cleanup_log = AuditLog::create(&out_dir.join(CLEANUP_LOG))?;
        let filter_stats = finalize_lines(
            &mut FinalFilter::new(&rules),
            &FileReader::read_text(&final_input)?,
            &mut output,
            &mut cleanup_log,
            &FinalizeOptions::from_context(ctx),
        )?;
        report.push_str("\nFinal cleanup\n");
        report.push_str(&filter_stats.render());

        write_report(&out_dir.join(STATS), &report)?;

        let total = filter_stats.accepted;
        if total < target {
            log::warn!("Only {total} sentences, below the target of {target}");
        }
        if !ctx.quiet {
            eprintln!("{total} sentences written to {}", final_path.display());
        }
        Ok(())
    }
}

fn write_report(path: &Path, report: &str) -> Result<()> {
    std::fs::write(path, report)
        .with_context(|| format!("Failed to write stats: {}", path.display()))
}
