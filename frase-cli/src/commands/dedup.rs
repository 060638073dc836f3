//! Dedup command implementation

use anyhow::{Context, Result};
use clap::Args;
use frase_core::{duplicate_report, remove_duplicates};
use std::io::Write;
use std::path::PathBuf;

use crate::input::FileReader;
use crate::output::open_output;

/// Arguments for the dedup command
#[derive(Debug, Args)]
pub struct DedupArgs {
    /// Sentence file to inspect
    #[arg(short, long, value_name = "FILE")]
    pub input: PathBuf,

    /// Write the de-duplicated lines here
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,
}

impl DedupArgs {
    /// Execute the dedup command
    pub fn execute(&self) -> Result<()> {
        let content = FileReader::read_text(&self.input)?;
        let lines: Vec<&str> = content.lines().collect();

        let report = duplicate_report(lines.iter().copied());
        println!("Total lines: {}", report.total);
        println!("Unique lines: {}", report.unique);
        println!("Duplicates: {}", report.duplicates());
        println!("Uniqueness: {:.1}%", report.uniqueness_percent());
        for line_no in report.duplicate_lines.iter().take(20) {
            log::info!("Duplicate at line {line_no}");
        }

        if let Some(path) = &self.output {
            let mut output = open_output(path, false)?;
            for line in remove_duplicates(lines.iter().copied()) {
                writeln!(output, "{line}").context("Failed to write output")?;
            }
            output.flush().context("Failed to write output")?;
            println!("✓ De-duplicated file written to {}", path.display());
        }
        Ok(())
    }
}
