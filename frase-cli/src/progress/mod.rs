//! Progress reporting module

use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

/// Progress bar over books or lines, hidden when quiet
pub struct ProgressReporter {
    progress_bar: Option<ProgressBar>,
    quiet: bool,
}

impl ProgressReporter {
    pub fn new(quiet: bool) -> Self {
        Self {
            progress_bar: None,
            quiet,
        }
    }

    /// Initialize progress bar for book processing
    pub fn init_files(&mut self, total_files: u64) {
        self.init(
            total_files,
            "[{elapsed_precise}] {bar:40.cyan/blue} {pos}/{len} books {msg}",
        );
    }

    /// Initialize progress bar for a line-by-line pass
    pub fn init_lines(&mut self, total_lines: u64) {
        self.init(
            total_lines,
            "[{elapsed_precise}] {bar:40.cyan/blue} {pos}/{len} lines {msg}",
        );
    }

    fn init(&mut self, total: u64, template: &str) {
        if self.quiet {
            return;
        }

        let pb = ProgressBar::new(total);
        if let Ok(style) = ProgressStyle::default_bar().template(template) {
            pb.set_style(style.progress_chars("##-"));
        }
        pb.enable_steady_tick(Duration::from_millis(100));

        self.progress_bar = Some(pb);
    }

    /// Update progress for a completed book
    pub fn file_completed(&self, filename: &str) {
        if let Some(pb) = &self.progress_bar {
            pb.set_message(format!("Processed: {filename}"));
            pb.inc(1);
        }
    }

    pub fn inc(&self, delta: u64) {
        if let Some(pb) = &self.progress_bar {
            pb.inc(delta);
        }
    }

    /// Finish progress reporting
    pub fn finish(&self) {
        if let Some(pb) = &self.progress_bar {
            pb.finish_with_message("Complete");
        }
    }
}
