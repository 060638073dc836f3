//! Book discovery: directories, single files and glob patterns

use anyhow::{Context, Result};
use glob::glob;
use std::path::{Path, PathBuf};

use crate::error::CliError;

/// Resolve inputs to a sorted, duplicate-free list of books
///
/// A directory contributes its `*.txt` files (not recursive). Inputs that
/// match nothing are logged and skipped; if no input yields a book the
/// result is [`CliError::NoInputFiles`].
pub fn resolve_inputs(inputs: &[String]) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();

    for input in inputs {
        let path = Path::new(input);
        let found = if path.is_dir() {
            books_in_dir(path)?
        } else if path.is_file() {
            vec![path.to_path_buf()]
        } else {
            expand_pattern(input)?
        };

        if found.is_empty() {
            log::warn!("No books found for input: {input}");
        }
        files.extend(found);
    }

    if files.is_empty() {
        return Err(CliError::NoInputFiles(inputs.to_vec()).into());
    }

    files.sort();
    files.dedup();

    Ok(files)
}

fn books_in_dir(dir: &Path) -> Result<Vec<PathBuf>> {
    let entries = std::fs::read_dir(dir)
        .with_context(|| format!("Failed to read directory: {}", dir.display()))?;

    let mut books = Vec::new();
    for entry in entries {
        let path = entry
            .with_context(|| format!("Failed to read directory: {}", dir.display()))?
            .path();
        if path.is_file() && path.extension().is_some_and(|ext| ext == "txt") {
            books.push(path);
        }
    }
    Ok(books)
}

fn expand_pattern(pattern: &str) -> Result<Vec<PathBuf>> {
    let paths = glob(pattern).map_err(|_| CliError::InvalidPattern(pattern.to_string()))?;

    let mut files = Vec::new();
    for path_result in paths {
        let path = path_result.with_context(|| format!("Error resolving pattern: {pattern}"))?;
        if path.is_file() {
            files.push(path);
        }
    }
    Ok(files)
}
