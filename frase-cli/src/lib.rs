//! Frase CLI library
//!
//! Command-line front end for the frase sentence extraction pipeline:
//! book discovery, output files, audit logs and progress reporting.

pub mod commands;
pub mod config;
pub mod error;
pub mod input;
pub mod language_source;
pub mod output;
pub mod progress;

pub use commands::Cli;
pub use error::{CliError, CliResult};
