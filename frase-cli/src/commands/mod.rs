//! CLI command implementations

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::config::CliConfig;

pub mod dedup;
pub mod extract;
pub mod finalize;
pub mod generate_config;
pub mod langcheck;
pub mod list;
pub mod run;
pub mod validate;

/// Build clean sentence corpora from plain-text books
#[derive(Debug, Parser)]
#[command(name = "frase", version, about)]
pub struct Cli {
    /// Suppress progress output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Increase verbosity
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// CLI configuration file
    #[arg(long, value_name = "FILE", global = true, env = "FRASE_CONFIG")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available CLI commands
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Extract clean sentences from books
    Extract(extract::ExtractArgs),

    /// Drop lines the classifier does not attribute to the language
    Langcheck(langcheck::LangcheckArgs),

    /// Final cleanup pass over a sentence file
    Finalize(finalize::FinalizeArgs),

    /// Run extraction, language check and final cleanup
    Run(run::RunArgs),

    /// Report or remove duplicate lines
    Dedup(dedup::DedupArgs),

    /// List available components
    List {
        #[command(subcommand)]
        subcommand: ListCommands,
    },

    /// Validate a language configuration file
    Validate(validate::ValidateArgs),

    /// Generate a language configuration from a built-in one
    GenerateConfig(generate_config::GenerateConfigArgs),
}

/// List subcommands
#[derive(Debug, Subcommand)]
pub enum ListCommands {
    /// List available language rules
    Languages,
}

/// Settings shared by every command
#[derive(Debug, Clone, Default)]
pub struct RunContext {
    pub config: CliConfig,
    pub quiet: bool,
}

impl Cli {
    /// Initialize logging based on verbosity level
    ///
    /// `RUST_LOG` overrides the level picked here.
    pub fn init_logging(&self) {
        let log_level = if self.quiet {
            "error"
        } else {
            match self.verbose {
                0 => "warn",
                1 => "info",
                2 => "debug",
                _ => "trace",
            }
        };

        let env = env_logger::Env::default().default_filter_or(log_level);
        let _ = env_logger::Builder::from_env(env)
            .format_timestamp(None)
            .try_init();
    }

    /// Load the CLI configuration and dispatch the subcommand
    pub fn execute(&self) -> Result<()> {
        let ctx = RunContext {
            config: CliConfig::load(self.config.as_deref())?,
            quiet: self.quiet,
        };
        log::debug!("Arguments: {:?}", self);

        match &self.command {
            Commands::Extract(args) => args.execute(&ctx),
            Commands::Langcheck(args) => args.execute(&ctx),
            Commands::Finalize(args) => args.execute(&ctx),
            Commands::Run(args) => args.execute(&ctx),
            Commands::Dedup(args) => args.execute(),
            Commands::List { subcommand } => match subcommand {
                ListCommands::Languages => list::languages(),
            },
            Commands::Validate(args) => args.execute(),
            Commands::GenerateConfig(args) => args.execute(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_extract() {
        let cli = Cli::try_parse_from([
            "frase", "-v", "extract", "-l", "ca", "-i", "llibres/", "-o", "frases.txt",
        ])
        .unwrap();

        assert_eq!(cli.verbose, 1);
        match cli.command {
            Commands::Extract(args) => {
                assert_eq!(args.language.as_deref(), Some("ca"));
                assert_eq!(args.input, vec!["llibres/".to_string()]);
            }
            other => panic!("expected extract, got {other:?}"),
        }
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from(["frase", "list", "languages", "--quiet"]).unwrap();
        assert!(cli.quiet);
        assert!(matches!(
            cli.command,
            Commands::List {
                subcommand: ListCommands::Languages
            }
        ));
    }

    #[test]
    fn test_extract_requires_output() {
        let result = Cli::try_parse_from(["frase", "extract", "-l", "ca", "-i", "llibres/"]);
        assert!(result.is_err());
    }
}
