//! Generate config command implementation

use anyhow::{Context, Result};
use clap::Args;
use frase_core::{get_rules, RuleSet};
use std::path::PathBuf;

/// Arguments for the generate-config command
#[derive(Debug, Args)]
pub struct GenerateConfigArgs {
    /// Language code for the new configuration
    #[arg(short = 'l', long, value_name = "CODE", required = true)]
    pub language_code: String,

    /// Built-in language to start from
    #[arg(long, value_name = "LANG", default_value = "ca")]
    pub from: String,

    /// Display name of the new language
    #[arg(long, value_name = "NAME")]
    pub name: Option<String>,

    /// Output file path
    #[arg(short, long, value_name = "FILE", required = true)]
    pub output: PathBuf,
}

impl GenerateConfigArgs {
    /// Execute the generate-config command
    pub fn execute(&self) -> Result<()> {
        println!("Generating language configuration...");
        println!("  Language code: {}", self.language_code);
        println!("  Based on: {}", self.from);
        println!("  Output file: {}", self.output.display());

        let template = self.generate_template()?;

        std::fs::write(&self.output, template)
            .with_context(|| format!("Failed to write to {}", self.output.display()))?;

        println!("✓ Configuration generated successfully!");
        println!();
        println!("Next steps:");
        println!("1. Edit the word lists, limits and cleanup patterns");
        println!("2. Validate your configuration:");
        println!(
            "   frase validate --language-config {}",
            self.output.display()
        );
        println!("3. Use it for extraction:");
        println!(
            "   frase extract --language-config {} -i books/ -o sentences.txt",
            self.output.display()
        );

        Ok(())
    }

    /// Copy of the base language's rules under the new code
    fn generate_template(&self) -> Result<String> {
        let base = get_rules(&self.from)?;
        let mut config = base.config().clone();
        config.metadata.code = self.language_code.clone();
        if let Some(name) = &self.name {
            config.metadata.name = name.clone();
        }

        let body = toml::to_string_pretty(&config).context("Failed to serialize configuration")?;
        RuleSet::from_toml_str(&body).context("Generated configuration does not load")?;

        Ok(format!(
            "# Language configuration for {} (based on {})\n\n{body}",
            self.language_code,
            base.name()
        ))
    }
}
