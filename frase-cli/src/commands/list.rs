//! List command implementation

use anyhow::Result;
use frase_core::{get_rules, list_available_languages};

/// Print each built-in language as `code  name`
pub fn languages() -> Result<()> {
    println!("Available languages:");
    for code in list_available_languages() {
        let rules = get_rules(code)?;
        println!("  {:<4} {}", rules.code(), rules.name());
    }
    Ok(())
}
