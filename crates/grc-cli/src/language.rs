//! `grc languages`: print the supported policy languages.

use anyhow::Result;
use grc_core::language::supported_languages;
use grc_core::DEFAULT_LANGUAGE;

/// Render the language table, one `code  name` row per language.
pub fn language_table() -> String {
    supported_languages()
        .iter()
        .map(|(code, name)| {
            let marker = if *code == DEFAULT_LANGUAGE { " (default)" } else { "" };
            format!("  {code:<4} {name}{marker}")
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Execute the languages subcommand.
pub fn run_languages() -> Result<u8> {
    println!("Supported policy languages:");
    println!();
    println!("{}", language_table());
    println!();
    println!("Total: {} languages", supported_languages().len());
    Ok(0)
}
