//! Credential selection commands

use super::AppContext;
use crate::cli::KeyCommand;
use crate::credentials::KeySource;
use crate::error::{NovastreamError, Result};

use colored::Colorize;
use rustyline::DefaultEditor;

/// Prompt for an API key on the terminal
///
/// Returns `None` when the user enters nothing.
pub fn prompt_for_key() -> Result<Option<String>> {
    let mut rl = DefaultEditor::new()
        .map_err(|e| NovastreamError::Config(format!("Failed to open terminal: {}", e)))?;
    println!(
        "Paste a Gemini API key from a paid Google Cloud project ({}).",
        "https://ai.google.dev/gemini-api/docs/billing".blue()
    );
    let line = rl
        .readline("API key: ")
        .map_err(|e| NovastreamError::Config(format!("Failed to read key: {}", e)))?;
    let key = line.trim();
    Ok((!key.is_empty()).then(|| key.to_string()))
}

/// Select `key` for this process and persist it in the keyring
///
/// A keyring failure is logged; the key stays selected for the session.
pub fn select_key(ctx: &mut AppContext, key: String) {
    if let Err(e) = ctx.credentials.save(&key) {
        tracing::warn!("Could not store key in keyring: {}", e);
        println!(
            "{}",
            "Key selected for this session only (keyring unavailable).".yellow()
        );
    }
    ctx.api_key.set(key);
    ctx.key_source = Some(KeySource::Keyring);
}

/// Handle key commands
pub fn handle_key(ctx: &mut AppContext, command: KeyCommand) -> Result<()> {
    match command {
        KeyCommand::Set => {
            let Some(key) = prompt_for_key()? else {
                println!("{}", "No key entered.".yellow());
                return Ok(());
            };
            select_key(ctx, key);
            println!("{}", "API key selected.".green());
        }
        KeyCommand::Status => {
            ctx.load_stored_key();
            match &ctx.key_source {
                Some(source) if ctx.api_key.is_set() => {
                    println!("{} (from {})", "API key selected".green(), source);
                }
                _ => println!("{}", "No API key selected.".yellow()),
            }
        }
        KeyCommand::Clear => {
            ctx.credentials.clear()?;
            println!("{}", "Removed stored API key.".green());
            if let Some(source @ KeySource::Environment(_)) = &ctx.key_source {
                println!("A key is still provided by the {}.", source);
            }
        }
    }
    Ok(())
}
