//! One-shot question to the grounded assistant

use super::{print_chat_message, AppContext};
use crate::error::{NovastreamError, Result};

use colored::Colorize;

/// Handle `ask`
pub async fn run_ask(ctx: &mut AppContext, text: &str) -> Result<()> {
    if text.trim().is_empty() {
        return Err(NovastreamError::InvalidInput("question must not be empty".into()).into());
    }
    if !ctx.load_stored_key() {
        println!(
            "{}",
            "No API key selected. Run `novastream key set` first.".yellow()
        );
        return Err(NovastreamError::MissingCredentials("gemini".to_string()).into());
    }

    let mut session = ctx.assistant();
    let max_sources = session.max_displayed_sources();
    if let Some(reply) = session.send(text).await {
        print_chat_message(reply, max_sources);
    }
    Ok(())
}
