//! Studio view: text-to-video generation

use super::AppContext;
use crate::catalog::Video;
use crate::error::{NovastreamError, Result};
use crate::studio::Studio;

use colored::Colorize;
use tokio_util::sync::CancellationToken;

/// Run one generation in `studio`, narrating status until it finishes
///
/// Ctrl-C cancels the job.
pub async fn generate_with_narration(studio: &mut Studio, prompt: &str) -> Result<Video> {
    let cancel = CancellationToken::new();
    let on_interrupt = cancel.clone();
    let interrupt = tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            on_interrupt.cancel();
        }
    });

    let mut status = studio.subscribe_status();
    let narrator = tokio::spawn(async move {
        while status.changed().await.is_ok() {
            let line = status.borrow_and_update().clone();
            println!("  {} {}", "•".magenta(), line);
        }
    });

    let result = studio.generate(prompt, &cancel).await;

    interrupt.abort();
    narrator.abort();

    let state = studio.state();
    match &result {
        Ok(video) => {
            println!("{} {}", state.status.green().bold(), video.url);
        }
        Err(_) if !studio.credential_selected() => {
            println!("{}", state.error.as_deref().unwrap_or_default().red());
            println!(
                "{}",
                "The selected API key was rejected. Select a key from a paid Google Cloud project with `novastream key set` (or /key in the shell).".yellow()
            );
        }
        Err(_) => {
            let detail = state.error.as_deref().unwrap_or_default();
            println!("{} {}", state.status.red().bold(), detail);
        }
    }

    result
}

/// Handle `generate`
pub async fn run_generate(ctx: &mut AppContext, prompt: &str) -> Result<()> {
    if !ctx.load_stored_key() {
        println!(
            "{}",
            "Video generation requires a Gemini API key from a paid project. Run `novastream key set` first.".yellow()
        );
        return Err(NovastreamError::CredentialRequired.into());
    }

    let mut studio = ctx.studio();
    println!("\n{}", "AI Studio".magenta().bold());

    let video = generate_with_narration(&mut studio, prompt).await?;

    println!();
    println!("{} {}", "Saved to your library as".bold(), video.id.cyan());
    println!("{} {}", "Title:".bold(), video.title);
    println!();
    Ok(())
}
