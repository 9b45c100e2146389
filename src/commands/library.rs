//! Library view: list and delete generated videos

use super::{print_video_table, AppContext};
use crate::cli::LibraryCommand;
use crate::error::{NovastreamError, Result};

use colored::Colorize;

/// Handle library commands
pub fn handle_library(ctx: &AppContext, command: LibraryCommand) -> Result<()> {
    match command {
        LibraryCommand::List { json } => {
            let videos = ctx.library.get_videos()?;

            if json {
                println!("{}", serde_json::to_string_pretty(&videos)?);
                return Ok(());
            }

            if videos.is_empty() {
                println!("{}", "Your library is empty.".yellow());
                println!(
                    "Use {} to create your first video.",
                    "novastream generate --prompt <TEXT>".cyan()
                );
                return Ok(());
            }

            println!("\n{}", "Your Library".bold());
            print_video_table(&videos);
            println!();
        }
        LibraryCommand::Delete { id } => {
            delete_from_library(ctx, &id)?;
            println!("{}", format!("Deleted video {}", id).green());
        }
    }

    Ok(())
}

/// Remove a video and its local media file
///
/// # Errors
///
/// Returns `NotFound` when no library entry has `id`
pub fn delete_from_library(ctx: &AppContext, id: &str) -> Result<()> {
    let media_uri = ctx
        .library
        .get_videos()?
        .into_iter()
        .find(|v| v.id == id)
        .map(|v| v.url);

    if !ctx.library.delete_video(id)? {
        return Err(NovastreamError::NotFound(id.to_string()).into());
    }

    if let Some(uri) = media_uri {
        if let Err(e) = ctx.media.remove(&uri) {
            tracing::warn!("Failed to remove media for {}: {}", id, e);
        }
    }
    Ok(())
}
