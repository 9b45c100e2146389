//! Home, explore, and playing views as one-shot commands

use super::{print_video_details, print_video_table, AppContext};
use crate::assistant::summarize;
use crate::catalog::{filter_videos, find_video, resolve_category, Video, EXPLORE_CATEGORIES};
use crate::error::{NovastreamError, Result};

use colored::Colorize;

/// Feed entries matching `query` (all entries when `None`)
pub fn browse_videos(ctx: &AppContext, query: Option<&str>) -> Result<Vec<Video>> {
    let feed = ctx.feed()?;
    Ok(filter_videos(&feed, query.unwrap_or(""))
        .into_iter()
        .cloned()
        .collect())
}

/// Handle `browse`
pub fn run_browse(ctx: &AppContext, query: Option<String>) -> Result<()> {
    tracing::info!(query = ?query, "Browsing feed");
    let videos = browse_videos(ctx, query.as_deref())?;

    match query.as_deref().filter(|q| !q.is_empty()) {
        Some(q) => println!("\nResults for \"{}\":", q.bold()),
        None => println!("\n{}", "Recommended for you".bold()),
    }

    if videos.is_empty() {
        println!("{}", "No videos match your search.".yellow());
        return Ok(());
    }
    print_video_table(&videos);
    println!();
    Ok(())
}

/// Render the category chips, highlighting `active`
pub fn render_chips(active: Option<&str>) -> String {
    EXPLORE_CATEGORIES
        .iter()
        .map(|chip| {
            if Some(*chip) == active {
                format!("[{}]", chip).black().on_white().to_string()
            } else {
                format!("[{}]", chip)
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Handle `explore`
pub fn run_explore(ctx: &AppContext, category: Option<String>) -> Result<()> {
    let chip = match category.as_deref() {
        Some(name) => Some(resolve_category(name).ok_or_else(|| {
            NovastreamError::InvalidInput(format!(
                "Unknown category '{}'. Choose one of: {}",
                name,
                EXPLORE_CATEGORIES.join(", ")
            ))
        })?),
        None => None,
    };

    println!("\n{}", "Explore".bold());
    println!("{}\n", render_chips(chip));

    let videos = browse_videos(ctx, chip)?;
    if videos.is_empty() {
        println!("{}", "Nothing here yet.".yellow());
    } else {
        print_video_table(&videos);
    }
    println!();
    Ok(())
}

/// Handle `play`
pub async fn run_play(ctx: &mut AppContext, id: &str, no_insights: bool) -> Result<()> {
    let feed = ctx.feed()?;
    let video = find_video(&feed, id)
        .cloned()
        .ok_or_else(|| NovastreamError::NotFound(id.to_string()))?;

    tracing::info!(id = %video.id, "Playing video");
    print_video_details(&video);

    if no_insights {
        return Ok(());
    }

    println!();
    println!("{}", "AI Smart Summary".magenta().bold());
    if let Some(cached) = &video.ai_insights {
        println!("{}", cached);
    } else if ctx.load_stored_key() {
        let summary = summarize(
            ctx.backends.chat.as_ref(),
            &ctx.config.gemini.summary_model,
            &video,
        )
        .await;
        println!("{}", summary);
    } else {
        println!(
            "{}",
            "No API key selected. Run `novastream key set` to enable AI insights.".yellow()
        );
    }
    println!();
    Ok(())
}
