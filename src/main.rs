//! NovaStream - video streaming CLI with an AI studio and assistant
//!
#![doc = "Main entry point for the NovaStream application."]

use anyhow::Result;

use novastream::cli::{Cli, Commands};
use novastream::commands::{self, AppContext};
use novastream::config::Config;
use novastream::logging::init_logging;

#[tokio::main]
async fn main() -> Result<()> {
    // Parse command line arguments
    let cli = Cli::parse_args();

    // Load configuration
    let config_path = cli.config.as_deref().unwrap_or("config/config.yaml");
    let config = Config::load(config_path, &cli)?;

    init_logging(&config.logging)?;

    // Validate configuration
    config.validate()?;

    let mut ctx = AppContext::new(config)?;

    // Execute command
    match cli.command {
        Commands::Browse { query } => {
            tracing::info!("Showing home feed");
            commands::browse::run_browse(&ctx, query)?;
        }
        Commands::Explore { category } => {
            tracing::info!("Showing explore view");
            if let Some(c) = &category {
                tracing::debug!("Selected category: {}", c);
            }
            commands::browse::run_explore(&ctx, category)?;
        }
        Commands::Play { id, no_insights } => {
            commands::browse::run_play(&mut ctx, &id, no_insights).await?;
        }
        Commands::Library { command } => {
            tracing::info!("Starting library command");
            commands::library::handle_library(&ctx, command)?;
        }
        Commands::Generate { prompt } => {
            tracing::info!("Starting video generation");
            tracing::debug!("Using prompt: {}", prompt);
            commands::generate::run_generate(&mut ctx, &prompt).await?;
        }
        Commands::Ask { text } => {
            commands::ask::run_ask(&mut ctx, &text.join(" ")).await?;
        }
        Commands::Key { command } => {
            commands::key::handle_key(&mut ctx, command)?;
        }
        Commands::Shell => {
            commands::shell::run_shell(&mut ctx).await?;
        }
    }

    Ok(())
}
