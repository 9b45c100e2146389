//! Command-line interface definition for NovaStream
//!
//! This module defines the CLI structure using clap's derive API. Each
//! subcommand maps onto one view of the application (home, explore,
//! playing, library, studio) plus the assistant and credential helpers.

use clap::{Parser, Subcommand};

/// NovaStream - video streaming with an AI assistant and a generation studio
#[derive(Parser, Debug, Clone)]
#[command(name = "novastream")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, default_value = "config/config.yaml")]
    pub config: Option<String>,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,

    /// Override the library database path
    #[arg(long, env = "NOVASTREAM_STORAGE_PATH")]
    pub storage_path: Option<String>,

    /// Command to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands for NovaStream
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Show the recommended feed (library videos first, then the catalog)
    Browse {
        /// Only show videos whose title or category contains this text
        #[arg(short, long)]
        query: Option<String>,
    },

    /// Explore the catalog by category
    Explore {
        /// Category chip to select (Sci-Fi, Nature, Design, ...)
        #[arg(short, long)]
        category: Option<String>,
    },

    /// Show a video with its AI smart summary
    Play {
        /// Video identifier
        id: String,

        /// Skip the AI smart summary
        #[arg(long)]
        no_insights: bool,
    },

    /// Manage your library of generated videos
    Library {
        /// Library subcommand
        #[command(subcommand)]
        command: LibraryCommand,
    },

    /// Generate a video from a text prompt in the AI studio
    Generate {
        /// Description of the cinematic scene
        #[arg(short, long)]
        prompt: String,
    },

    /// Ask the grounded assistant a single question
    Ask {
        /// Question text
        #[arg(required = true, num_args = 1..)]
        text: Vec<String>,
    },

    /// Manage the Gemini API key used by the studio and assistant
    Key {
        /// Key subcommand
        #[command(subcommand)]
        command: KeyCommand,
    },

    /// Start an interactive session that navigates between views
    Shell,
}

/// Library management subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum LibraryCommand {
    /// List saved videos, newest first
    List {
        /// Print the stored JSON instead of a table
        #[arg(long)]
        json: bool,
    },

    /// Delete a saved video
    Delete {
        /// Video identifier
        id: String,
    },
}

/// Credential subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum KeyCommand {
    /// Select an API key and store it in the system keyring
    Set,

    /// Show whether a key is selected and where it comes from
    Status,

    /// Remove the stored key from the system keyring
    Clear,
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Self::parse()
    }
}
