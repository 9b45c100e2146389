//! Slash command parser for the interactive shell
//!
//! Commands are prefixed with `/`, and the command word is case-insensitive.
//! Arguments keep their original case. Input that is not a command is
//! returned as [`ShellCommand::None`] and handled by the active view.

use crate::view::AppView;
use colored::Colorize;
use thiserror::Error;

/// Errors that can occur when parsing shell commands
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CommandError {
    /// Unknown command was entered
    #[error("Unknown command: {0}\n\nType '/help' to see available commands")]
    UnknownCommand(String),

    /// Command was given an argument it does not take
    #[error("Unsupported argument for {command}: {arg}\n\nType '/help' to see valid usage")]
    UnsupportedArgument { command: String, arg: String },

    /// Command requires an argument but none was provided
    #[error("Command {command} requires an argument\n\nUsage: {usage}")]
    MissingArgument { command: String, usage: String },
}

/// Commands understood by the shell
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShellCommand {
    /// Switch to a view without arguments (home, library, studio)
    Navigate(AppView),

    /// Open the explore view, optionally choosing a category chip
    Explore(Option<String>),

    /// Set the search query (empty clears it)
    Search(String),

    /// Select a video by id and open the playing view
    Play(String),

    /// Generate a video from a prompt
    Generate(String),

    /// Ask the assistant a question
    Ask(String),

    /// Delete a video from the library
    Delete(String),

    /// Select an API key
    SelectKey,

    /// Show view, query, credential and studio state
    ShowStatus,

    /// Display help information
    Help,

    /// Leave the shell
    Exit,

    /// Not a command
    None,
}

fn required(command: &str, usage: &str, arg: &str) -> Result<String, CommandError> {
    if arg.is_empty() {
        Err(CommandError::MissingArgument {
            command: command.to_string(),
            usage: usage.to_string(),
        })
    } else {
        Ok(arg.to_string())
    }
}

fn no_argument(command: &str, arg: &str, parsed: ShellCommand) -> Result<ShellCommand, CommandError> {
    if arg.is_empty() {
        Ok(parsed)
    } else {
        Err(CommandError::UnsupportedArgument {
            command: command.to_string(),
            arg: arg.to_string(),
        })
    }
}

/// Parse a line of shell input
///
/// # Examples
///
/// ```
/// use novastream::commands::shell_commands::{parse_shell_command, ShellCommand};
/// use novastream::view::AppView;
///
/// assert_eq!(parse_shell_command("/library").unwrap(), ShellCommand::Navigate(AppView::Library));
/// assert_eq!(parse_shell_command("/play 3").unwrap(), ShellCommand::Play("3".to_string()));
/// assert_eq!(parse_shell_command("hello").unwrap(), ShellCommand::None);
/// assert!(parse_shell_command("/foo").is_err());
/// ```
pub fn parse_shell_command(input: &str) -> Result<ShellCommand, CommandError> {
    let trimmed = input.trim();
    let lower = trimmed.to_lowercase();

    if lower == "exit" || lower == "quit" {
        return Ok(ShellCommand::Exit);
    }
    if !trimmed.starts_with('/') {
        return Ok(ShellCommand::None);
    }

    let (word, arg) = match trimmed.split_once(char::is_whitespace) {
        Some((word, rest)) => (word.to_lowercase(), rest.trim()),
        None => (lower.clone(), ""),
    };

    match word.as_str() {
        "/home" => no_argument("/home", arg, ShellCommand::Navigate(AppView::Home)),
        "/library" => no_argument("/library", arg, ShellCommand::Navigate(AppView::Library)),
        "/studio" => no_argument("/studio", arg, ShellCommand::Navigate(AppView::Studio)),
        "/explore" => Ok(ShellCommand::Explore(
            (!arg.is_empty()).then(|| arg.to_string()),
        )),
        "/search" => Ok(ShellCommand::Search(arg.to_string())),
        "/play" => required("/play", "/play <video-id>", arg).map(ShellCommand::Play),
        "/generate" => {
            required("/generate", "/generate <prompt>", arg).map(ShellCommand::Generate)
        }
        "/ask" => required("/ask", "/ask <question>", arg).map(ShellCommand::Ask),
        "/delete" => required("/delete", "/delete <video-id>", arg).map(ShellCommand::Delete),
        "/key" => no_argument("/key", arg, ShellCommand::SelectKey),
        "/status" => no_argument("/status", arg, ShellCommand::ShowStatus),
        "/help" | "/?" => Ok(ShellCommand::Help),
        "/exit" | "/quit" => Ok(ShellCommand::Exit),
        _ => Err(CommandError::UnknownCommand(trimmed.to_string())),
    }
}

/// Print the shell help screen
pub fn print_help() {
    println!("\n{}", "NovaStream Shell Commands".bold());
    println!();
    println!("{}", "Views:".underline());
    println!("  /home                 Recommended feed");
    println!("  /explore [category]   Browse by category chip");
    println!("  /library              Your generated videos");
    println!("  /studio               AI video studio");
    println!();
    println!("{}", "Actions:".underline());
    println!("  /search <query>       Filter by title or category (empty clears)");
    println!("  /play <id>            Play a video with its AI summary");
    println!("  /generate <prompt>    Generate a video (Ctrl-C cancels)");
    println!("  /ask <question>       Ask the AI assistant");
    println!("  /delete <id>          Remove a video from your library");
    println!("  /key                  Select a Gemini API key");
    println!("  /status               Show session status");
    println!("  /help                 Show this help");
    println!("  exit                  Leave the shell");
    println!();
    println!(
        "Plain text is sent to the assistant, or used as the prompt in the {} view.",
        "STUDIO".magenta()
    );
    println!();
}
