//! Command handlers for NovaStream
//!
//! Each CLI subcommand has a handler in its own module. Handlers share an
//! [`AppContext`] that wires configuration, storage, credentials, and the
//! Gemini backends together.

use crate::assistant::{AssistantSession, ChatMessage};
use crate::catalog::{builtin_catalog, combined_feed, Video};
use crate::config::Config;
use crate::credentials::{resolve_api_key, resolve_without_keyring, ApiKey, CredentialStore, KeySource};
use crate::error::Result;
use crate::providers::{create_backends, Backends};
use crate::storage::{KeyValueStore, SledStore, VideoLibrary};
use crate::studio::{MediaStore, Studio};

use colored::Colorize;
use prettytable::{format, Table};
use std::sync::Arc;

pub mod ask;
pub mod browse;
pub mod generate;
pub mod key;
pub mod library;
pub mod shell;
pub mod shell_commands;

/// Shared state for command handlers
pub struct AppContext {
    pub config: Config,
    pub library: VideoLibrary,
    pub media: MediaStore,
    pub api_key: ApiKey,
    pub key_source: Option<KeySource>,
    pub credentials: CredentialStore,
    pub backends: Backends,
}

impl AppContext {
    /// Open storage and build the Gemini backends from `config`
    ///
    /// The key is taken from the environment or config file only; call
    /// [`AppContext::load_stored_key`] before work that needs the backend.
    pub fn new(config: Config) -> Result<Self> {
        let store: Arc<dyn KeyValueStore> = match &config.storage.path {
            Some(path) => Arc::new(SledStore::new_with_path(path)?),
            None => Arc::new(SledStore::new()?),
        };
        let media = MediaStore::from_config(&config.studio)?;

        let resolved = resolve_without_keyring(&config.gemini);
        let key_source = resolved.as_ref().map(|(_, source)| source.clone());
        let api_key = ApiKey::new(resolved.map(|(key, _)| key));

        let backends = create_backends(&config.gemini, api_key.clone())?;

        Ok(Self::with_parts(
            config,
            VideoLibrary::new(store),
            media,
            backends,
            api_key,
            key_source,
        ))
    }

    /// Assemble a context from existing parts
    pub fn with_parts(
        config: Config,
        library: VideoLibrary,
        media: MediaStore,
        backends: Backends,
        api_key: ApiKey,
        key_source: Option<KeySource>,
    ) -> Self {
        Self {
            config,
            library,
            media,
            api_key,
            key_source,
            credentials: CredentialStore::default(),
            backends,
        }
    }

    /// Fall back to the system keyring when no key is selected yet
    ///
    /// Returns `true` when a key is available afterwards.
    pub fn load_stored_key(&mut self) -> bool {
        if self.api_key.is_set() {
            return true;
        }
        if let Some((key, source)) = resolve_api_key(&self.config.gemini, &self.credentials) {
            tracing::debug!("Using API key from {}", source);
            self.api_key.set(key);
            self.key_source = Some(source);
        }
        self.api_key.is_set()
    }

    /// Library videos followed by the built-in catalog
    pub fn feed(&self) -> Result<Vec<Video>> {
        Ok(combined_feed(&self.library.get_videos()?, &builtin_catalog()))
    }

    /// New studio session; the credential counts as selected when a key is set
    pub fn studio(&self) -> Studio {
        let mut studio = Studio::new(
            self.backends.video.clone(),
            &self.config.studio,
            self.media.clone(),
            self.library.clone(),
        );
        if self.api_key.is_set() {
            studio.select_credential();
        }
        studio
    }

    /// New assistant session
    pub fn assistant(&self) -> AssistantSession {
        AssistantSession::new(self.backends.chat.clone(), self.config.assistant.clone())
    }
}

/// Print a bordered table of videos
pub fn print_video_table(videos: &[Video]) {
    let mut table = Table::new();
    table.set_format(*format::consts::FORMAT_BORDERS_ONLY);

    table.add_row(prettytable::row![
        "ID".bold(),
        "Title".bold(),
        "Creator".bold(),
        "Category".bold(),
        "Duration".bold(),
        "Views".bold()
    ]);

    for video in videos {
        let title = if video.title.chars().count() > 40 {
            format!("{}...", video.title.chars().take(37).collect::<String>())
        } else {
            video.title.clone()
        };
        let id = if video.is_user_generated() {
            video.id.magenta()
        } else {
            video.id.cyan()
        };

        table.add_row(prettytable::row![
            id,
            title,
            video.creator,
            video.category,
            video.duration,
            video.views
        ]);
    }

    table.printstd();
}

/// Print the playing view for a video
pub fn print_video_details(video: &Video) {
    println!();
    println!("{}", video.title.bold());
    println!(
        "{} • {} views • {} • {}",
        video.creator.cyan(),
        video.views,
        video.duration,
        video.category.green()
    );
    if let Some(created_at) = video.created_at {
        if let Some(when) = chrono::DateTime::from_timestamp_millis(created_at) {
            println!("Created {}", when.format("%Y-%m-%d %H:%M"));
        }
    }
    println!();
    println!("{}", video.description);
    println!();
    println!("{} {}", "Media:".bold(), video.url);
    println!("{} {}", "Thumbnail:".bold(), video.thumbnail);
}

/// Print an assistant message with at most `max_sources` citations
pub fn print_chat_message(message: &ChatMessage, max_sources: usize) {
    println!("{}: {}", message.role.colored_tag(), message.text);
    for source in message.displayed_sources(max_sources) {
        println!("  {} {} ({})", "↳".dimmed(), source.title, source.uri.blue());
    }
}
