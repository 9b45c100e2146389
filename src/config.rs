//! Configuration management for NovaStream
//!
//! This module handles loading, parsing, validating, and managing
//! configuration from files, environment variables, and CLI overrides.

use crate::error::{NovastreamError, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Main configuration structure for NovaStream
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    /// Gemini API settings shared by the studio and the assistant
    #[serde(default)]
    pub gemini: GeminiConfig,

    /// Video generation studio settings
    #[serde(default)]
    pub studio: StudioConfig,

    /// Assistant chat settings
    #[serde(default)]
    pub assistant: AssistantConfig,

    /// Library storage settings
    #[serde(default)]
    pub storage: StorageConfig,

    /// Logging settings
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Gemini API configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeminiConfig {
    /// API key (prefer `GEMINI_API_KEY` or the keyring over storing it here)
    #[serde(default)]
    pub api_key: Option<String>,

    /// Base URL of the Gemini REST API (overridable for tests and mocks)
    #[serde(default = "default_api_base")]
    pub api_base: String,

    /// Model used by the grounded assistant
    #[serde(default = "default_chat_model")]
    pub chat_model: String,

    /// Model used for smart summaries in the player view
    #[serde(default = "default_chat_model")]
    pub summary_model: String,

    /// Model used for text-to-video generation
    #[serde(default = "default_video_model")]
    pub video_model: String,

    /// Per-request HTTP timeout in seconds
    #[serde(default = "default_request_timeout")]
    pub request_timeout_seconds: u64,
}

fn default_api_base() -> String {
    "https://generativelanguage.googleapis.com/v1beta".to_string()
}

fn default_chat_model() -> String {
    "gemini-3-flash-preview".to_string()
}

fn default_video_model() -> String {
    "veo-3.1-fast-generate-preview".to_string()
}

fn default_request_timeout() -> u64 {
    120
}

impl Default for GeminiConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            api_base: default_api_base(),
            chat_model: default_chat_model(),
            summary_model: default_chat_model(),
            video_model: default_video_model(),
            request_timeout_seconds: default_request_timeout(),
        }
    }
}

/// Studio (video generation) configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StudioConfig {
    /// Seconds to wait between operation polls
    #[serde(default = "default_poll_interval")]
    pub poll_interval_seconds: u64,

    /// Output resolution ("720p" or "1080p")
    #[serde(default = "default_resolution")]
    pub resolution: String,

    /// Output aspect ratio ("16:9" or "9:16")
    #[serde(default = "default_aspect_ratio")]
    pub aspect_ratio: String,

    /// Number of videos requested per generation (must be 1)
    #[serde(default = "default_number_of_videos")]
    pub number_of_videos: u32,

    /// Directory that receives downloaded media (defaults to the data dir)
    #[serde(default)]
    pub media_dir: Option<PathBuf>,
}

fn default_poll_interval() -> u64 {
    10
}

fn default_resolution() -> String {
    "720p".to_string()
}

fn default_aspect_ratio() -> String {
    "16:9".to_string()
}

fn default_number_of_videos() -> u32 {
    1
}

impl Default for StudioConfig {
    fn default() -> Self {
        Self {
            poll_interval_seconds: default_poll_interval(),
            resolution: default_resolution(),
            aspect_ratio: default_aspect_ratio(),
            number_of_videos: default_number_of_videos(),
            media_dir: None,
        }
    }
}

/// Assistant configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssistantConfig {
    /// System instruction sent with every question
    #[serde(default = "default_system_instruction")]
    pub system_instruction: String,

    /// First message shown in a new session
    #[serde(default = "default_greeting")]
    pub greeting: String,

    /// Enable the web search grounding tool
    #[serde(default = "default_web_search")]
    pub web_search: bool,

    /// Maximum number of sources rendered under a reply
    #[serde(default = "default_max_displayed_sources")]
    pub max_displayed_sources: usize,
}

fn default_system_instruction() -> String {
    "You are a helpful video streaming expert assistant. Provide concise, helpful answers about media, technology, and creators.".to_string()
}

fn default_greeting() -> String {
    "Hello! I am your NovaStream AI Assistant. Ask me anything about videos, creators, or trending tech.".to_string()
}

fn default_web_search() -> bool {
    true
}

fn default_max_displayed_sources() -> usize {
    2
}

impl Default for AssistantConfig {
    fn default() -> Self {
        Self {
            system_instruction: default_system_instruction(),
            greeting: default_greeting(),
            web_search: default_web_search(),
            max_displayed_sources: default_max_displayed_sources(),
        }
    }
}

/// Library storage configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct StorageConfig {
    /// Path of the library database (defaults to the user data directory)
    #[serde(default)]
    pub path: Option<PathBuf>,
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Enable JSON-formatted logs
    #[serde(default)]
    pub json_format: bool,

    /// Log file path (if None, stderr only)
    #[serde(default)]
    pub file_path: Option<PathBuf>,
}

fn default_log_level() -> String {
    "novastream=info".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            json_format: false,
            file_path: None,
        }
    }
}

const VALID_RESOLUTIONS: [&str; 2] = ["720p", "1080p"];
const VALID_ASPECT_RATIOS: [&str; 2] = ["16:9", "9:16"];

impl Config {
    /// Load configuration from file with environment and CLI overrides
    ///
    /// # Errors
    ///
    /// Returns error if the file exists but cannot be read or parsed
    pub fn load(path: &str, cli: &crate::cli::Cli) -> Result<Self> {
        let mut config = if Path::new(path).exists() {
            Self::from_file(path)?
        } else {
            tracing::warn!("Config file not found at {}, using defaults", path);
            Self::default()
        };

        config.apply_env_vars();
        config.apply_cli_overrides(cli);

        Ok(config)
    }

    fn from_file(path: &str) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| NovastreamError::Config(format!("Failed to read config file: {}", e)))?;
        serde_yaml::from_str(&contents)
            .map_err(|e| NovastreamError::Config(format!("Failed to parse config: {}", e)).into())
    }

    fn apply_env_vars(&mut self) {
        if let Ok(api_base) = std::env::var("NOVASTREAM_API_BASE") {
            self.gemini.api_base = api_base;
        }

        if let Ok(model) = std::env::var("NOVASTREAM_CHAT_MODEL") {
            self.gemini.chat_model = model;
        }

        if let Ok(model) = std::env::var("NOVASTREAM_VIDEO_MODEL") {
            self.gemini.video_model = model;
        }

        if let Ok(interval) = std::env::var("NOVASTREAM_POLL_INTERVAL_SECONDS") {
            match interval.parse() {
                Ok(value) => self.studio.poll_interval_seconds = value,
                Err(_) => tracing::warn!("Invalid NOVASTREAM_POLL_INTERVAL_SECONDS: {}", interval),
            }
        }

        if let Ok(media_dir) = std::env::var("NOVASTREAM_MEDIA_DIR") {
            self.studio.media_dir = Some(PathBuf::from(media_dir));
        }

        if let Ok(path) = std::env::var("NOVASTREAM_STORAGE_PATH") {
            tracing::debug!(path = %path, "Env override: NOVASTREAM_STORAGE_PATH");
            self.storage.path = Some(PathBuf::from(path));
        }

        if let Ok(level) = std::env::var("NOVASTREAM_LOG_LEVEL") {
            self.logging.level = level;
        }

        if let Ok(json_logs) = std::env::var("NOVASTREAM_JSON_LOGS") {
            match json_logs.parse::<bool>() {
                Ok(v) => self.logging.json_format = v,
                Err(_) => tracing::warn!("Invalid value for NOVASTREAM_JSON_LOGS: {}", json_logs),
            }
        }
    }

    fn apply_cli_overrides(&mut self, cli: &crate::cli::Cli) {
        if let Some(path) = &cli.storage_path {
            self.storage.path = Some(PathBuf::from(path));
        }

        if cli.verbose {
            self.logging.level = "novastream=debug".to_string();
        }
    }

    /// Validate the configuration
    ///
    /// # Errors
    ///
    /// Returns error if any validation check fails
    pub fn validate(&self) -> Result<()> {
        if self.gemini.api_base.trim().is_empty() {
            return Err(NovastreamError::Config("gemini.api_base cannot be empty".to_string()).into());
        }

        for (name, model) in [
            ("gemini.chat_model", &self.gemini.chat_model),
            ("gemini.summary_model", &self.gemini.summary_model),
            ("gemini.video_model", &self.gemini.video_model),
        ] {
            if model.trim().is_empty() {
                return Err(NovastreamError::Config(format!("{} cannot be empty", name)).into());
            }
        }

        if self.gemini.request_timeout_seconds == 0 {
            return Err(NovastreamError::Config(
                "gemini.request_timeout_seconds must be greater than 0".to_string(),
            )
            .into());
        }

        if self.studio.poll_interval_seconds == 0 {
            return Err(NovastreamError::Config(
                "studio.poll_interval_seconds must be greater than 0".to_string(),
            )
            .into());
        }

        if self.studio.number_of_videos != 1 {
            return Err(NovastreamError::Config(
                "studio.number_of_videos must be 1".to_string(),
            )
            .into());
        }

        if !VALID_RESOLUTIONS.contains(&self.studio.resolution.as_str()) {
            return Err(NovastreamError::Config(format!(
                "Invalid studio.resolution: {}. Must be one of: {}",
                self.studio.resolution,
                VALID_RESOLUTIONS.join(", ")
            ))
            .into());
        }

        if !VALID_ASPECT_RATIOS.contains(&self.studio.aspect_ratio.as_str()) {
            return Err(NovastreamError::Config(format!(
                "Invalid studio.aspect_ratio: {}. Must be one of: {}",
                self.studio.aspect_ratio,
                VALID_ASPECT_RATIOS.join(", ")
            ))
            .into());
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.gemini.video_model, "veo-3.1-fast-generate-preview");
        assert_eq!(config.studio.poll_interval_seconds, 10);
        assert_eq!(config.studio.resolution, "720p");
        assert_eq!(config.studio.aspect_ratio, "16:9");
        assert_eq!(config.assistant.max_displayed_sources, 2);
    }

    #[test]
    fn test_config_validation_success() {
        assert!(Config::default().validate().is_ok());
    }

    #[test]
    fn test_config_validation_zero_poll_interval() {
        let mut config = Config::default();
        config.studio.poll_interval_seconds = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_config_validation_multiple_videos() {
        let mut config = Config::default();
        config.studio.number_of_videos = 2;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_config_validation_bad_resolution() {
        let mut config = Config::default();
        config.studio.resolution = "4k".to_string();
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("studio.resolution"));
    }

    #[test]
    fn test_config_validation_empty_model() {
        let mut config = Config::default();
        config.gemini.video_model = " ".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_config_from_yaml() {
        let yaml = r#"
gemini:
  api_base: http://localhost:9000/v1beta
  video_model: veo-test
studio:
  poll_interval_seconds: 3
  aspect_ratio: "9:16"
assistant:
  web_search: false
logging:
  level: debug
  json_format: true
"#;

        let config: Config = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.gemini.api_base, "http://localhost:9000/v1beta");
        assert_eq!(config.gemini.video_model, "veo-test");
        assert_eq!(config.gemini.chat_model, "gemini-3-flash-preview");
        assert_eq!(config.studio.poll_interval_seconds, 3);
        assert_eq!(config.studio.aspect_ratio, "9:16");
        assert_eq!(config.studio.resolution, "720p");
        assert!(!config.assistant.web_search);
        assert!(config.logging.json_format);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_sample_config_file_is_valid() {
        let path = concat!(env!("CARGO_MANIFEST_DIR"), "/config/config.yaml");
        let config = Config::from_file(path).unwrap();
        assert_eq!(config.studio.poll_interval_seconds, 10);
        assert!(config.gemini.api_key.is_none());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_load_nonexistent_file_uses_defaults() {
        let cli = crate::cli::Cli::try_parse_from(["novastream", "browse"]).unwrap();
        let config = Config::load("nonexistent.yaml", &cli).unwrap();
        assert_eq!(config.studio.poll_interval_seconds, 10);
    }

    #[test]
    fn test_cli_storage_override() {
        let cli = crate::cli::Cli::try_parse_from([
            "novastream",
            "--storage-path",
            "/tmp/novastream-test.db",
            "library",
            "list",
        ])
        .unwrap();
        let config = Config::load("nonexistent.yaml", &cli).unwrap();
        assert_eq!(
            config.storage.path,
            Some(PathBuf::from("/tmp/novastream-test.db"))
        );
    }

    #[test]
    #[serial_test::serial]
    fn test_apply_env_vars_overrides_studio_fields() {
        std::env::set_var("NOVASTREAM_POLL_INTERVAL_SECONDS", "4");
        std::env::set_var("NOVASTREAM_API_BASE", "http://127.0.0.1:1/v1beta");

        let mut cfg = Config::default();
        cfg.apply_env_vars();

        assert_eq!(cfg.studio.poll_interval_seconds, 4);
        assert_eq!(cfg.gemini.api_base, "http://127.0.0.1:1/v1beta");

        std::env::remove_var("NOVASTREAM_POLL_INTERVAL_SECONDS");
        std::env::remove_var("NOVASTREAM_API_BASE");
    }
}
