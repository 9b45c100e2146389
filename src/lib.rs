//! NovaStream - video streaming with an AI assistant and a generation studio
//!
//! This library provides the core functionality behind the `novastream` CLI:
//! the video catalog and search filter, the persisted library of generated
//! videos, the long-running text-to-video job poller, and the grounded chat
//! assistant.
//!
//! # Architecture
//!
//! The library is organized into the following modules:
//!
//! - `catalog`: Video records, the built-in catalog, and the search filter
//! - `storage`: Key-value persistence and the user's video library
//! - `providers`: Backend traits plus the Gemini implementation and fakes
//! - `studio`: Generation poller, media materialization, studio sessions
//! - `assistant`: Grounded chat sessions and AI smart summaries
//! - `view`: Application views and navigation state
//! - `credentials`: API key selection and keyring storage
//! - `config`: Configuration management and validation
//! - `error`: Error types and failure classification
//! - `cli`: Command-line interface definition
//!
//! # Example
//!
//! ```no_run
//! use novastream::catalog::{builtin_catalog, filter_videos};
//!
//! let catalog = builtin_catalog();
//! for video in filter_videos(&catalog, "nature") {
//!     println!("{} - {}", video.id, video.title);
//! }
//! ```

pub mod assistant;
pub mod catalog;
pub mod cli;
pub mod commands;
pub mod config;
pub mod credentials;
pub mod error;
pub mod logging;
pub mod providers;
pub mod storage;
pub mod studio;
pub mod view;

// Re-export commonly used types
pub use catalog::Video;
pub use config::Config;
pub use error::{NovastreamError, Result};
pub use studio::{GenerationPoller, GenerationState, Studio};
pub use view::{AppView, ViewRouter};

#[cfg(test)]
pub mod test_utils;
