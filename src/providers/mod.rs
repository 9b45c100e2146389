//! Provider module for NovaStream
//!
//! This module contains the backend abstractions for video generation and
//! grounded chat, the Gemini implementation, and scripted fakes.

pub mod base;
pub mod fake;
pub mod gemini;

pub use base::{
    ChatProvider, ChatReply, ChatRequest, GenerationParams, Operation, OperationError, SourceLink,
    VideoGenerator,
};
pub use fake::{FakeChatProvider, FakeOutcome, FakeVideoGenerator};
pub use gemini::GeminiProvider;

use crate::config::GeminiConfig;
use crate::credentials::ApiKey;
use crate::error::Result;
use std::sync::Arc;

/// Backends shared by the studio, the assistant, and the summary helper
#[derive(Clone)]
pub struct Backends {
    /// Video generation backend
    pub video: Arc<dyn VideoGenerator>,
    /// Chat backend
    pub chat: Arc<dyn ChatProvider>,
}

/// Create the Gemini-backed provider pair
///
/// Both trait objects point at the same provider instance, so they share
/// one HTTP client and the same key handle.
///
/// # Errors
///
/// Returns error if provider initialization fails
pub fn create_backends(config: &GeminiConfig, api_key: ApiKey) -> Result<Backends> {
    let provider = Arc::new(GeminiProvider::new(config.clone(), api_key)?);
    Ok(Backends {
        video: provider.clone(),
        chat: provider,
    })
}
