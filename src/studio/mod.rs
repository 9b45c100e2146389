//! AI studio: text-to-video generation sessions
//!
//! A [`Studio`] owns the generation state shown to the user, runs one job at
//! a time through the [`GenerationPoller`], materializes the downloaded clip
//! and saves the resulting [`Video`] to the library.

pub mod media;
pub mod poller;

pub use media::MediaStore;
pub use poller::{
    GenerationPoller, PollOutcome, PROGRESS_MESSAGES, STATUS_INITIALIZING, STATUS_SUBMITTED,
};

use crate::catalog::Video;
use crate::config::StudioConfig;
use crate::error::{FailureKind, NovastreamError, Result};
use crate::providers::{GenerationParams, VideoGenerator};
use crate::storage::VideoLibrary;

use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;
use tokio_util::sync::CancellationToken;

/// Status shown after a successful generation
pub const STATUS_COMPLETE: &str = "Complete!";

/// Status shown after a failed generation
pub const STATUS_ERROR: &str = "Error";

/// Status shown after a cancelled generation
pub const STATUS_CANCELLED: &str = "Cancelled";

/// User-facing message for every non-credential failure
pub const GENERIC_FAILURE_MESSAGE: &str = "Failed to generate video. Please try again.";

const TITLE_MAX_CHARS: usize = 30;

/// Transient state of the studio view
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GenerationState {
    pub is_generating: bool,
    pub status: String,
    pub result_uri: Option<String>,
    pub error: Option<String>,
}

impl GenerationState {
    fn started() -> Self {
        Self {
            is_generating: true,
            ..Self::default()
        }
    }

    fn complete(uri: String) -> Self {
        Self {
            is_generating: false,
            status: STATUS_COMPLETE.to_string(),
            result_uri: Some(uri),
            error: None,
        }
    }

    fn failed(message: &str) -> Self {
        Self {
            is_generating: false,
            status: STATUS_ERROR.to_string(),
            result_uri: None,
            error: Some(message.to_string()),
        }
    }

    fn cancelled() -> Self {
        Self {
            is_generating: false,
            status: STATUS_CANCELLED.to_string(),
            result_uri: None,
            error: None,
        }
    }
}

/// One studio session
pub struct Studio {
    poller: GenerationPoller,
    media: MediaStore,
    library: VideoLibrary,
    credential_selected: bool,
    state: GenerationState,
}

impl Studio {
    /// Create a session using `config` for generation parameters and timing
    pub fn new(
        generator: Arc<dyn VideoGenerator>,
        config: &StudioConfig,
        media: MediaStore,
        library: VideoLibrary,
    ) -> Self {
        let poller = GenerationPoller::new(
            generator,
            GenerationParams::from(config),
            Duration::from_secs(config.poll_interval_seconds),
        );
        Self::with_poller(poller, media, library)
    }

    /// Create a session around an existing poller
    pub fn with_poller(poller: GenerationPoller, media: MediaStore, library: VideoLibrary) -> Self {
        Self {
            poller,
            media,
            library,
            credential_selected: false,
            state: GenerationState::default(),
        }
    }

    /// Mark a credential as selected
    pub fn select_credential(&mut self) {
        self.credential_selected = true;
    }

    pub fn credential_selected(&self) -> bool {
        self.credential_selected
    }

    pub fn state(&self) -> &GenerationState {
        &self.state
    }

    /// Receive status lines published while a job runs
    pub fn subscribe_status(&self) -> watch::Receiver<String> {
        self.poller.subscribe()
    }

    /// Generate a video from `prompt` and save it to the library
    ///
    /// On failure the state records either the generic failure message or,
    /// for an invalid credential, clears the credential-selected flag.
    ///
    /// # Errors
    ///
    /// - `InvalidInput` for a blank prompt (state untouched)
    /// - `CredentialRequired` when no credential is selected (state untouched)
    /// - the underlying job error otherwise
    pub async fn generate(&mut self, prompt: &str, cancel: &CancellationToken) -> Result<Video> {
        let prompt = prompt.trim();
        if prompt.is_empty() {
            return Err(NovastreamError::InvalidInput("prompt must not be empty".into()).into());
        }
        if !self.credential_selected {
            return Err(NovastreamError::CredentialRequired.into());
        }

        self.state = GenerationState::started();
        tracing::info!("Starting generation");

        match self.produce(prompt, cancel).await {
            Ok(video) => {
                self.state = GenerationState::complete(video.url.clone());
                Ok(video)
            }
            Err(e) => {
                match FailureKind::classify(&e) {
                    FailureKind::Credential => {
                        tracing::warn!("Generation rejected the selected credential: {:#}", e);
                        self.credential_selected = false;
                        self.state = GenerationState::failed(GENERIC_FAILURE_MESSAGE);
                    }
                    FailureKind::Cancelled => {
                        self.state = GenerationState::cancelled();
                    }
                    FailureKind::Generic => {
                        tracing::error!("Generation failed: {:#}", e);
                        self.state = GenerationState::failed(GENERIC_FAILURE_MESSAGE);
                    }
                }
                Err(e)
            }
        }
    }

    async fn produce(&self, prompt: &str, cancel: &CancellationToken) -> Result<Video> {
        let outcome = self.poller.run(prompt, cancel).await?;

        let created_at = chrono::Utc::now().timestamp_millis();
        let id = format!("user-{}", created_at);
        let uri = self.media.materialize(&id, &outcome.bytes).await?;

        let video = generated_video(id, prompt, uri, created_at, rand::random::<u32>());
        self.library.save_video(&video)?;
        Ok(video)
    }
}

/// Build the library record for a freshly generated clip
pub fn generated_video(
    id: String,
    prompt: &str,
    uri: String,
    created_at: i64,
    thumbnail_seed: u32,
) -> Video {
    Video {
        id,
        title: generated_title(prompt),
        thumbnail: format!("https://picsum.photos/seed/{}/800/450", thumbnail_seed),
        url: uri,
        duration: "0:07".to_string(),
        views: "0".to_string(),
        creator: "You".to_string(),
        description: format!("AI Generated content: {}", prompt),
        category: "AI Generation".to_string(),
        ai_insights: None,
        is_user_generated: Some(true),
        created_at: Some(created_at),
    }
}

fn generated_title(prompt: &str) -> String {
    if prompt.chars().count() > TITLE_MAX_CHARS {
        let head: String = prompt.chars().take(TITLE_MAX_CHARS).collect();
        format!("{}...", head)
    } else {
        prompt.to_string()
    }
}
