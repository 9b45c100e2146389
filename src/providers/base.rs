//! Backend traits and common types for NovaStream
//!
//! This module defines the two seams to the hosted model service: the
//! [`VideoGenerator`] long-running operation API used by the studio and the
//! [`ChatProvider`] grounded completion API used by the assistant.

use crate::config::StudioConfig;
use crate::error::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Fixed parameters sent with every generation request
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationParams {
    /// Number of videos to produce (always 1)
    pub number_of_videos: u32,
    /// Output resolution, e.g. "720p"
    pub resolution: String,
    /// Output aspect ratio, e.g. "16:9"
    pub aspect_ratio: String,
}

impl Default for GenerationParams {
    fn default() -> Self {
        Self::from(&StudioConfig::default())
    }
}

impl From<&StudioConfig> for GenerationParams {
    fn from(config: &StudioConfig) -> Self {
        Self {
            number_of_videos: config.number_of_videos,
            resolution: config.resolution.clone(),
            aspect_ratio: config.aspect_ratio.clone(),
        }
    }
}

/// Error payload carried by a finished operation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OperationError {
    /// Backend status code, when reported
    #[serde(default)]
    pub code: Option<i64>,
    /// Backend message
    #[serde(default)]
    pub message: String,
}

/// Handle to a remote long-running generation job
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Operation {
    /// Opaque operation name used to query the job again
    pub name: String,
    /// True once the backend stops working on the job
    pub done: bool,
    /// Download reference of the first generated video, once done
    pub video_uri: Option<String>,
    /// Error reported by the backend, once done
    pub error: Option<OperationError>,
}

impl Operation {
    /// A handle the backend is still working on
    pub fn pending(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            done: false,
            video_uri: None,
            error: None,
        }
    }

    /// A finished handle carrying a download reference
    pub fn completed(name: impl Into<String>, video_uri: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            done: true,
            video_uri: Some(video_uri.into()),
            error: None,
        }
    }
}

/// Source citation attached to a grounded answer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceLink {
    /// Page title
    pub title: String,
    /// Page URI
    pub uri: String,
}

/// A single-turn request to the chat backend
#[derive(Debug, Clone, PartialEq)]
pub struct ChatRequest {
    /// User text
    pub prompt: String,
    /// System instruction, if any
    pub system_instruction: Option<String>,
    /// Enable the web search grounding tool
    pub web_search: bool,
    /// Sampling temperature, provider default when `None`
    pub temperature: Option<f32>,
    /// Model override, provider's chat model when `None`
    pub model: Option<String>,
}

impl ChatRequest {
    /// Plain request with no tools, instruction, or overrides
    ///
    /// # Examples
    ///
    /// ```
    /// use novastream::providers::ChatRequest;
    ///
    /// let req = ChatRequest::new("Hello").with_web_search(true);
    /// assert_eq!(req.prompt, "Hello");
    /// assert!(req.web_search);
    /// ```
    pub fn new(prompt: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
            system_instruction: None,
            web_search: false,
            temperature: None,
            model: None,
        }
    }

    /// Set the system instruction
    pub fn with_system_instruction(mut self, instruction: impl Into<String>) -> Self {
        self.system_instruction = Some(instruction.into());
        self
    }

    /// Toggle web search grounding
    pub fn with_web_search(mut self, enabled: bool) -> Self {
        self.web_search = enabled;
        self
    }

    /// Set the sampling temperature
    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = Some(temperature);
        self
    }

    /// Override the model
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = Some(model.into());
        self
    }
}

/// Reply from the chat backend
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChatReply {
    /// Answer text (may be empty)
    pub text: String,
    /// Web sources used to ground the answer
    pub citations: Vec<SourceLink>,
}

/// Long-running video generation backend
#[async_trait]
pub trait VideoGenerator: Send + Sync {
    /// Start a generation job and return its handle
    async fn submit(&self, prompt: &str, params: &GenerationParams) -> Result<Operation>;

    /// Query the current state of a job
    async fn poll(&self, operation: &Operation) -> Result<Operation>;

    /// Fetch the bytes behind a finished job's download reference
    async fn download(&self, uri: &str) -> Result<Vec<u8>>;
}

/// Search-grounded chat completion backend
#[async_trait]
pub trait ChatProvider: Send + Sync {
    /// Answer a single request
    async fn generate(&self, request: &ChatRequest) -> Result<ChatReply>;
}
