//! Gemini provider implementation for NovaStream
//!
//! Talks to the Gemini REST API: `predictLongRunning` plus operation polling
//! for text-to-video generation, and `generateContent` with the
//! `google_search` tool for grounded answers. The API key is passed as the
//! `key` query parameter, including on media downloads.

use crate::config::GeminiConfig;
use crate::credentials::ApiKey;
use crate::error::{NovastreamError, Result};
use crate::providers::{
    ChatProvider, ChatReply, ChatRequest, GenerationParams, Operation, OperationError, SourceLink,
    VideoGenerator,
};

use async_trait::async_trait;
use reqwest::{Client, Response};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use url::Url;

/// Gemini API provider
///
/// # Examples
///
/// ```
/// use novastream::config::GeminiConfig;
/// use novastream::credentials::ApiKey;
/// use novastream::providers::GeminiProvider;
///
/// let provider = GeminiProvider::new(GeminiConfig::default(), ApiKey::new(None));
/// assert!(provider.is_ok());
/// ```
pub struct GeminiProvider {
    client: Client,
    config: GeminiConfig,
    api_key: ApiKey,
}

/// Request body for `models/{model}:predictLongRunning`
#[derive(Debug, Serialize)]
struct PredictRequest<'a> {
    instances: Vec<PredictInstance<'a>>,
    parameters: PredictParameters<'a>,
}

#[derive(Debug, Serialize)]
struct PredictInstance<'a> {
    prompt: &'a str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct PredictParameters<'a> {
    sample_count: u32,
    resolution: &'a str,
    aspect_ratio: &'a str,
}

/// Long-running operation as returned by submit and poll
#[derive(Debug, Deserialize)]
struct GeminiOperation {
    name: String,
    #[serde(default)]
    done: bool,
    #[serde(default)]
    response: Option<GeminiOperationResponse>,
    #[serde(default)]
    error: Option<OperationError>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GeminiOperationResponse {
    #[serde(default)]
    generate_video_response: Option<GenerateVideoResponse>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GenerateVideoResponse {
    #[serde(default)]
    generated_samples: Vec<GeneratedSample>,
}

#[derive(Debug, Deserialize)]
struct GeneratedSample {
    #[serde(default)]
    video: Option<GeneratedVideo>,
}

#[derive(Debug, Deserialize)]
struct GeneratedVideo {
    #[serde(default)]
    uri: Option<String>,
}

impl From<GeminiOperation> for Operation {
    fn from(op: GeminiOperation) -> Self {
        let video_uri = op
            .response
            .and_then(|r| r.generate_video_response)
            .and_then(|r| r.generated_samples.into_iter().next())
            .and_then(|s| s.video)
            .and_then(|v| v.uri)
            .filter(|uri| !uri.is_empty());

        Operation {
            name: op.name,
            done: op.done,
            video_uri,
            error: op.error,
        }
    }
}

/// Request body for `models/{model}:generateContent`
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest<'a> {
    contents: Vec<Content<'a>>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    tools: Vec<Tool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    system_instruction: Option<SystemInstruction<'a>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    generation_config: Option<GenerationConfig>,
}

#[derive(Debug, Serialize)]
struct Content<'a> {
    role: &'a str,
    parts: Vec<TextPart<'a>>,
}

#[derive(Debug, Serialize)]
struct TextPart<'a> {
    text: &'a str,
}

#[derive(Debug, Serialize)]
struct SystemInstruction<'a> {
    parts: Vec<TextPart<'a>>,
}

#[derive(Debug, Serialize)]
struct Tool {
    google_search: serde_json::Value,
}

#[derive(Debug, Serialize)]
struct GenerationConfig {
    temperature: f32,
}

#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Candidate {
    #[serde(default)]
    content: Option<CandidateContent>,
    #[serde(default)]
    grounding_metadata: Option<GroundingMetadata>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Debug, Deserialize)]
struct CandidatePart {
    #[serde(default)]
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GroundingMetadata {
    #[serde(default)]
    grounding_chunks: Vec<GroundingChunk>,
}

#[derive(Debug, Deserialize)]
struct GroundingChunk {
    #[serde(default)]
    web: Option<WebChunk>,
}

#[derive(Debug, Deserialize)]
struct WebChunk {
    #[serde(default)]
    uri: String,
    #[serde(default)]
    title: String,
}

impl From<GenerateContentResponse> for ChatReply {
    fn from(response: GenerateContentResponse) -> Self {
        let Some(candidate) = response.candidates.into_iter().next() else {
            return ChatReply::default();
        };

        let text = candidate
            .content
            .map(|c| {
                c.parts
                    .into_iter()
                    .filter_map(|p| p.text)
                    .collect::<Vec<_>>()
                    .join("")
            })
            .unwrap_or_default();

        let citations = candidate
            .grounding_metadata
            .map(|m| {
                m.grounding_chunks
                    .into_iter()
                    .filter_map(|chunk| chunk.web)
                    .map(|web| SourceLink {
                        title: web.title,
                        uri: web.uri,
                    })
                    .collect()
            })
            .unwrap_or_default();

        ChatReply { text, citations }
    }
}

/// Error envelope returned by the API on non-2xx responses
#[derive(Debug, Deserialize)]
struct ApiErrorEnvelope {
    error: OperationError,
}

impl GeminiProvider {
    /// Create a new Gemini provider
    ///
    /// # Errors
    ///
    /// Returns error if HTTP client initialization fails
    pub fn new(config: GeminiConfig, api_key: ApiKey) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_seconds))
            .user_agent(concat!("novastream/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| NovastreamError::Provider(format!("Failed to create HTTP client: {}", e)))?;

        tracing::info!(
            "Initialized Gemini provider: api_base={}, video_model={}, chat_model={}",
            config.api_base,
            config.video_model,
            config.chat_model
        );

        Ok(Self {
            client,
            config,
            api_key,
        })
    }

    /// Configured API base URL
    pub fn api_base(&self) -> &str {
        self.config.api_base.trim_end_matches('/')
    }

    fn key(&self) -> Result<String> {
        self.api_key
            .get()
            .ok_or_else(|| NovastreamError::MissingCredentials("gemini".to_string()).into())
    }

    /// Turn a non-2xx response into a provider error carrying the API message
    async fn check_status(response: Response) -> Result<Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        let message = serde_json::from_str::<ApiErrorEnvelope>(&body)
            .map(|envelope| envelope.error.message)
            .unwrap_or(body);

        tracing::error!("Gemini returned error {}: {}", status, message);
        Err(NovastreamError::Provider(format!("Gemini returned error {}: {}", status, message)).into())
    }

    /// Append the `key` query parameter to a download reference
    fn authorized_download_url(&self, uri: &str) -> Result<Url> {
        let mut url = Url::parse(uri)
            .map_err(|e| NovastreamError::Provider(format!("Invalid download URI {}: {}", uri, e)))?;
        url.query_pairs_mut().append_pair("key", &self.key()?);
        Ok(url)
    }
}

#[async_trait]
impl VideoGenerator for GeminiProvider {
    async fn submit(&self, prompt: &str, params: &GenerationParams) -> Result<Operation> {
        let url = format!(
            "{}/models/{}:predictLongRunning",
            self.api_base(),
            self.config.video_model
        );
        let body = PredictRequest {
            instances: vec![PredictInstance { prompt }],
            parameters: PredictParameters {
                sample_count: params.number_of_videos,
                resolution: &params.resolution,
                aspect_ratio: &params.aspect_ratio,
            },
        };

        tracing::debug!("Submitting generation request to {}", url);
        let response = self
            .client
            .post(&url)
            .query(&[("key", self.key()?)])
            .json(&body)
            .send()
            .await
            .map_err(|e| NovastreamError::Provider(format!("Generation request failed: {}", e)))?;

        let op: GeminiOperation = Self::check_status(response)
            .await?
            .json()
            .await
            .map_err(|e| NovastreamError::Provider(format!("Failed to parse operation: {}", e)))?;

        tracing::info!(operation = %op.name, "Generation submitted");
        Ok(op.into())
    }

    async fn poll(&self, operation: &Operation) -> Result<Operation> {
        let url = format!("{}/{}", self.api_base(), operation.name);

        let response = self
            .client
            .get(&url)
            .query(&[("key", self.key()?)])
            .send()
            .await
            .map_err(|e| NovastreamError::Provider(format!("Operation poll failed: {}", e)))?;

        let op: GeminiOperation = Self::check_status(response)
            .await?
            .json()
            .await
            .map_err(|e| NovastreamError::Provider(format!("Failed to parse operation: {}", e)))?;

        Ok(op.into())
    }

    async fn download(&self, uri: &str) -> Result<Vec<u8>> {
        let url = self.authorized_download_url(uri)?;

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| NovastreamError::Provider(format!("Media download failed: {}", e)))?;

        let bytes = Self::check_status(response).await?.bytes().await?;
        tracing::debug!("Downloaded {} bytes of generated media", bytes.len());
        Ok(bytes.to_vec())
    }
}

#[async_trait]
impl ChatProvider for GeminiProvider {
    async fn generate(&self, request: &ChatRequest) -> Result<ChatReply> {
        let model = request.model.as_deref().unwrap_or(&self.config.chat_model);
        let url = format!("{}/models/{}:generateContent", self.api_base(), model);

        let body = GenerateContentRequest {
            contents: vec![Content {
                role: "user",
                parts: vec![TextPart {
                    text: &request.prompt,
                }],
            }],
            tools: if request.web_search {
                vec![Tool {
                    google_search: serde_json::json!({}),
                }]
            } else {
                Vec::new()
            },
            system_instruction: request
                .system_instruction
                .as_deref()
                .map(|text| SystemInstruction {
                    parts: vec![TextPart { text }],
                }),
            generation_config: request
                .temperature
                .map(|temperature| GenerationConfig { temperature }),
        };

        tracing::debug!(model = %model, web_search = request.web_search, "Sending chat request");
        let response = self
            .client
            .post(&url)
            .query(&[("key", self.key()?)])
            .json(&body)
            .send()
            .await
            .map_err(|e| NovastreamError::Provider(format!("Chat request failed: {}", e)))?;

        let parsed: GenerateContentResponse = Self::check_status(response)
            .await?
            .json()
            .await
            .map_err(|e| NovastreamError::Provider(format!("Failed to parse chat response: {}", e)))?;

        Ok(parsed.into())
    }
}
