//! AI smart summaries for the playing view

use crate::catalog::Video;
use crate::providers::{ChatProvider, ChatRequest};

/// Shown when the backend returns no text
pub const SUMMARY_UNAVAILABLE: &str = "Summary unavailable.";

/// Shown when the backend call fails
pub const SUMMARY_FAILED: &str = "Failed to generate AI insights.";

const SUMMARY_TEMPERATURE: f32 = 0.7;

fn summary_prompt(video: &Video) -> String {
    format!(
        "Provide a creative and engaging summary for this video titled \"{}\". \
         Description: {}. The category is {}. \
         Imagine you are an expert film critic. Keep it under 150 words.",
        video.title, video.description, video.category
    )
}

/// Ask the chat backend for a film-critic style summary of `video`
///
/// Never fails: errors and empty answers map to fixed placeholder text.
pub async fn summarize(chat: &dyn ChatProvider, model: &str, video: &Video) -> String {
    let request = ChatRequest::new(summary_prompt(video))
        .with_temperature(SUMMARY_TEMPERATURE)
        .with_model(model);

    match chat.generate(&request).await {
        Ok(reply) if reply.text.is_empty() => SUMMARY_UNAVAILABLE.to_string(),
        Ok(reply) => reply.text,
        Err(e) => {
            tracing::error!(id = %video.id, "Error fetching summary: {:#}", e);
            SUMMARY_FAILED.to_string()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::builtin_catalog;
    use crate::providers::FakeChatProvider;

    #[tokio::test]
    async fn test_summary_request_shape() {
        let fake = FakeChatProvider::text("A luminous journey.");
        let catalog = builtin_catalog();
        let video = &catalog[0];

        let summary = summarize(&fake, "gemini-summary", video).await;
        assert_eq!(summary, "A luminous journey.");

        let requests = fake.requests();
        let request = &requests[0];
        assert_eq!(request.temperature, Some(0.7));
        assert_eq!(request.model.as_deref(), Some("gemini-summary"));
        assert!(!request.web_search);
        assert!(request.prompt.contains(&video.title));
        assert!(request.prompt.contains("Keep it under 150 words."));
    }

    #[tokio::test]
    async fn test_summary_placeholders() {
        let catalog = builtin_catalog();
        let video = &catalog[0];
        assert_eq!(
            summarize(&FakeChatProvider::text(""), "m", video).await,
            SUMMARY_UNAVAILABLE
        );
        assert_eq!(
            summarize(&FakeChatProvider::failing("down"), "m", video).await,
            SUMMARY_FAILED
        );
    }
}
