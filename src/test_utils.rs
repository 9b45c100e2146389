//! Test utilities for NovaStream
//!
//! Temporary directories, in-memory libraries, sample videos, and error
//! assertions shared by unit tests.

use crate::catalog::Video;
use crate::config::Config;
use crate::storage::{MemoryStore, VideoLibrary};
use std::sync::Arc;
use tempfile::TempDir;

/// Create a temporary directory for testing
pub fn temp_dir() -> TempDir {
    TempDir::new().expect("Failed to create temporary directory")
}

/// Library backed by a fresh in-memory store
pub fn memory_library() -> VideoLibrary {
    VideoLibrary::new(Arc::new(MemoryStore::new()))
}

/// A user-generated video with the given id
pub fn sample_video(id: &str) -> Video {
    Video {
        id: id.to_string(),
        title: format!("Generated {}", id),
        thumbnail: "https://picsum.photos/seed/1/800/450".to_string(),
        url: format!("file:///tmp/{}.mp4", id),
        duration: "0:07".to_string(),
        views: "0".to_string(),
        creator: "You".to_string(),
        description: format!("AI Generated content: clip {}", id),
        category: "AI Generation".to_string(),
        ai_insights: None,
        is_user_generated: Some(true),
        created_at: Some(1_700_000_000_000),
    }
}

/// Assert that an error's message chain contains `expected`
///
/// # Panics
///
/// Panics if the result is Ok or if no error in the chain contains the text
pub fn assert_error_contains<T>(result: anyhow::Result<T>, expected: &str) {
    match result {
        Ok(_) => panic!("Expected error containing '{}' but got Ok", expected),
        Err(e) => {
            let error_msg = format!("{:#}", e);
            assert!(
                error_msg.contains(expected),
                "Error message '{}' does not contain '{}'",
                error_msg,
                expected
            );
        }
    }
}

/// Create a test configuration YAML string
pub fn test_config_yaml() -> String {
    r#"
gemini:
  api_base: http://localhost:9999/v1beta
  chat_model: gemini-test
  video_model: veo-test
studio:
  poll_interval_seconds: 1
  resolution: 1080p
  aspect_ratio: "9:16"
assistant:
  max_displayed_sources: 3
logging:
  level: novastream=debug
"#
    .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::NovastreamError;

    #[test]
    fn test_memory_library_round_trip() {
        let library = memory_library();
        library.save_video(&sample_video("user-1")).unwrap();
        assert_eq!(library.get_videos().unwrap()[0], sample_video("user-1"));
    }

    #[test]
    fn test_assert_error_contains_success() {
        let result: anyhow::Result<()> =
            Err(NovastreamError::Config("test error message".to_string()).into());
        assert_error_contains(result, "test error");
    }

    #[test]
    #[should_panic(expected = "Expected error containing")]
    fn test_assert_error_contains_ok() {
        assert_error_contains(Ok(()), "error");
    }

    #[test]
    fn test_test_config_yaml_parses_and_validates() {
        let config: Config = serde_yaml::from_str(&test_config_yaml()).unwrap();
        assert_eq!(config.gemini.video_model, "veo-test");
        assert_eq!(config.studio.resolution, "1080p");
        assert_eq!(config.assistant.max_displayed_sources, 3);
        assert_eq!(config.studio.number_of_videos, 1);
        assert!(config.validate().is_ok());
        assert!(temp_dir().path().exists());
    }
}
