use std::fs;
use std::path::PathBuf;
use std::sync::Arc;
use tempfile::TempDir;
use novastream::catalog::Video;
use novastream::config::GeminiConfig;
use novastream::storage::{SledStore, VideoLibrary};

#[allow(dead_code)]
pub fn create_temp_library() -> (VideoLibrary, TempDir) {
    let tmp = TempDir::new().expect("failed to create tempdir");
    let db_path = tmp.path().join("library.db");
    let store = SledStore::new_with_path(db_path).expect("failed to create sled store with path");
    (VideoLibrary::new(Arc::new(store)), tmp)
}

#[allow(dead_code)]
pub fn temp_config_file(contents: &str) -> (TempDir, PathBuf) {
    let temp_dir = TempDir::new().expect("failed to create tempdir");
    let config_path = temp_dir.path().join("config.yaml");
    fs::write(&config_path, contents).expect("failed to write config file");
    (temp_dir, config_path)
}

/// Gemini config pointing at a mock server
#[allow(dead_code)]
pub fn mock_gemini_config(server_uri: &str) -> GeminiConfig {
    GeminiConfig {
        api_key: None,
        api_base: format!("{}/v1beta", server_uri),
        chat_model: "gemini-test".to_string(),
        summary_model: "gemini-summary".to_string(),
        video_model: "veo-test".to_string(),
        request_timeout_seconds: 5,
    }
}

#[allow(dead_code)]
pub fn generated_video(id: &str, title: &str) -> Video {
    Video {
        id: id.to_string(),
        title: title.to_string(),
        thumbnail: "https://picsum.photos/seed/9/800/450".to_string(),
        url: format!("file:///tmp/{}.mp4", id),
        duration: "0:07".to_string(),
        views: "0".to_string(),
        creator: "You".to_string(),
        description: format!("AI Generated content: {}", title),
        category: "AI Generation".to_string(),
        ai_insights: None,
        is_user_generated: Some(true),
        created_at: Some(1_700_000_000_000),
    }
}
