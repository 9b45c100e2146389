//! The user's library of generated videos
//!
//! Stored as one JSON array under [`STORAGE_KEY`], newest first. Every
//! mutation reads the whole list, edits it in memory, and writes it back.

use super::KeyValueStore;
use crate::catalog::Video;
use crate::error::{NovastreamError, Result};
use std::sync::Arc;

/// Key holding the JSON-encoded library
pub const STORAGE_KEY: &str = "novastream_user_videos";

/// Handle to the persisted video library
///
/// Cheap to clone; clones share the same backing store.
#[derive(Clone)]
pub struct VideoLibrary {
    store: Arc<dyn KeyValueStore>,
}

impl VideoLibrary {
    /// Wrap a key-value store
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    /// Prepend a video to the library
    ///
    /// An existing entry with the same id is dropped first, so identifiers
    /// stay unique at write time.
    pub fn save_video(&self, video: &Video) -> Result<()> {
        let mut videos = self.get_videos()?;
        videos.retain(|v| v.id != video.id);
        videos.insert(0, video.clone());
        self.write(&videos)?;

        tracing::info!(id = %video.id, total = videos.len(), "Saved video to library");
        Ok(())
    }

    /// Read the library, newest first
    ///
    /// Returns an empty list when nothing has been stored yet.
    pub fn get_videos(&self) -> Result<Vec<Video>> {
        match self.store.get(STORAGE_KEY)? {
            Some(json) => serde_json::from_str(&json).map_err(|e| {
                NovastreamError::Storage(format!("Failed to parse stored library: {}", e)).into()
            }),
            None => Ok(Vec::new()),
        }
    }

    /// Remove the video with the given id
    ///
    /// Returns `true` when an entry was removed. The list is rewritten
    /// either way.
    pub fn delete_video(&self, id: &str) -> Result<bool> {
        let mut videos = self.get_videos()?;
        let before = videos.len();
        videos.retain(|v| v.id != id);
        self.write(&videos)?;

        let removed = videos.len() != before;
        if removed {
            tracing::info!(id = %id, "Deleted video from library");
        } else {
            tracing::debug!(id = %id, "Delete requested for unknown video");
        }
        Ok(removed)
    }

    fn write(&self, videos: &[Video]) -> Result<()> {
        let json = serde_json::to_string(videos)?;
        self.store.set(STORAGE_KEY, &json)
    }
}
