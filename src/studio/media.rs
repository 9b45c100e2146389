//! Materialization of downloaded media
//!
//! Generated clips are written to the media directory as `<id>.mp4` and
//! addressed by `file://` URIs.

use crate::config::StudioConfig;
use crate::error::{NovastreamError, Result};
use crate::storage::data_dir;

use std::path::{Path, PathBuf};
use url::Url;

/// Directory holding generated media files
#[derive(Debug, Clone)]
pub struct MediaStore {
    dir: PathBuf,
}

impl MediaStore {
    /// Use `dir` for media files
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Use `studio.media_dir`, or `<data dir>/media` when unset
    pub fn from_config(config: &StudioConfig) -> Result<Self> {
        let dir = match &config.media_dir {
            Some(dir) => dir.clone(),
            None => data_dir()?.join("media"),
        };
        Ok(Self::new(dir))
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Write `bytes` as `<id>.mp4` and return its `file://` URI
    pub async fn materialize(&self, id: &str, bytes: &[u8]) -> Result<String> {
        tokio::fs::create_dir_all(&self.dir).await?;
        let dir = tokio::fs::canonicalize(&self.dir).await?;
        let path = dir.join(format!("{}.mp4", id));

        tokio::fs::write(&path, bytes).await?;
        tracing::debug!("Wrote {} bytes to {}", bytes.len(), path.display());

        Url::from_file_path(&path)
            .map(String::from)
            .map_err(|_| {
                NovastreamError::Storage(format!("Cannot build file URI for {}", path.display()))
                    .into()
            })
    }

    /// Delete the file behind a `file://` URI if it lives in this store
    ///
    /// Returns `true` when a file was removed. Other URIs are ignored.
    pub fn remove(&self, uri: &str) -> Result<bool> {
        let Some(path) = Url::parse(uri)
            .ok()
            .filter(|url| url.scheme() == "file")
            .and_then(|url| url.to_file_path().ok())
        else {
            return Ok(false);
        };

        let Ok(dir) = self.dir.canonicalize() else {
            return Ok(false);
        };
        if !path.starts_with(&dir) || !path.exists() {
            return Ok(false);
        }

        std::fs::remove_file(&path)?;
        tracing::debug!("Removed media file {}", path.display());
        Ok(true)
    }
}
