//! Video record shared by the catalog, the library, and the studio

use serde::{Deserialize, Serialize};

/// A playable video entry
///
/// Built-in catalog entries and studio generations share this shape. Field
/// names serialize in camelCase so stored libraries keep the same JSON
/// layout across versions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Video {
    /// Unique identifier ("1".."6" for the catalog, `user-<millis>` for generations)
    pub id: String,
    /// Display title
    pub title: String,
    /// Thumbnail image URI
    pub thumbnail: String,
    /// Playable media URI
    pub url: String,
    /// Duration label, e.g. "10:04"
    pub duration: String,
    /// View count label, e.g. "1.2M"
    pub views: String,
    /// Creator name
    pub creator: String,
    /// Free-text description
    pub description: String,
    /// Category name used by explore chips and search
    pub category: String,
    /// Cached AI smart summary
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ai_insights: Option<String>,
    /// Set for videos produced by the studio
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_user_generated: Option<bool>,
    /// Creation time in epoch milliseconds
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<i64>,
}

impl Video {
    /// True when the video came out of the generation studio
    pub fn is_user_generated(&self) -> bool {
        self.is_user_generated.unwrap_or(false)
    }

    /// Case-insensitive match of `needle` against title or category
    ///
    /// `needle` must already be lowercased.
    pub(crate) fn matches_lowercase(&self, needle: &str) -> bool {
        self.title.to_lowercase().contains(needle) || self.category.to_lowercase().contains(needle)
    }
}
