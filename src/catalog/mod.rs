//! Catalog of playable videos and the search filter over it
//!
//! The feed shown by the home and explore views is the user's library
//! followed by the built-in catalog. Searching narrows that list by a
//! case-insensitive substring match on title or category.

mod builtin;
mod video;

pub use builtin::{builtin_catalog, resolve_category, EXPLORE_CATEGORIES};
pub use video::Video;

/// Concatenate library videos (first) with the built-in catalog
pub fn combined_feed(library: &[Video], catalog: &[Video]) -> Vec<Video> {
    library.iter().chain(catalog.iter()).cloned().collect()
}

/// Filter videos by a search query
///
/// Keeps the entries whose title or category contains `query`, ignoring
/// case. An empty query keeps everything. Order is preserved.
///
/// # Examples
///
/// ```
/// use novastream::catalog::{builtin_catalog, filter_videos};
///
/// let catalog = builtin_catalog();
/// let hits = filter_videos(&catalog, "OCEAN");
/// assert_eq!(hits.len(), 1);
/// assert_eq!(hits[0].title, "Deep Ocean Exploration");
/// ```
pub fn filter_videos<'a>(videos: &'a [Video], query: &str) -> Vec<&'a Video> {
    let needle = query.to_lowercase();
    videos.iter().filter(|v| v.matches_lowercase(&needle)).collect()
}

/// Look up a video by exact identifier
pub fn find_video<'a>(videos: &'a [Video], id: &str) -> Option<&'a Video> {
    videos.iter().find(|v| v.id == id)
}
