//! View routing for the interactive shell
//!
//! The application shows exactly one of five views at a time. The router
//! holds the active view, the selected video and the search query; none of
//! this survives a restart.

use crate::catalog::{combined_feed, filter_videos, resolve_category, Video};
use crate::error::{NovastreamError, Result};

use colored::Colorize;
use std::fmt;

/// Mutually exclusive application views
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AppView {
    #[default]
    Home,
    Playing,
    Studio,
    Explore,
    Library,
}

impl fmt::Display for AppView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Home => write!(f, "HOME"),
            Self::Playing => write!(f, "PLAYING"),
            Self::Studio => write!(f, "STUDIO"),
            Self::Explore => write!(f, "EXPLORE"),
            Self::Library => write!(f, "LIBRARY"),
        }
    }
}

impl AppView {
    /// Parse a view name
    ///
    /// # Examples
    ///
    /// ```
    /// use novastream::view::AppView;
    ///
    /// assert_eq!(AppView::parse_str("library").unwrap(), AppView::Library);
    /// ```
    pub fn parse_str(s: &str) -> std::result::Result<Self, String> {
        match s.to_lowercase().as_str() {
            "home" => Ok(Self::Home),
            "playing" | "play" => Ok(Self::Playing),
            "studio" => Ok(Self::Studio),
            "explore" => Ok(Self::Explore),
            "library" => Ok(Self::Library),
            other => Err(format!("Unknown view: {}", other)),
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Self::Home => "Recommended for you",
            Self::Playing => "Now playing",
            Self::Studio => "Create cinematic videos from text prompts",
            Self::Explore => "Browse the catalog by category",
            Self::Library => "Your generated videos",
        }
    }

    /// Colored tag for the shell prompt
    pub fn colored_tag(&self) -> String {
        let label = self.to_string();
        match self {
            Self::Home => format!("[{}]", label.blue()),
            Self::Playing => format!("[{}]", label.red()),
            Self::Studio => format!("[{}]", label.magenta()),
            Self::Explore => format!("[{}]", label.green()),
            Self::Library => format!("[{}]", label.yellow()),
        }
    }
}

/// Navigation state
#[derive(Debug, Clone, Default)]
pub struct ViewRouter {
    view: AppView,
    selected: Option<Video>,
    query: String,
}

impl ViewRouter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn view(&self) -> AppView {
        self.view
    }

    pub fn selected(&self) -> Option<&Video> {
        self.selected.as_ref()
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    /// Switch view; the selected video is kept
    pub fn navigate(&mut self, view: AppView) {
        tracing::debug!(from = %self.view, to = %view, "Navigating");
        self.view = view;
    }

    /// Select a video and move to the playing view
    pub fn select(&mut self, video: Video) {
        self.selected = Some(video);
        self.navigate(AppView::Playing);
    }

    /// Set the search query without changing view
    pub fn set_query(&mut self, query: impl Into<String>) {
        self.query = query.into();
    }

    /// Choose an explore chip: the chip becomes the search query
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` for an unknown category
    pub fn choose_category(&mut self, name: &str) -> Result<&'static str> {
        let category = resolve_category(name)
            .ok_or_else(|| NovastreamError::InvalidInput(format!("Unknown category: {}", name)))?;
        self.set_query(category);
        self.navigate(AppView::Explore);
        Ok(category)
    }

    /// Library videos followed by the catalog, narrowed by the query
    pub fn visible(&self, library: &[Video], catalog: &[Video]) -> Vec<Video> {
        let feed = combined_feed(library, catalog);
        filter_videos(&feed, &self.query).into_iter().cloned().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::builtin_catalog;
    use crate::test_utils::{memory_library, sample_video};

    #[test]
    fn test_default_is_home_with_empty_query() {
        let router = ViewRouter::new();
        assert_eq!(router.view(), AppView::Home);
        assert!(router.selected().is_none());
        assert_eq!(router.query(), "");
    }

    #[test]
    fn test_select_moves_to_playing_and_leaving_keeps_selection() {
        let mut router = ViewRouter::new();
        let video = builtin_catalog()[2].clone();
        router.select(video.clone());
        assert_eq!(router.view(), AppView::Playing);

        router.navigate(AppView::Home);
        assert_eq!(router.view(), AppView::Home);
        assert_eq!(router.selected(), Some(&video));
    }

    #[test]
    fn test_choose_category_sets_query() {
        let mut router = ViewRouter::new();
        assert_eq!(router.choose_category("nature").unwrap(), "Nature");
        assert_eq!(router.view(), AppView::Explore);
        assert_eq!(router.query(), "Nature");
        assert!(router.choose_category("Cooking").is_err());
        assert_eq!(router.query(), "Nature");
    }

    #[test]
    fn test_visible_filters_combined_feed() {
        let catalog = builtin_catalog();
        let mut router = ViewRouter::new();
        assert_eq!(router.visible(&[], &catalog).len(), catalog.len());

        router.set_query("tech");
        let visible = router.visible(&[], &catalog);
        assert!(!visible.is_empty());
        assert!(visible
            .iter()
            .all(|v| v.title.to_lowercase().contains("tech")
                || v.category.to_lowercase().contains("tech")));
    }

    #[test]
    fn test_visible_puts_library_first() {
        let library = memory_library();
        library.save_video(&sample_video("user-9")).unwrap();

        let router = ViewRouter::new();
        let visible = router.visible(&library.get_videos().unwrap(), &builtin_catalog());
        assert_eq!(visible[0].id, "user-9");
        assert_eq!(visible.len(), builtin_catalog().len() + 1);
    }

    #[test]
    fn test_parse_view() {
        assert_eq!(AppView::parse_str("STUDIO").unwrap(), AppView::Studio);
        assert!(AppView::parse_str("settings").is_err());
    }
}
