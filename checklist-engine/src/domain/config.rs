//! Session Configuration
//!
//! Capability flags and static metadata of a checklist. Immutable once a
//! session is built from it.

use serde::{Deserialize, Serialize};

/// How the scroll affordances are driven
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScrollMode {
    /// Platform scroll container
    Native,
    /// Explicit translate offset per page
    Transform,
    /// Buttons permanently disabled
    Locked,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    pub has_pages: bool,
    pub has_sub_tabs: bool,
    pub has_questions: bool,
    pub use_native_scroll: bool,
    /// Menu pages have no counters
    pub tracks_progress: bool,
    pub scroll_locked: bool,
    pub page_titles: Vec<String>,
    /// Slug of the checklist offered once this one is complete
    pub next_checklist: Option<String>,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            has_pages: false,
            has_sub_tabs: false,
            has_questions: false,
            use_native_scroll: false,
            tracks_progress: true,
            scroll_locked: false,
            page_titles: Vec::new(),
            next_checklist: None,
        }
    }
}

impl SessionConfig {
    pub fn single_page() -> Self {
        Self::default()
    }

    /// Paged checklist with one sub-tab per title
    pub fn paged(titles: &[&str]) -> Self {
        Self {
            has_pages: true,
            has_sub_tabs: true,
            page_titles: titles.iter().map(|t| t.to_string()).collect(),
            ..Self::default()
        }
    }

    /// Paged with sub-tabs; titles are taken from the pages when built
    pub fn with_pages(mut self) -> Self {
        self.has_pages = true;
        self.has_sub_tabs = true;
        self
    }

    pub fn with_questions(mut self) -> Self {
        self.has_questions = true;
        self
    }

    pub fn native_scroll(mut self) -> Self {
        self.use_native_scroll = true;
        self
    }

    pub fn untracked(mut self) -> Self {
        self.tracks_progress = false;
        self
    }

    pub fn locked_scroll(mut self) -> Self {
        self.scroll_locked = true;
        self
    }

    pub fn next(mut self, slug: &str) -> Self {
        self.next_checklist = Some(slug.to_string());
        self
    }

    pub fn scroll_mode(&self) -> ScrollMode {
        if self.scroll_locked {
            ScrollMode::Locked
        } else if self.use_native_scroll {
            ScrollMode::Native
        } else {
            ScrollMode::Transform
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_track_progress() {
        let config = SessionConfig::single_page();
        assert!(config.tracks_progress);
        assert!(!config.has_pages);
        assert_eq!(config.scroll_mode(), ScrollMode::Transform);
    }

    #[test]
    fn test_scroll_mode_precedence() {
        assert_eq!(SessionConfig::single_page().native_scroll().scroll_mode(), ScrollMode::Native);
        assert_eq!(
            SessionConfig::single_page().native_scroll().locked_scroll().scroll_mode(),
            ScrollMode::Locked
        );
    }

    #[test]
    fn test_missing_fields_deserialize_to_defaults() {
        let config: SessionConfig = serde_json::from_str(r#"{"has_pages": true}"#).unwrap();
        assert!(config.has_pages);
        assert!(config.tracks_progress);
        assert_eq!(config.next_checklist, None);
    }
}
