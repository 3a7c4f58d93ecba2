//! Panel Entity
//!
//! Non-checkable rows: instructions, warnings, abort actions, success and
//! proceed messages, and navigation links on the menu pages.

use serde::{Deserialize, Serialize};

use super::entity::Entity;
use super::ids::{ElementId, PathKey};

/// Visual register of a panel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum PanelTone {
    #[default]
    Instruction,
    Warning,
    Abort,
    Success,
    Proceed,
    Complete,
    Link,
}

impl PanelTone {
    pub fn as_str(&self) -> &'static str {
        match self {
            PanelTone::Instruction => "instruction",
            PanelTone::Warning => "warning",
            PanelTone::Abort => "abort",
            PanelTone::Success => "success",
            PanelTone::Proceed => "proceed",
            PanelTone::Complete => "complete",
            PanelTone::Link => "link",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Panel {
    pub id: ElementId,
    pub text: String,
    #[serde(default)]
    pub tone: PanelTone,
    #[serde(default)]
    pub paths: Vec<PathKey>,
    /// Visible before any rule touches it. Path-keyed panels ignore this.
    #[serde(default)]
    pub shown_initially: bool,
    /// Checklist slug to open when clicked
    #[serde(default)]
    pub link: Option<String>,
}

impl Panel {
    pub fn new(id: impl Into<ElementId>, text: impl Into<String>, tone: PanelTone) -> Self {
        Self {
            id: id.into(),
            text: text.into(),
            tone,
            paths: Vec::new(),
            shown_initially: false,
            link: None,
        }
    }

    pub fn instruction(id: impl Into<ElementId>, text: impl Into<String>) -> Self {
        Self::new(id, text, PanelTone::Instruction)
    }

    pub fn warning(id: impl Into<ElementId>, text: impl Into<String>) -> Self {
        Self::new(id, text, PanelTone::Warning)
    }

    pub fn abort(id: impl Into<ElementId>, text: impl Into<String>) -> Self {
        Self::new(id, text, PanelTone::Abort)
    }

    pub fn success(id: impl Into<ElementId>, text: impl Into<String>) -> Self {
        Self::new(id, text, PanelTone::Success)
    }

    pub fn proceed(id: impl Into<ElementId>, text: impl Into<String>) -> Self {
        Self::new(id, text, PanelTone::Proceed)
    }

    pub fn complete(id: impl Into<ElementId>, text: impl Into<String>) -> Self {
        Self::new(id, text, PanelTone::Complete)
    }

    /// Always-visible navigation row
    pub fn link(id: impl Into<ElementId>, text: impl Into<String>, slug: &str) -> Self {
        Self {
            link: Some(slug.to_string()),
            shown_initially: true,
            ..Self::new(id, text, PanelTone::Link)
        }
    }

    pub fn when(mut self, question: &str, choice: &str) -> Self {
        self.paths.push(PathKey::new(question, choice));
        self
    }

    pub fn shown(mut self) -> Self {
        self.shown_initially = true;
        self
    }

    /// Starts hidden and may be revealed later
    pub fn is_conditional(&self) -> bool {
        !self.paths.is_empty() || !self.shown_initially
    }
}

impl Entity for Panel {
    fn id(&self) -> &ElementId {
        &self.id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_panel_conditionality() {
        assert!(Panel::instruction("a", "A").is_conditional());
        assert!(!Panel::instruction("a", "A").shown().is_conditional());
        assert!(Panel::instruction("a", "A").shown().when("q1", "no").is_conditional());
        assert!(!Panel::link("home", "HOME", "home").is_conditional());
    }

    #[test]
    fn test_tone_serialization() {
        let json = serde_json::to_string(&PanelTone::Abort).unwrap();
        assert_eq!(json, "\"abort\"");
        assert_eq!(PanelTone::Success.as_str(), "success");
    }
}
