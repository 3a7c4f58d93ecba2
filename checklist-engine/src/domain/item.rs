//! Checklist Item Entity
//!
//! An atomic checkable task row. Items are never removed from a session,
//! only hidden; visibility is owned by the session, not by the item.

use serde::{Deserialize, Serialize};

use super::entity::Entity;
use super::ids::{ElementId, PathKey};

/// A checkable task
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChecklistItem {
    /// Unique identifier
    pub id: ElementId,
    /// Row text (inline markdown)
    pub text: String,
    /// Completion status
    #[serde(default)]
    pub checked: bool,
    /// Stands in for a question's answered state
    #[serde(default)]
    pub is_question: bool,
    /// Branches this item belongs to (empty = unconditional)
    #[serde(default)]
    pub paths: Vec<PathKey>,
    /// Question this item is a prerequisite of
    #[serde(default)]
    pub prereq_for: Option<ElementId>,
}

impl ChecklistItem {
    /// Create an unconditional, unchecked item
    pub fn new(id: impl Into<ElementId>, text: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            text: text.into(),
            checked: false,
            is_question: false,
            paths: Vec::new(),
            prereq_for: None,
        }
    }

    /// The checked-state proxy of a question
    pub fn question_proxy(id: impl Into<ElementId>, text: impl Into<String>, paths: Vec<PathKey>) -> Self {
        Self {
            is_question: true,
            paths,
            ..Self::new(id, text)
        }
    }

    pub fn when(mut self, question: &str, choice: &str) -> Self {
        self.paths.push(PathKey::new(question, choice));
        self
    }

    pub fn prereq_for(mut self, question: &str) -> Self {
        self.prereq_for = Some(ElementId::from(question));
        self
    }

    pub fn is_conditional(&self) -> bool {
        !self.paths.is_empty()
    }

    /// Flip checked state, returning the new value
    pub fn toggle(&mut self) -> bool {
        self.checked = !self.checked;
        self.checked
    }

    /// Whether the item counts towards progress given its visibility
    pub fn is_countable(&self, visible: bool) -> bool {
        !self.is_question && (!self.is_conditional() || visible)
    }
}

impl Entity for ChecklistItem {
    fn id(&self) -> &ElementId {
        &self.id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_item_creation() {
        let item = ChecklistItem::new("tether-check", "Inspect tether");
        assert_eq!(item.id().as_str(), "tether-check");
        assert!(!item.checked);
        assert!(!item.is_conditional());
    }

    #[test]
    fn test_toggle_round_trip() {
        let mut item = ChecklistItem::new("a", "A");
        assert!(item.toggle());
        assert!(!item.toggle());
    }

    #[test]
    fn test_countable_rules() {
        let plain = ChecklistItem::new("a", "A");
        assert!(plain.is_countable(false));

        let conditional = ChecklistItem::new("b", "B").when("q1", "no");
        assert!(!conditional.is_countable(false));
        assert!(conditional.is_countable(true));

        let proxy = ChecklistItem::question_proxy("q1", "Q1?", Vec::new());
        assert!(!proxy.is_countable(true));
    }
}
