//! Question Entity
//!
//! A single-answer multiple-choice control. Once answered the question is
//! locked until something resets it.

use serde::{Deserialize, Serialize};

use super::entity::Entity;
use super::ids::{ElementId, PathKey};

/// One selectable answer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OptionChoice {
    /// Value used in path keys (`yes`, `no`)
    pub value: String,
    /// Button label
    pub label: String,
}

impl OptionChoice {
    pub fn new(value: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            label: label.into(),
        }
    }
}

/// A question and its answer state
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Question {
    pub id: ElementId,
    pub prompt: String,
    pub choices: Vec<OptionChoice>,
    /// Branches this question itself belongs to
    #[serde(default)]
    pub paths: Vec<PathKey>,
    #[serde(default)]
    pub selected: Option<String>,
    #[serde(default)]
    pub locked: bool,
    #[serde(default = "default_true")]
    pub prereqs_met: bool,
}

fn default_true() -> bool {
    true
}

impl Question {
    pub fn new(id: impl Into<ElementId>, prompt: impl Into<String>, choices: Vec<OptionChoice>) -> Self {
        Self {
            id: id.into(),
            prompt: prompt.into(),
            choices,
            paths: Vec::new(),
            selected: None,
            locked: false,
            prereqs_met: true,
        }
    }

    /// The common YES / NO question
    pub fn yes_no(id: impl Into<ElementId>, prompt: impl Into<String>) -> Self {
        Self::new(
            id,
            prompt,
            vec![OptionChoice::new("yes", "YES"), OptionChoice::new("no", "NO")],
        )
    }

    pub fn when(mut self, question: &str, choice: &str) -> Self {
        self.paths.push(PathKey::new(question, choice));
        self
    }

    pub fn has_choice(&self, value: &str) -> bool {
        self.choices.iter().any(|c| c.value == value)
    }

    /// Choice buttons accept clicks
    pub fn choices_enabled(&self) -> bool {
        !self.locked && self.prereqs_met
    }

    pub fn is_selected(&self, value: &str) -> bool {
        self.selected.as_deref() == Some(value)
    }

    /// Record an answer. Returns false when the click must be ignored.
    pub fn answer(&mut self, value: &str) -> bool {
        if !self.choices_enabled() || !self.has_choice(value) {
            return false;
        }
        self.selected = Some(value.to_string());
        self.locked = true;
        true
    }

    /// Unlock and clear the selection
    pub fn reset(&mut self) {
        self.selected = None;
        self.locked = false;
    }
}

impl Entity for Question {
    fn id(&self) -> &ElementId {
        &self.id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_answer_locks_question() {
        let mut q = Question::yes_no("q1", "Power on?");
        assert!(q.answer("yes"));
        assert!(q.locked);
        assert!(q.is_selected("yes"));
        assert!(!q.answer("no"));
        assert!(q.is_selected("yes"));
    }

    #[test]
    fn test_unmet_prereqs_block_answer() {
        let mut q = Question::yes_no("q1", "Power on?");
        q.prereqs_met = false;
        assert!(!q.choices_enabled());
        assert!(!q.answer("yes"));
        assert_eq!(q.selected, None);
    }

    #[test]
    fn test_unknown_choice_ignored() {
        let mut q = Question::yes_no("q1", "Power on?");
        assert!(!q.answer("maybe"));
        assert!(!q.locked);
    }

    #[test]
    fn test_reset_unlocks() {
        let mut q = Question::yes_no("q1", "Power on?");
        q.answer("no");
        q.reset();
        assert!(q.choices_enabled());
        assert_eq!(q.selected, None);
    }
}
