//! Element Identifiers
//!
//! Ids shared by items, questions and panels, and the path keys that tie
//! conditional content to a question's answer.

use std::borrow::Borrow;
use std::fmt;

use serde::{Deserialize, Serialize};

use super::entity::DomainError;

/// Unique id of an item, question or panel within a checklist
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ElementId(String);

impl ElementId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for ElementId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for ElementId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl Borrow<str> for ElementId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for ElementId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ElementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// `<questionId>-<choice>` tag naming the answer a branch belongs to.
///
/// Question ids may contain hyphens (`vc-q1`), choices may not, so the
/// textual form splits on the last hyphen.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct PathKey {
    question: ElementId,
    choice: String,
}

impl PathKey {
    pub fn new(question: impl Into<ElementId>, choice: impl Into<String>) -> Self {
        Self {
            question: question.into(),
            choice: choice.into(),
        }
    }

    pub fn parse(raw: &str) -> Result<Self, DomainError> {
        match raw.rsplit_once('-') {
            Some((question, choice)) if !question.is_empty() && !choice.is_empty() => {
                Ok(Self::new(question, choice))
            }
            _ => Err(DomainError::InvalidInput(format!(
                "path key '{}' is not of the form <question>-<choice>",
                raw
            ))),
        }
    }

    pub fn question(&self) -> &ElementId {
        &self.question
    }

    pub fn choice(&self) -> &str {
        &self.choice
    }

    /// True when this key belongs to `question`, whatever the choice
    pub fn mentions(&self, question: &str) -> bool {
        self.question.as_str() == question
    }
}

impl fmt::Display for PathKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.question, self.choice)
    }
}

impl TryFrom<String> for PathKey {
    type Error = DomainError;

    fn try_from(raw: String) -> Result<Self, Self::Error> {
        Self::parse(&raw)
    }
}

impl From<PathKey> for String {
    fn from(key: PathKey) -> Self {
        key.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_path_key_splits_on_last_hyphen() {
        let key = PathKey::parse("vc-q1-no").unwrap();
        assert_eq!(key.question().as_str(), "vc-q1");
        assert_eq!(key.choice(), "no");
        assert_eq!(key.to_string(), "vc-q1-no");
    }

    #[test]
    fn test_path_key_rejects_malformed() {
        assert!(PathKey::parse("q1").is_err());
        assert!(PathKey::parse("q1-").is_err());
        assert!(PathKey::parse("-yes").is_err());
    }

    #[test]
    fn test_path_key_mentions_exact_question_only() {
        let key = PathKey::new("sw-q1", "yes");
        assert!(key.mentions("sw-q1"));
        assert!(!key.mentions("q1"));
    }

    #[test]
    fn test_path_key_serde_as_string() {
        let key = PathKey::new("q4", "yes");
        let json = serde_json::to_string(&key).unwrap();
        assert_eq!(json, "\"q4-yes\"");
        let back: PathKey = serde_json::from_str(&json).unwrap();
        assert_eq!(back, key);
    }
}
