//! Checklist Entities and Errors
//!
//! Items, questions and panels are looked up by the same [`ElementId`] that
//! the renderer puts on their DOM node.

use serde::{Deserialize, Serialize};

use super::ids::ElementId;

/// A row that can be addressed inside an open session
pub trait Entity: Clone {
    fn id(&self) -> &ElementId;

    /// The DOM id of the rendered row
    fn dom_id(&self) -> &str {
        self.id().as_str()
    }
}

pub type DomainResult<T> = Result<T, DomainError>;

/// Failures raised while loading or running a checklist
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum DomainError {
    /// A slug, id or cached asset that does not exist
    NotFound(String),
    /// Malformed definition data or an unparseable key
    InvalidInput(String),
    /// Two definitions of the same id or choice
    Conflict(String),
    /// Serialization or storage failed underneath us
    Internal(String),
}

impl std::fmt::Display for DomainError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DomainError::NotFound(what) => write!(f, "unknown {}", what),
            DomainError::InvalidInput(why) => write!(f, "invalid checklist data: {}", why),
            DomainError::Conflict(why) => write!(f, "conflicting checklist data: {}", why),
            DomainError::Internal(why) => write!(f, "storage failure: {}", why),
        }
    }
}

impl std::error::Error for DomainError {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ChecklistItem;

    #[test]
    fn test_errors_read_as_sentences() {
        let missing = DomainError::NotFound("checklist 'nope'".into());
        assert_eq!(missing.to_string(), "unknown checklist 'nope'");

        let clash = DomainError::Conflict("pre-dive: duplicate id 'q1'".into());
        assert_eq!(clash.to_string(), "conflicting checklist data: pre-dive: duplicate id 'q1'");
    }

    #[test]
    fn test_dom_id_matches_element_id() {
        let item = ChecklistItem::new("tether-check", "Tether secured");
        assert_eq!(item.dom_id(), "tether-check");
    }
}
