//! Page
//!
//! Runtime page layout: an ordered list of row references into the
//! session's entity maps.

use serde::{Deserialize, Serialize};

use super::ids::ElementId;

/// One row of a page, by kind
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "id", rename_all = "lowercase")]
pub enum Row {
    Item(ElementId),
    Question(ElementId),
    Panel(ElementId),
}

impl Row {
    pub fn id(&self) -> &ElementId {
        match self {
            Row::Item(id) | Row::Question(id) | Row::Panel(id) => id,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Page {
    pub index: usize,
    pub title: String,
    pub rows: Vec<Row>,
}

impl Page {
    pub fn item_ids(&self) -> impl Iterator<Item = &ElementId> {
        self.rows.iter().filter_map(|row| match row {
            Row::Item(id) => Some(id),
            _ => None,
        })
    }

    pub fn contains(&self, id: &str) -> bool {
        self.rows.iter().any(|row| row.id().as_str() == id)
    }
}
