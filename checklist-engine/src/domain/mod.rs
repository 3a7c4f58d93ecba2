//! Domain Layer
//!
//! Contains the checklist entities and core abstractions.
//! This layer has NO external dependencies (except serde for serialization).

mod entity;
mod ids;
mod item;
mod question;
mod panel;
mod page;
mod config;

pub use entity::{Entity, DomainError, DomainResult};
pub use ids::{ElementId, PathKey};
pub use item::ChecklistItem;
pub use question::{Question, OptionChoice};
pub use panel::{Panel, PanelTone};
pub use page::{Page, Row};
pub use config::{SessionConfig, ScrollMode};
