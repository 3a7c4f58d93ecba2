//! ROV checklist engine.
//!
//! Layers, bottom-up:
//! - `domain`: entities (items, questions, panels, pages) and errors
//! - `definition`: declarative checklist descriptions and their rules
//! - `session`: the state machine interpreting a definition
//! - `catalogue`: built-in checklists by slug
//! - `settings`: persisted theme and zoom
//! - `offline_cache`: versioned asset manifest and cache-first lookup

pub mod catalogue;
pub mod definition;
pub mod domain;
pub mod offline_cache;
pub mod session;
pub mod settings;

pub use definition::{ChecklistDefinition, Completion, CompletionRule, RevealRule, RuleSet, TabRule, Target};
pub use domain::{DomainError, DomainResult, ElementId, PathKey};
pub use session::{Session, SessionEvent};
