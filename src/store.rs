//! Global Application State Store
//!
//! Uses Leptos reactive_stores for fine-grained reactivity. The session
//! itself is not reactive; `version` is bumped whenever it changes.

use leptos::prelude::*;
use reactive_stores::Store;
use rov_checklist_engine::settings::Settings;

/// Global application state with field-level reactivity
#[derive(Clone, Debug, Default, Store)]
pub struct AppState {
    /// Slug of the open checklist
    pub slug: String,
    /// Version counter for session changes (increment to re-render)
    pub version: u32,
    /// Theme and zoom as last persisted
    pub settings: Settings,
    /// Set when the requested checklist failed to open
    pub load_error: Option<String>,
    /// Whether the log panel is open
    pub show_log: bool,
}

impl AppState {
    pub fn new(slug: String, settings: Settings) -> Self {
        Self {
            slug,
            settings,
            ..Default::default()
        }
    }
}

/// Type alias for the store
pub type AppStore = Store<AppState>;

/// Get the app store from context
pub fn use_app_store() -> AppStore {
    expect_context::<AppStore>()
}

// ========================
// Store Helper Functions
// ========================

/// Mark the session as changed
pub fn store_bump_version(store: &AppStore) {
    *store.version().write() += 1;
}

pub fn store_toggle_log(store: &AppStore) {
    store.show_log().update(|shown| *shown = !*shown);
}

/// Switch to `slug` unless it is already open
pub fn store_set_slug(store: &AppStore, slug: &str) {
    if store.slug().get_untracked() != slug {
        store.slug().set(slug.to_string());
    }
}
