//! Browser Settings
//!
//! `localStorage` persistence for the engine's settings store, and applying
//! theme and zoom to `<body>`.

use rov_checklist_engine::settings::{KeyValueBackend, Settings, SettingsStore};
use rov_checklist_engine::{DomainError, DomainResult};
use web_sys::Storage;

/// `window.localStorage`; reads and writes fail softly when it is unavailable
pub struct LocalStorageBackend {
    storage: Option<Storage>,
}

impl LocalStorageBackend {
    pub fn new() -> Self {
        let storage = web_sys::window().and_then(|w| w.local_storage().ok().flatten());
        if storage.is_none() {
            tracing::warn!("localStorage unavailable, settings will not persist");
        }
        Self { storage }
    }

    fn storage(&self) -> DomainResult<&Storage> {
        self.storage
            .as_ref()
            .ok_or_else(|| DomainError::Internal("localStorage unavailable".to_string()))
    }
}

impl KeyValueBackend for LocalStorageBackend {
    fn get(&self, key: &str) -> DomainResult<Option<String>> {
        self.storage()?
            .get_item(key)
            .map_err(|e| DomainError::Internal(format!("read '{}': {:?}", key, e)))
    }

    fn set(&mut self, key: &str, value: &str) -> DomainResult<()> {
        self.storage()?
            .set_item(key, value)
            .map_err(|e| DomainError::Internal(format!("write '{}': {:?}", key, e)))
    }
}

pub type BrowserSettings = SettingsStore<LocalStorageBackend>;

/// Load the stored settings and write back the normalized values
pub fn load() -> BrowserSettings {
    let mut store = SettingsStore::load(LocalStorageBackend::new());
    if let Err(e) = store.save() {
        tracing::warn!("failed to save settings: {}", e);
    }
    store
}

/// Swap the theme class and set the CSS zoom on `<body>`
pub fn apply_to_body(settings: &Settings) {
    let Some(body) = web_sys::window()
        .and_then(|w| w.document())
        .and_then(|d| d.body())
    else {
        return;
    };

    let classes = body.class_list();
    let stale = settings.theme.toggled();
    let _ = classes.remove_1(stale.as_str());
    let _ = classes.add_1(settings.theme.as_str());

    if let Err(e) = body.style().set_property("zoom", &settings.zoom.css()) {
        tracing::warn!("failed to apply zoom: {:?}", e);
    }
}

