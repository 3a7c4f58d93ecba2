//! Persisted Settings
//!
//! Theme and zoom survive reloads through a [`KeyValueBackend`]. The
//! browser backend lives in the frontend; tests use [`MemoryBackend`].

use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::domain::DomainResult;

pub const THEME_KEY: &str = "theme";
pub const ZOOM_KEY: &str = "rovChecklistZoom";

pub const ZOOM_MIN: f64 = 0.5;
pub const ZOOM_MAX: f64 = 2.0;
pub const ZOOM_STEP: f64 = 0.1;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Theme {
    #[default]
    #[serde(rename = "light-mode")]
    Light,
    #[serde(rename = "dark-mode")]
    Dark,
}

impl Theme {
    /// Body class and stored value
    pub fn as_str(&self) -> &'static str {
        match self {
            Theme::Light => "light-mode",
            Theme::Dark => "dark-mode",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "light-mode" => Some(Theme::Light),
            "dark-mode" => Some(Theme::Dark),
            _ => None,
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }

    /// Label of the toggle button: names the theme it switches to
    pub fn toggle_label(&self) -> &'static str {
        match self {
            Theme::Light => "DARK MODE",
            Theme::Dark => "LIGHT MODE",
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Page zoom factor, always within `[ZOOM_MIN, ZOOM_MAX]` at one decimal
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Zoom(f64);

impl Zoom {
    pub fn new(value: f64) -> Self {
        if !value.is_finite() {
            return Self::default();
        }
        let rounded = (value * 10.0).round() / 10.0;
        Self(rounded.clamp(ZOOM_MIN, ZOOM_MAX))
    }

    pub fn value(&self) -> f64 {
        self.0
    }

    /// One step in or out (`steps` may be negative)
    pub fn stepped(self, steps: i32) -> Self {
        Self::new(self.0 + ZOOM_STEP * f64::from(steps))
    }

    pub fn can_zoom_in(&self) -> bool {
        self.0 < ZOOM_MAX
    }

    pub fn can_zoom_out(&self) -> bool {
        self.0 > ZOOM_MIN
    }

    /// CSS `zoom` value
    pub fn css(&self) -> String {
        format!("{}", self.0)
    }
}

impl Default for Zoom {
    fn default() -> Self {
        Self(1.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Settings {
    pub theme: Theme,
    pub zoom: Zoom,
}

/// String key-value persistence
pub trait KeyValueBackend {
    fn get(&self, key: &str) -> DomainResult<Option<String>>;
    fn set(&mut self, key: &str, value: &str) -> DomainResult<()>;
}

#[derive(Debug, Clone, Default)]
pub struct MemoryBackend {
    values: HashMap<String, String>,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, key: &str, value: &str) -> Self {
        self.values.insert(key.to_string(), value.to_string());
        self
    }
}

impl KeyValueBackend for MemoryBackend {
    fn get(&self, key: &str) -> DomainResult<Option<String>> {
        Ok(self.values.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> DomainResult<()> {
        self.values.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// Current settings plus the backend they persist to
pub struct SettingsStore<B: KeyValueBackend> {
    backend: B,
    settings: Settings,
}

impl<B: KeyValueBackend> SettingsStore<B> {
    /// Read stored values; anything missing or malformed falls back to defaults
    pub fn load(backend: B) -> Self {
        let theme = match backend.get(THEME_KEY) {
            Ok(Some(raw)) => Theme::parse(&raw).unwrap_or_else(|| {
                warn!(value = %raw, "unknown stored theme, using default");
                Theme::default()
            }),
            Ok(None) => Theme::default(),
            Err(e) => {
                warn!(error = %e, "failed to read theme");
                Theme::default()
            }
        };
        let zoom = match backend.get(ZOOM_KEY) {
            Ok(Some(raw)) => match raw.trim().parse::<f64>() {
                Ok(value) => Zoom::new(value),
                Err(_) => {
                    warn!(value = %raw, "malformed stored zoom, using default");
                    Zoom::default()
                }
            },
            Ok(None) => Zoom::default(),
            Err(e) => {
                warn!(error = %e, "failed to read zoom");
                Zoom::default()
            }
        };
        Self {
            backend,
            settings: Settings { theme, zoom },
        }
    }

    pub fn settings(&self) -> Settings {
        self.settings
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn toggle_theme(&mut self) -> DomainResult<Theme> {
        self.settings.theme = self.settings.theme.toggled();
        self.backend.set(THEME_KEY, self.settings.theme.as_str())?;
        Ok(self.settings.theme)
    }

    /// Zoom by `steps`; a no-op at the bounds
    pub fn adjust_zoom(&mut self, steps: i32) -> DomainResult<Zoom> {
        let zoom = self.settings.zoom.stepped(steps);
        if zoom != self.settings.zoom {
            self.settings.zoom = zoom;
            self.backend.set(ZOOM_KEY, &zoom.css())?;
        }
        Ok(zoom)
    }

    /// Write every setting back
    pub fn save(&mut self) -> DomainResult<()> {
        self.backend.set(THEME_KEY, self.settings.theme.as_str())?;
        self.backend.set(ZOOM_KEY, &self.settings.zoom.css())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_when_empty() {
        let store = SettingsStore::load(MemoryBackend::new());
        assert_eq!(store.settings(), Settings::default());
        assert_eq!(store.settings().zoom.value(), 1.0);
        assert_eq!(store.settings().theme.toggle_label(), "DARK MODE");
    }

    #[test]
    fn test_loads_stored_values() {
        let backend = MemoryBackend::new()
            .with(THEME_KEY, "dark-mode")
            .with(ZOOM_KEY, "1.3");
        let store = SettingsStore::load(backend);
        assert_eq!(store.settings().theme, Theme::Dark);
        assert_eq!(store.settings().theme.toggle_label(), "LIGHT MODE");
        assert_eq!(store.settings().zoom.value(), 1.3);
    }

    #[test]
    fn test_malformed_values_fall_back() {
        let backend = MemoryBackend::new()
            .with(THEME_KEY, "sepia")
            .with(ZOOM_KEY, "huge");
        let store = SettingsStore::load(backend);
        assert_eq!(store.settings(), Settings::default());
    }

    #[test]
    fn test_out_of_range_zoom_clamped_on_load() {
        let store = SettingsStore::load(MemoryBackend::new().with(ZOOM_KEY, "7.25"));
        assert_eq!(store.settings().zoom.value(), ZOOM_MAX);
        let store = SettingsStore::load(MemoryBackend::new().with(ZOOM_KEY, "0.1"));
        assert_eq!(store.settings().zoom.value(), ZOOM_MIN);
    }

    #[test]
    fn test_save_writes_back_normalized_values() {
        let backend = MemoryBackend::new()
            .with(THEME_KEY, "sepia")
            .with(ZOOM_KEY, "7.25");
        let mut store = SettingsStore::load(backend);
        store.save().unwrap();
        assert_eq!(store.backend().get(ZOOM_KEY).unwrap().as_deref(), Some("2"));
        assert_eq!(
            store.backend().get(THEME_KEY).unwrap().as_deref(),
            Some("light-mode")
        );
    }

    #[test]
    fn test_zoom_steps_stop_at_bounds() {
        let mut store = SettingsStore::load(MemoryBackend::new().with(ZOOM_KEY, "1.9"));
        assert_eq!(store.adjust_zoom(1).unwrap().value(), 2.0);
        assert_eq!(store.adjust_zoom(1).unwrap().value(), 2.0);
        assert!(!store.settings().zoom.can_zoom_in());
        assert_eq!(store.backend().get(ZOOM_KEY).unwrap().as_deref(), Some("2"));

        let mut store = SettingsStore::load(MemoryBackend::new());
        for _ in 0..10 {
            store.adjust_zoom(-1).unwrap();
        }
        assert_eq!(store.settings().zoom.value(), 0.5);
    }

    #[test]
    fn test_toggle_theme_persists() {
        let mut store = SettingsStore::load(MemoryBackend::new());
        assert_eq!(store.toggle_theme().unwrap(), Theme::Dark);
        assert_eq!(
            store.backend().get(THEME_KEY).unwrap().as_deref(),
            Some("dark-mode")
        );
        let reloaded = SettingsStore::load(store.backend().clone());
        assert_eq!(reloaded.settings().theme, Theme::Dark);
    }

    #[test]
    fn test_float_steps_do_not_drift() {
        let zoom = Zoom::default().stepped(1).stepped(1).stepped(1);
        assert_eq!(zoom.value(), 1.3);
    }
}
