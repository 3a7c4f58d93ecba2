//! Checklist Context
//!
//! Owns the open [`Session`] and the persisted settings, and provides the
//! actions components call. Session events are queued by the subscription
//! and drained after every action: scroll commands go to the DOM, reveal
//! requests are measured after a short delay, and the store version is
//! bumped so views re-read the session.

use std::cell::RefCell;
use std::rc::Rc;

use gloo_timers::future::TimeoutFuture;
use leptos::prelude::*;
use leptos::task::spawn_local;
use rov_checklist_engine::catalogue::{self, DEFAULT_SLUG};
use rov_checklist_engine::domain::{Row, ScrollMode};
use rov_checklist_engine::session::{ScrollCommand, ScrollDirection};
use rov_checklist_engine::settings::Settings;
use rov_checklist_engine::{DomainResult, ElementId, Session, SessionEvent};

use crate::layout;
use crate::settings::{self, BrowserSettings};
use crate::store::{store_bump_version, AppStore, AppStateStoreFields};

type EventQueue = Rc<RefCell<Vec<SessionEvent>>>;

/// Counts opened sessions. Deferred work stamped with an older epoch
/// belongs to a checklist that is no longer open.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Epoch(u64);

impl Epoch {
    pub fn next(self) -> Self {
        Epoch(self.0.wrapping_add(1))
    }
}

/// Session and settings handles provided via context
#[derive(Clone, Copy)]
pub struct ChecklistContext {
    session: StoredValue<Option<Session>, LocalStorage>,
    events: StoredValue<EventQueue, LocalStorage>,
    epoch: StoredValue<Epoch, LocalStorage>,
    settings: StoredValue<BrowserSettings, LocalStorage>,
    store: AppStore,
}

impl ChecklistContext {
    pub fn new(store: AppStore, settings: BrowserSettings) -> Self {
        Self {
            session: StoredValue::new_local(None),
            events: StoredValue::new_local(Rc::new(RefCell::new(Vec::new()))),
            epoch: StoredValue::new_local(Epoch::default()),
            settings: StoredValue::new_local(settings),
            store,
        }
    }

    // ========================
    // Reading
    // ========================

    /// Read the session, re-running the caller whenever it changes
    pub fn read<R>(&self, f: impl FnOnce(&Session) -> R) -> Option<R> {
        self.store.version().track();
        self.session.with_value(|session| session.as_ref().map(f))
    }

    /// Read without subscribing, for values fixed for the session's lifetime
    pub fn read_untracked<R>(&self, f: impl FnOnce(&Session) -> R) -> Option<R> {
        self.session.with_value(|session| session.as_ref().map(f))
    }

    fn update<R>(&self, f: impl FnOnce(&mut Session) -> R) -> Option<R> {
        let mut out = None;
        self.session.update_value(|session| out = session.as_mut().map(f));
        out
    }

    // ========================
    // Lifecycle
    // ========================

    /// Replace the open session with the checklist named `slug`
    pub fn open(&self, slug: &str) {
        self.epoch.update_value(|epoch| *epoch = epoch.next());
        let session = match catalogue::open(slug) {
            Ok(session) => {
                self.store.load_error().set(None);
                session
            }
            Err(e) => {
                tracing::error!(slug, "failed to open checklist: {}", e);
                self.store.load_error().set(Some(e.to_string()));
                match catalogue::open(DEFAULT_SLUG) {
                    Ok(session) => session,
                    Err(e) => {
                        tracing::error!("failed to open fallback checklist: {}", e);
                        self.session.set_value(None);
                        store_bump_version(&self.store);
                        return;
                    }
                }
            }
        };

        let queue = self.events.get_value();
        queue.borrow_mut().clear();
        let mut session = session;
        let sink = Rc::clone(&queue);
        session.subscribe(move |event| sink.borrow_mut().push(event.clone()));
        tracing::info!(slug = session.slug(), "checklist opened");

        self.session.set_value(Some(session));
        layout::apply_scroll(ScrollCommand::Translate(0.0));
        layout::apply_scroll(ScrollCommand::ScrollTo(0.0));
        store_bump_version(&self.store);
        self.settle_later();
    }

    /// Drain queued events into the DOM and re-render
    fn flush(&self, settle: bool) {
        let queue = self.events.get_value();
        let events = std::mem::take(&mut *queue.borrow_mut());
        for event in events {
            match event {
                SessionEvent::Scroll(command) => layout::apply_scroll(command),
                SessionEvent::RevealRequested { id } => self.reveal_later(id),
                _ => {}
            }
        }
        store_bump_version(&self.store);
        if settle {
            self.settle_later();
        }
    }

    /// Run `task` after `delay_ms` unless another checklist was opened meanwhile
    fn defer(&self, delay_ms: u32, task: impl FnOnce(ChecklistContext) + 'static) {
        let ctx = *self;
        let stamp = self.epoch.get_value();
        spawn_local(async move {
            TimeoutFuture::new(delay_ms).await;
            if ctx.epoch.get_value() != stamp {
                tracing::debug!("deferred work dropped, checklist changed");
                return;
            }
            task(ctx);
        });
    }

    fn settle_later(&self) {
        self.defer(layout::SETTLE_DELAY_MS, |ctx| ctx.settle());
    }

    /// Feed a fresh measurement to the session
    pub fn settle(&self) {
        let Some(native) = self.read_untracked(|s| s.config().scroll_mode() == ScrollMode::Native) else {
            return;
        };
        let Some(viewport) = layout::measure_viewport(native) else {
            return;
        };
        self.update(|s| s.settle(viewport));
        self.flush(false);
    }

    fn reveal_later(&self, id: ElementId) {
        self.defer(layout::REVEAL_DELAY_MS, move |ctx| {
            let Some(bounds) = layout::element_bounds(id.as_str()) else {
                return;
            };
            if ctx.update(|s| s.scroll_into_view_if_needed(bounds)) == Some(true) {
                ctx.flush(true);
            }
        });
    }

    // ========================
    // Actions
    // ========================

    pub fn toggle(&self, id: &str) {
        let checked = self.update(|s| {
            s.toggle_item(id);
            s.is_checked(id)
        });
        self.flush(true);
        if checked == Some(true) {
            self.auto_scroll_later(id.to_string());
        }
    }

    fn auto_scroll_later(&self, item: String) {
        let Some(page_items) = self.read_untracked(|s| {
            let page = &s.pages()[s.current_page()];
            page.rows
                .iter()
                .filter_map(|row| match row {
                    Row::Item(id) => Some(id.clone()),
                    _ => None,
                })
                .collect::<Vec<_>>()
        }) else {
            return;
        };
        let fully_visible = layout::fully_visible(&page_items);
        self.defer(layout::AUTO_SCROLL_DELAY_MS, move |ctx| {
            if ctx.update(|s| s.auto_scroll_after_check(&item, &fully_visible)) == Some(true) {
                ctx.flush(true);
            }
        });
    }

    pub fn choose(&self, question: &str, choice: &str) {
        self.update(|s| s.select_choice(question, choice));
        self.flush(true);
    }

    pub fn show_page(&self, index: usize) {
        self.update(|s| s.show_page(index));
        self.flush(true);
    }

    pub fn navigate(&self, delta: isize) {
        self.update(|s| s.navigate_page(delta));
        self.flush(true);
    }

    pub fn scroll(&self, direction: ScrollDirection) {
        self.update(|s| s.scroll_content(direction, None));
        self.flush(true);
    }

    /// Follow the footer's next-checklist link
    pub fn open_next(&self) {
        let Some(Some(next)) = self.read_untracked(|s| s.config().next_checklist.clone()) else {
            return;
        };
        if let Some(window) = web_sys::window() {
            if let Err(e) = window.location().set_hash(&next) {
                tracing::warn!("failed to navigate to {}: {:?}", next, e);
            }
        }
    }

    // ========================
    // Settings
    // ========================

    pub fn toggle_theme(&self) {
        let mut result = None;
        self.settings.update_value(|store| result = Some(store.toggle_theme().map(|_| store.settings())));
        self.apply_settings(result);
    }

    pub fn zoom(&self, steps: i32) {
        let mut result = None;
        self.settings.update_value(|store| result = Some(store.adjust_zoom(steps).map(|_| store.settings())));
        self.apply_settings(result);
        self.settle_later();
    }

    fn apply_settings(&self, result: Option<DomainResult<Settings>>) {
        match result {
            Some(Ok(applied)) => {
                settings::apply_to_body(&applied);
                self.store.settings().set(applied);
            }
            Some(Err(e)) => {
                // Keep the in-memory change even if it could not persist
                tracing::warn!("failed to save settings: {}", e);
                let current = self.settings.with_value(|store| store.settings());
                settings::apply_to_body(&current);
                self.store.settings().set(current);
            }
            None => {}
        }
    }
}

/// Get the checklist context
pub fn use_checklist() -> ChecklistContext {
    expect_context::<ChecklistContext>()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_epoch_marks_earlier_sessions_stale() {
        let mut current = Epoch::default().next();
        let deferred = current;
        assert_eq!(deferred, current);

        current = current.next();
        assert_ne!(deferred, current);
        assert_ne!(deferred.next().next(), current);
    }
}
