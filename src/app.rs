//! ROV Checklist App
//!
//! Title bar, sub-tabs, the active page and the footer. The open checklist
//! follows the URL hash.

use leptos::ev;
use leptos::prelude::*;
use percent_encoding::percent_decode_str;
use reactive_stores::Store;
use rov_checklist_engine::catalogue::DEFAULT_SLUG;

use crate::components::{ChecklistPage, LogPanel, Pager, ProgressFooter, ScrollControls, SubTabBar, TitleBar};
use crate::context::ChecklistContext;
use crate::settings;
use crate::store::{store_set_slug, AppState, AppStateStoreFields};

/// Percent-decoded slug from `location.hash`, or the default checklist
fn slug_from_hash() -> String {
    let hash = web_sys::window()
        .and_then(|w| w.location().hash().ok())
        .unwrap_or_default();
    let slug = percent_decode_str(hash.trim_start_matches('#'))
        .decode_utf8_lossy()
        .trim()
        .to_string();
    if slug.is_empty() {
        DEFAULT_SLUG.to_string()
    } else {
        slug
    }
}

#[component]
pub fn App() -> impl IntoView {
    let browser_settings = settings::load();
    let initial = browser_settings.settings();
    settings::apply_to_body(&initial);

    let store = Store::new(AppState::new(slug_from_hash(), initial));
    provide_context(store);
    let ctx = ChecklistContext::new(store, browser_settings);
    provide_context(ctx);

    let hash_listener = window_event_listener(ev::hashchange, move |_| {
        store_set_slug(&store, &slug_from_hash());
    });
    on_cleanup(move || hash_listener.remove());

    // Content height changes with the window
    let resize_listener = window_event_listener(ev::resize, move |_| ctx.settle());
    on_cleanup(move || resize_listener.remove());

    // Open the checklist whenever the slug changes
    Effect::new(move |_| {
        let slug = store.slug().get();
        ctx.open(&slug);
    });

    let load_error = move || store.load_error().get();

    view! {
        <div class="app-layout">
            <TitleBar />

            {move || load_error().map(|e| view! {
                <div class="load-error">{format!("Checklist unavailable ({}), showing the welcome page", e)}</div>
            })}

            <SubTabBar />

            <main class="main-content">
                <ChecklistPage />
                <ScrollControls />
            </main>

            <footer class="checklist-footer">
                <Pager />
                <ProgressFooter />
            </footer>

            <LogPanel />
        </div>
    }
}
