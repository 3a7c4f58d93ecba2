//! Title Bar Component
//!
//! Checklist title with home, zoom, log and theme controls.

use leptos::prelude::*;

use crate::context::use_checklist;
use crate::store::{store_toggle_log, use_app_store, AppStateStoreFields};

#[component]
pub fn TitleBar() -> impl IntoView {
    let ctx = use_checklist();
    let store = use_app_store();

    let title = move || ctx.read(|s| s.title().to_string()).unwrap_or_default();
    let settings = move || store.settings().get();

    view! {
        <header class="custom-titlebar">
            <a class="titlebar-btn home" href="#home" title="Home">"⌂"</a>
            <span class="titlebar-title">{title}</span>

            <div class="titlebar-controls">
                <button
                    class="titlebar-btn zoom-out"
                    title="Zoom out"
                    disabled=move || !settings().zoom.can_zoom_out()
                    on:click=move |_| ctx.zoom(-1)
                >
                    "A-"
                </button>
                <span class="zoom-level">
                    {move || format!("{:.0}%", settings().zoom.value() * 100.0)}
                </span>
                <button
                    class="titlebar-btn zoom-in"
                    title="Zoom in"
                    disabled=move || !settings().zoom.can_zoom_in()
                    on:click=move |_| ctx.zoom(1)
                >
                    "A+"
                </button>
                <button
                    class="titlebar-btn log"
                    title="Show log"
                    on:click=move |_| store_toggle_log(&store)
                >
                    "LOG"
                </button>
                <button class="titlebar-btn theme" on:click=move |_| ctx.toggle_theme()>
                    {move || settings().theme.toggle_label()}
                </button>
            </div>
        </header>
    }
}
