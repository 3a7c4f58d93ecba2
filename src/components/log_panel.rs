//! Log Panel Component
//!
//! Recent lines of the in-memory log, refreshed whenever the session changes.

use leptos::prelude::*;

use crate::store::{use_app_store, AppStateStoreFields};

/// Newest lines first, at most `limit` of them
pub fn newest_first(mut lines: Vec<String>, limit: usize) -> String {
    lines.reverse();
    lines.truncate(limit);
    lines.join("\n")
}

const SHOWN_LINES: usize = 100;

#[component]
pub fn LogPanel() -> impl IntoView {
    let store = use_app_store();

    let text = move || {
        store.version().track();
        newest_first(rolling_logger::recent_lines(), SHOWN_LINES)
    };

    view! {
        <Show when=move || store.show_log().get()>
            <pre class="log-panel">{text}</pre>
        </Show>
    }
}
