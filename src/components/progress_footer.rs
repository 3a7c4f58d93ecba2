//! Progress Footer Component
//!
//! Completion counter plus the button to the next checklist.

use leptos::prelude::*;

use crate::context::use_checklist;

#[component]
pub fn ProgressFooter() -> impl IntoView {
    let ctx = use_checklist();

    let progress = move || ctx.read(|s| s.progress().cloned()).flatten();
    let next_shown = move || ctx.read(|s| s.footer().next_checklist_visible).unwrap_or(false);

    view! {
        <div class="progress-footer">
            {move || progress().map(|report| {
                let class = if report.complete { "progress-text complete" } else { "progress-text" };
                view! { <span class=class>{report.text()}</span> }
            })}
            <Show when=next_shown>
                <button class="next-checklist-btn" on:click=move |_| ctx.open_next()>
                    "NEXT CHECKLIST ▶"
                </button>
            </Show>
        </div>
    }
}
