//! Pager Component

use leptos::prelude::*;

use crate::context::use_checklist;

/// Prev/next page controls; hidden once the footer swaps to the next checklist
#[component]
pub fn Pager() -> impl IntoView {
    let ctx = use_checklist();

    let shown = move || ctx.read(|s| s.footer().pager_visible).unwrap_or(false);
    let pager = move || ctx.read(|s| s.pager().clone()).unwrap_or_default();

    view! {
        <Show when=shown>
            <div class="pager">
                <button
                    class="pager-btn prev"
                    disabled=move || pager().prev_disabled
                    on:click=move |_| ctx.navigate(-1)
                >
                    "◀ PREV"
                </button>
                <div class="pager-status">
                    <span class="page-title">{move || pager().title.unwrap_or_default()}</span>
                    <span class="page-indicator">{move || pager().indicator()}</span>
                </div>
                <button
                    class=move || if pager().next_highlighted { "pager-btn next highlight" } else { "pager-btn next" }
                    disabled=move || pager().next_disabled
                    on:click=move |_| ctx.navigate(1)
                >
                    "NEXT ▶"
                </button>
            </div>
        </Show>
    }
}
