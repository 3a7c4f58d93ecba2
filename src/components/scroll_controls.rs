//! Scroll Buttons Component

use leptos::prelude::*;
use rov_checklist_engine::session::{ScrollAffordance, ScrollDirection};

use crate::context::use_checklist;

#[component]
pub fn ScrollControls() -> impl IntoView {
    let ctx = use_checklist();

    let affordance = move || ctx.read(|s| s.scroll_affordance()).unwrap_or(ScrollAffordance::DISABLED);

    view! {
        <div class="scroll-controls">
            <button
                class="scroll-btn up"
                title="Scroll up"
                disabled=move || affordance().up_disabled
                on:click=move |_| ctx.scroll(ScrollDirection::Up)
            >
                "▲"
            </button>
            <button
                class="scroll-btn down"
                title="Scroll down"
                disabled=move || affordance().down_disabled
                on:click=move |_| ctx.scroll(ScrollDirection::Down)
            >
                "▼"
            </button>
        </div>
    }
}
