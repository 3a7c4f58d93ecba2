//! Item Row Component
//!
//! One checkable task. Hidden rows stay mounted with `display: none` so
//! they can be measured once revealed.

use leptos::prelude::*;

use crate::context::use_checklist;
use crate::layout::display;
use crate::markdown::parse_markdown_inline;

/// A single checklist item row
#[component]
pub fn ItemRow(id: String) -> impl IntoView {
    let ctx = use_checklist();

    let text = ctx
        .read_untracked(|s| s.item(&id).map(|item| parse_markdown_inline(&item.text)))
        .flatten()
        .unwrap_or_default();

    let visible = {
        let id = id.clone();
        move || ctx.read(|s| s.is_visible(&id)).unwrap_or(false)
    };

    let row_class = {
        let id = id.clone();
        move || {
            if ctx.read(|s| s.is_checked(&id)).unwrap_or(false) {
                "checklist-item checked"
            } else {
                "checklist-item"
            }
        }
    };

    let on_click = {
        let id = id.clone();
        move |_| ctx.toggle(&id)
    };

    view! {
        <div id=id class=row_class style:display=move || display(visible()) on:click=on_click>
            <span class="checkbox"></span>
            <span class="item-text" inner_html=text></span>
        </div>
    }
}
