//! Panel Component
//!
//! Instruction, warning, outcome and link blocks.

use leptos::prelude::*;

use crate::context::use_checklist;
use crate::layout::display;
use crate::markdown::parse_markdown;

#[component]
pub fn PanelRow(id: String) -> impl IntoView {
    let ctx = use_checklist();

    let Some((html, tone, link)) = ctx
        .read_untracked(|s| {
            s.panel(&id)
                .map(|p| (parse_markdown(&p.text), p.tone.as_str(), p.link.clone()))
        })
        .flatten()
    else {
        return ().into_any();
    };

    let panel_class = format!("panel {}", tone);
    let visible = {
        let id = id.clone();
        move || ctx.read(|s| s.is_visible(&id)).unwrap_or(false)
    };

    match link {
        Some(slug) => view! {
            <a id=id class=panel_class style:display=move || display(visible()) href=format!("#{}", slug) inner_html=html></a>
        }
        .into_any(),
        None => view! {
            <div id=id class=panel_class style:display=move || display(visible()) inner_html=html></div>
        }
        .into_any(),
    }
}
