//! Sub-Tab Bar Component
//!
//! Tab bar for switching between the pages of a checklist.

use leptos::prelude::*;

use crate::context::use_checklist;

/// Sub-tab bar; renders nothing for single-page checklists
#[component]
pub fn SubTabBar() -> impl IntoView {
    let ctx = use_checklist();

    let enabled = move || ctx.read(|s| s.config().has_sub_tabs).unwrap_or(false);
    let tabs = move || {
        ctx.read(|s| {
            s.pages()
                .iter()
                .map(|page| (page.index, page.title.clone()))
                .collect::<Vec<_>>()
        })
        .unwrap_or_default()
    };

    view! {
        <Show when=enabled>
            <nav class="sub-tab-bar">
                <For
                    each=tabs
                    key=|(index, title)| (*index, title.clone())
                    children=move |(index, title)| {
                        let tab_class = move || {
                            let (active, done) = ctx
                                .read(|s| (s.current_page() == index, s.page_done(index)))
                                .unwrap_or_default();
                            match (active, done) {
                                (true, _) => "sub-tab active",
                                (false, true) => "sub-tab done",
                                (false, false) => "sub-tab",
                            }
                        };

                        view! {
                            <button class=tab_class on:click=move |_| ctx.show_page(index)>
                                {title}
                            </button>
                        }
                    }
                />
            </nav>
        </Show>
    }
}
