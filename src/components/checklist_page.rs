//! Checklist Page Component
//!
//! Rows of the active page inside the scroll container.

use leptos::prelude::*;
use rov_checklist_engine::domain::{Row, ScrollMode};
use rov_checklist_engine::{ElementId, Session};

use crate::components::{ItemRow, PanelRow, QuestionRow};
use crate::context::use_checklist;
use crate::layout::{CONTAINER_ID, WRAPPER_ID};

/// Row identity across sessions; ids repeat between checklists
pub type RowKey = (String, ElementId);

/// Keyed rows of the active page
pub fn active_rows(session: &Session) -> Vec<(RowKey, Row)> {
    let Some(page) = session.pages().get(session.current_page()) else {
        return Vec::new();
    };
    page.rows
        .iter()
        .map(|row| ((session.slug().to_string(), row.id().clone()), row.clone()))
        .collect()
}

#[component]
pub fn ChecklistPage() -> impl IntoView {
    let ctx = use_checklist();

    let rows = move || ctx.read(active_rows).unwrap_or_default();

    let mode = move || ctx.read(|s| s.config().scroll_mode()).unwrap_or(ScrollMode::Transform);
    let wrapper_class = move || match mode() {
        ScrollMode::Native => "scroll-wrapper native",
        ScrollMode::Transform => "scroll-wrapper",
        ScrollMode::Locked => "scroll-wrapper locked",
    };

    // Wheel and touch scrolling move a native container behind the engine's back
    let on_scroll = move |_| {
        if ctx.read_untracked(|s| s.config().scroll_mode()) == Some(ScrollMode::Native) {
            ctx.settle();
        }
    };

    view! {
        <div id=CONTAINER_ID class="page-content">
            <div id=WRAPPER_ID class=wrapper_class on:scroll=on_scroll>
                <For
                    each=rows
                    key=|(key, _)| key.clone()
                    children=move |(_, row)| match row {
                        Row::Item(id) => view! { <ItemRow id=id.to_string() /> }.into_any(),
                        Row::Question(id) => view! { <QuestionRow id=id.to_string() /> }.into_any(),
                        Row::Panel(id) => view! { <PanelRow id=id.to_string() /> }.into_any(),
                    }
                />
            </div>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rov_checklist_engine::catalogue;

    fn key_of(session: &Session, id: &str) -> Option<RowKey> {
        active_rows(session)
            .into_iter()
            .map(|(key, _)| key)
            .find(|(_, row_id)| row_id.as_str() == id)
    }

    #[test]
    fn test_shared_ids_get_distinct_keys() {
        let arming = catalogue::open("veh-arming").unwrap();
        let connect = catalogue::open("veh-connect-issues").unwrap();

        let arming_q1 = key_of(&arming, "q1").unwrap();
        let connect_q1 = key_of(&connect, "q1").unwrap();
        assert_eq!(arming_q1.1, connect_q1.1);
        assert_ne!(arming_q1, connect_q1);
    }

    #[test]
    fn test_keys_follow_the_active_page() {
        let mut session = catalogue::open("pre-flight").unwrap();
        let first: Vec<RowKey> = active_rows(&session).into_iter().map(|(key, _)| key).collect();
        assert!(!first.is_empty());

        session.show_page(1);
        let second: Vec<RowKey> = active_rows(&session).into_iter().map(|(key, _)| key).collect();
        assert!(second.iter().all(|key| !first.contains(key)));

        session.show_page(0);
        let again: Vec<RowKey> = active_rows(&session).into_iter().map(|(key, _)| key).collect();
        assert_eq!(first, again);
    }
}
