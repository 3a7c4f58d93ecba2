//! Question Row Component
//!
//! Prompt plus one button per choice. Choices stay disabled until the
//! question's prerequisites are checked and while an answer is locked in.

use leptos::prelude::*;

use crate::context::use_checklist;
use crate::layout::display;
use crate::markdown::parse_markdown_inline;

#[component]
pub fn QuestionRow(id: String) -> impl IntoView {
    let ctx = use_checklist();

    let Some((prompt, choices)) = ctx
        .read_untracked(|s| {
            s.question(&id)
                .map(|q| (parse_markdown_inline(&q.prompt), q.choices.clone()))
        })
        .flatten()
    else {
        return ().into_any();
    };

    let visible = {
        let id = id.clone();
        move || ctx.read(|s| s.is_visible(&id)).unwrap_or(false)
    };

    let row_class = {
        let id = id.clone();
        move || {
            let (answered, waiting) = ctx
                .read(|s| {
                    (
                        s.question(&id).map_or(false, |q| q.locked),
                        !s.prerequisites_met(&id),
                    )
                })
                .unwrap_or_default();
            match (answered, waiting) {
                (true, _) => "question-item answered",
                (false, true) => "question-item waiting",
                (false, false) => "question-item",
            }
        }
    };

    let buttons = choices
        .into_iter()
        .map(|choice| {
            let value = choice.value.clone();
            let selected = {
                let (id, value) = (id.clone(), value.clone());
                move || {
                    ctx.read(|s| s.question(&id).map_or(false, |q| q.is_selected(&value)))
                        .unwrap_or(false)
                }
            };
            let disabled = {
                let id = id.clone();
                move || !ctx.read(|s| s.choices_enabled(&id)).unwrap_or(false)
            };
            let on_click = {
                let id = id.clone();
                move |_| ctx.choose(&id, &value)
            };
            view! {
                <button
                    class=move || if selected() { "option-btn selected" } else { "option-btn" }
                    disabled=disabled
                    on:click=on_click
                >
                    {choice.label}
                </button>
            }
        })
        .collect_view();

    view! {
        <div id=id class=row_class style:display=move || display(visible())>
            <span class="question-text" inner_html=prompt></span>
            <div class="question-options">{buttons}</div>
        </div>
    }
    .into_any()
}
