use crate::definition::ChecklistDefinition;
use crate::domain::{Panel, SessionConfig};

pub fn definition() -> ChecklistDefinition {
    ChecklistDefinition::builder("welcome", "ROV CHECKLIST")
        .config(SessionConfig::single_page().untracked().locked_scroll())
        .page("WELCOME", |p| {
            p.panel(Panel::instruction("welcome-intro", "Step-by-step checklists for **ROV** operations.").shown())
                .panel(
                    Panel::instruction(
                        "welcome-usage",
                        "Tap a row to check it off. Answer questions to reveal the next steps.",
                    )
                    .shown(),
                )
                .panel(Panel::link("welcome-start", "START", "home"))
        })
        .build()
}
