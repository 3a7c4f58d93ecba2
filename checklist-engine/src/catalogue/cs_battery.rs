use crate::definition::{ChecklistDefinition, Completion, CompletionRule, RevealRule, Target};
use crate::domain::{ChecklistItem, Panel, Question, SessionConfig};

pub fn definition() -> ChecklistDefinition {
    ChecklistDefinition::builder("cs-battery-failure", "CONTROL STATION BATTERY FAILURE")
        .config(SessionConfig::single_page().next("home"))
        .page("CONTROL STATION BATTERY FAILURE", |p| {
            p.item_with(ChecklistItem::new("cs-hold-item", "Hold position and tell the team").prereq_for("q1"))
                .item_with(ChecklistItem::new("cs-note-item", "Note the remaining vehicle battery").prereq_for("q1"))
                .question(Question::yes_no("q1", "Is the battery power indicator on?"))
                .item_with(
                    ChecklistItem::new("battery-power-button-item", "Press and hold the battery power button for 3 seconds")
                        .when("q1", "no"),
                )
                .panel(Panel::instruction(
                    "battery-instructions",
                    "Wait 10 seconds, then answer the question above again.",
                ))
                .panel(Panel::abort(
                    "battery-abort-action",
                    "If the battery stays off, %r%ABORT MISSION%r%.",
                ))
                .question(Question::yes_no("q2", "Is the battery charge above 25%?").when("q1", "yes"))
                .panel(Panel::abort("q2-abort", "Battery too low. %r%ABORT MISSION%r%.").when("q2", "no"))
                .question(Question::yes_no("q3", "Is the laptop showing as charging?").when("q2", "yes"))
                .item_with(ChecklistItem::new("q3-battery-off-item", "Turn the battery off").when("q3", "no"))
                .item_with(ChecklistItem::new("q3-battery-on-item", "Turn the battery back on").when("q3", "no"))
                .item_with(ChecklistItem::new("q3-dc-output-item", "Enable the DC output").when("q3", "no"))
                .panel(Panel::instruction(
                    "q3-instructions",
                    "Check the laptop charging indicator and answer again.",
                ))
                .panel(Panel::abort(
                    "q3-abort-action",
                    "If the laptop still is not charging, %r%ABORT MISSION%r% before its battery runs out.",
                ))
                .question(Question::yes_no("q4", "Are the video feed and telemetry still live?").when("q3", "yes"))
                .panel(Panel::success("q4-success", "Control station power restored. Resume the mission.").when("q4", "yes"))
                .panel(Panel::abort("q4-abort", "Control link lost. %r%ABORT MISSION%r%.").when("q4", "no"))
        })
        .reveal(
            RevealRule::when_checked(&["battery-power-button-item"])
                .reveal(&["battery-instructions", "battery-abort-action"])
                .reset("q1")
                .dismissed_by("q1", "yes"),
        )
        .reveal(
            RevealRule::when_checked(&["q3-battery-off-item", "q3-battery-on-item", "q3-dc-output-item"])
                .reveal(&["q3-instructions", "q3-abort-action"])
                .reset("q3")
                .dismissed_by("q3", "yes")
                .sticky(),
        )
        .completion(CompletionRule::new(
            Completion::AnyVisible(vec![Target::path("q4", "yes")]),
            "MISSION READY",
        ))
        .build()
}
