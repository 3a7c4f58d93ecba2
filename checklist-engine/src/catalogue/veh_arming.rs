use crate::definition::{ChecklistDefinition, Completion, CompletionRule, RevealRule, Target};
use crate::domain::{ChecklistItem, Panel, Question, SessionConfig};

pub fn definition() -> ChecklistDefinition {
    ChecklistDefinition::builder("veh-arming", "VEHICLE ARMING")
        .config(SessionConfig::single_page().native_scroll().next("home"))
        .page("VEHICLE ARMING", |p| {
            p.question(Question::yes_no("q1", "Does QGroundControl show the vehicle connected?"))
                .panel(
                    Panel::link("q1-connect-link", "Work through **VEHICLE CONNECTION ISSUES**.", "veh-connect-issues")
                        .when("q1", "no"),
                )
                .question(Question::yes_no("q2", "Are the pre-arm checks passing?").when("q1", "yes"))
                .item_with(ChecklistItem::new("blueos-restart-item", "Restart BlueOS and wait for the heartbeat").when("q2", "no"))
                .panel(Panel::instruction(
                    "q2-retry-instruction",
                    "Check the pre-arm messages again and answer the question above.",
                ))
                .question(Question::yes_no("q3", "Does the vehicle arm?").when("q2", "yes"))
                .item_with(
                    ChecklistItem::new("vehicle-arming-retry-item", "Switch to MANUAL mode and arm again")
                        .when("q3", "no"),
                )
                .panel(Panel::instruction(
                    "q3-retry-instruction",
                    "Watch for the arming tone and answer the question above.",
                ))
                .panel(Panel::success("q3-success", "Vehicle armed. Resume the mission.").when("q3", "yes"))
        })
        .reveal(
            RevealRule::when_checked(&["vehicle-arming-retry-item"])
                .reveal(&["q3-retry-instruction"])
                .reset("q3")
                .dismissed_by("q3", "yes"),
        )
        .reveal(
            RevealRule::when_checked(&["blueos-restart-item"])
                .reveal(&["q2-retry-instruction"])
                .reset("q2")
                .dismissed_by("q2", "yes"),
        )
        .completion(CompletionRule::new(
            Completion::AnyVisible(vec![Target::path("q3", "yes")]),
            "MISSION READY",
        ))
        .build()
}
