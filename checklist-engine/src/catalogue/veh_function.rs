use crate::definition::{ChecklistDefinition, Completion, CompletionRule, RevealRule, Target};
use crate::domain::{ChecklistItem, Panel, Question, SessionConfig};

pub fn definition() -> ChecklistDefinition {
    ChecklistDefinition::builder("veh-function", "VEHICLE FUNCTION")
        .config(SessionConfig::single_page().native_scroll().next("home"))
        .page("VEHICLE FUNCTION", |p| {
            p.item_with(ChecklistItem::new("vf-armed-item", "Vehicle armed in MANUAL mode").prereq_for("q1"))
                .item_with(ChecklistItem::new("vf-joystick-item", "Joystick detected in QGroundControl").prereq_for("q1"))
                .question(Question::yes_no("q1", "Do all thrusters respond to the joystick?"))
                .item_with(ChecklistItem::new("blueos-restart-item", "Restart BlueOS from its web interface").when("q1", "no"))
                .item_with(ChecklistItem::new("vehicle-arming-retry-item", "Arm the vehicle again").when("q1", "no"))
                .panel(Panel::instruction(
                    "q1-retry-instruction",
                    "Test the thrusters again and answer the question above.",
                ))
                .panel(
                    Panel::abort("q1-abort", "If thrusters still do not respond after a retry, %r%ABORT MISSION%r%.")
                        .when("q1", "no"),
                )
                .panel(Panel::success("q1-success", "Vehicle responding. Resume the mission.").when("q1", "yes"))
        })
        .reveal(
            RevealRule::when_checked(&["blueos-restart-item", "vehicle-arming-retry-item"])
                .reveal(&["q1-retry-instruction"])
                .reset("q1")
                .dismissed_by("q1", "yes"),
        )
        .completion(CompletionRule::new(
            Completion::AnyVisible(vec![Target::path("q1", "yes")]),
            "MISSION READY",
        ))
        .build()
}
