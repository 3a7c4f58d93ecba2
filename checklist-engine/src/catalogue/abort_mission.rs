use crate::definition::{ChecklistDefinition, Completion, CompletionRule, RevealRule, TabRule, Target};
use crate::domain::{ChecklistItem, Panel, Question, SessionConfig};

/// Page-0 elements that mean the immediate actions are done
fn immediate_endpoints() -> Vec<Target> {
    vec![
        Target::element("vehicle-instructions"),
        Target::element("disarm-instructions"),
        Target::path("q1", "yes"),
        Target::path("q2", "no"),
    ]
}

pub fn definition() -> ChecklistDefinition {
    let tab_rule = immediate_endpoints()
        .into_iter()
        .fold(TabRule::all_checked(), TabRule::endpoint);

    ChecklistDefinition::builder("abort-mission", "ABORT MISSION")
        .config(SessionConfig::default().with_pages().next("home"))
        .page("IMMEDIATE ACTIONS", |p| {
            p.question(Question::yes_no("q1", "Is the vehicle already at the surface?"))
                .item_with(
                    ChecklistItem::new("vehicle-retrieved-item", "Pull the vehicle in by the tether").when("q1", "yes"),
                )
                .panel(Panel::instruction(
                    "vehicle-instructions",
                    "Vehicle retrieved. Continue to **VEHICLE**.",
                ))
                .question(Question::yes_no("q2", "Can you still pilot the vehicle?").when("q1", "no"))
                .item_with(
                    ChecklistItem::new("vehicle-disarm-item", "Surface the vehicle, then disarm").when("q2", "yes"),
                )
                .panel(Panel::instruction(
                    "disarm-instructions",
                    "Vehicle disarmed. Continue to **VEHICLE**.",
                ))
                .panel(
                    Panel::abort(
                        "q2-no-action",
                        "Recover the vehicle hand over hand by the tether. %r%Do not pull on the connector.%r%",
                    )
                    .when("q2", "no"),
                )
        })
        .page("VEHICLE", |p| {
            p.item("am-disarm-item", "Vehicle disarmed")
                .item("am-battery-item", "Vehicle battery disconnected")
                .item("am-leak-item", "Check enclosures for water ingress")
        })
        .page("TETHER", |p| {
            p.item("am-tether-slack-item", "Tether coiled clear of the walkway")
                .item("am-tether-inspect-item", "Inspect the tether for damage")
        })
        .page("CONTROL STATION", |p| {
            p.question(Question::yes_no("cs-q1", "Will you redeploy today?"))
                .item_with(ChecklistItem::new("cs-yes-log-item", "Save the log of the aborted dive").when("cs-q1", "yes"))
                .item_with(
                    ChecklistItem::new("cs-yes-charge-item", "Charge the control station battery").when("cs-q1", "yes"),
                )
                .panel(Panel::complete("cs-yes-complete", "Control station ready for redeployment."))
                .item_with(ChecklistItem::new("cs-no-qgc-item", "Close QGroundControl").when("cs-q1", "no"))
                .item_with(
                    ChecklistItem::new("cs-no-power-item", "Power off the control station").when("cs-q1", "no"),
                )
                .panel(Panel::complete("cs-no-complete", "Control station shut down."))
        })
        .reveal(
            RevealRule::when_checked(&["vehicle-retrieved-item"]).reveal(&["vehicle-instructions"]),
        )
        .reveal(RevealRule::when_checked(&["vehicle-disarm-item"]).reveal(&["disarm-instructions"]))
        .branch_complete("cs-q1", "yes", "cs-yes-complete")
        .branch_complete("cs-q1", "no", "cs-no-complete")
        .tab_rule(tab_rule)
        .completion(CompletionRule::new(
            Completion::All(vec![
                Completion::AnyVisible(vec![
                    Target::element("cs-yes-complete"),
                    Target::element("cs-no-complete"),
                ]),
                Completion::AnyVisible(immediate_endpoints()),
                Completion::PageChecked(1),
                Completion::PageChecked(2),
            ]),
            "SYSTEM SECURED",
        ))
        .build()
}
