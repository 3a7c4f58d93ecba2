use crate::definition::{ChecklistDefinition, Completion, CompletionRule, TabRule};
use crate::domain::{Panel, SessionConfig};

pub fn definition() -> ChecklistDefinition {
    ChecklistDefinition::builder("post-flight", "POST-FLIGHT")
        .config(SessionConfig::default().with_pages().next("home"))
        .page("PILOTING", |p| {
            p.item("pf-surface-item", "Surface the vehicle near the launch point")
                .item("pf-disarm-item", "Disarm before anyone handles the vehicle")
                .item("pf-recover-item", "Lift the vehicle out by the frame, not the tether")
                .panel(Panel::proceed("piloting-proceed", "VEHICLE RECOVERED. Proceed to **VEHICLE**."))
        })
        .page("VEHICLE", |p| {
            p.item("pf-rinse-item", "Rinse the vehicle with fresh water")
                .item("pf-battery-item", "Disconnect and remove the vehicle battery")
                .item("pf-dry-item", "Dry the enclosures and vent plug")
                .panel(Panel::proceed("vehicle-proceed", "VEHICLE SECURED. Proceed to **TETHER**."))
        })
        .page("TETHER", |p| {
            p.item("pf-tether-rinse-item", "Rinse the tether while spooling it")
                .item("pf-tether-inspect-item", "Inspect the tether for damage")
                .item("pf-tether-cap-item", "Cap the tether connector")
                .panel(Panel::proceed("tether-proceed", "TETHER STOWED. Proceed to **CONTROL STATION**."))
        })
        .page("CONTROL STATION", |p| {
            p.item("pf-log-item", "Save the flight log and video")
                .item("pf-qgc-item", "Close QGroundControl")
                .item("pf-cs-off-item", "Power off the control station")
                .item("pf-charge-item", "Put every battery on charge")
                .panel(Panel::complete("completion-message-row", "POST-FLIGHT COMPLETE. Equipment stowed."))
        })
        .tab_rule(
            TabRule::all_checked()
                .proceed(0, "piloting-proceed")
                .proceed(1, "vehicle-proceed")
                .proceed(2, "tether-proceed"),
        )
        .completion(
            CompletionRule::new(Completion::AllItemsChecked, "CHECKLIST COMPLETE")
                .show("completion-message-row")
                .on_last_page_only(),
        )
        .build()
}
