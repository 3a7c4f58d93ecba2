use crate::definition::{ChecklistDefinition, Completion, CompletionRule, TabRule};
use crate::domain::{Panel, SessionConfig};

pub fn definition() -> ChecklistDefinition {
    ChecklistDefinition::builder("during-flight", "DURING FLIGHT")
        .config(SessionConfig::default().with_pages().native_scroll().next("post-flight"))
        .page("DEPLOYMENT", |p| {
            p.item("deploy-tether-item", "Tether handler in position with slack managed")
                .item("deploy-launch-item", "Lower the vehicle into the water, do not drop it")
                .item("deploy-bubbles-item", "No bubbles escaping from the enclosures")
                .item("deploy-arm-item", "Arm the vehicle once it is clear of people")
                .panel(Panel::proceed("deployment-proceed", "DEPLOYED. Proceed to **PILOTING**."))
        })
        .page("PILOTING", |p| {
            p.item("pilot-depth-item", "Depth hold engaged before descending")
                .item("pilot-heading-item", "Note the heading back to the launch point")
                .item("pilot-tether-item", "Call tether out and tether in to the handler")
                .panel(Panel::proceed("piloting-proceed", "PILOTING UNDER WAY. Proceed to **MONITORING**."))
        })
        .page("MONITORING", |p| {
            p.item("mon-battery-item", "Return when the vehicle battery reaches 14.8V")
                .item("mon-leak-item", "No leak alarm")
                .item("mon-temp-item", "Internal temperature below 60°C")
                .item("mon-cs-battery-item", "Control station battery above 25%")
                .panel(Panel::complete("monitoring-complete", "MONITORING COMPLETE. Recover the vehicle."))
        })
        .tab_rule(
            TabRule::all_checked()
                .proceed(0, "deployment-proceed")
                .proceed(1, "piloting-proceed")
                .proceed(2, "monitoring-complete"),
        )
        .completion(CompletionRule::new(Completion::AllItemsChecked, "CHECKLIST COMPLETE").on_last_page_only())
        .build()
}
