use crate::definition::ChecklistDefinition;
use crate::domain::{Panel, SessionConfig};

pub fn definition() -> ChecklistDefinition {
    ChecklistDefinition::builder("home", "HOME")
        .config(SessionConfig::default().with_pages().untracked())
        .page("CHECKLISTS", |p| {
            p.panel(Panel::link("home-pre-flight", "PRE-FLIGHT", "pre-flight"))
                .panel(Panel::link("home-during-flight", "DURING FLIGHT", "during-flight"))
                .panel(Panel::link("home-post-flight", "POST-FLIGHT", "post-flight"))
        })
        .page("TROUBLESHOOTING", |p| {
            p.panel(Panel::link(
                "home-cs-battery",
                "CONTROL STATION BATTERY FAILURE",
                "cs-battery-failure",
            ))
            .panel(Panel::link("home-veh-connect", "VEHICLE CONNECTION ISSUES", "veh-connect-issues"))
            .panel(Panel::link("home-veh-function", "VEHICLE FUNCTION", "veh-function"))
            .panel(Panel::link("home-veh-arming", "VEHICLE ARMING", "veh-arming"))
            .panel(Panel::link("home-abort", "%r%ABORT MISSION%r%", "abort-mission"))
        })
        .build()
}
