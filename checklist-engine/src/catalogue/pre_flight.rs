use crate::definition::{ChecklistDefinition, Completion, CompletionRule, TabRule};
use crate::domain::{Panel, SessionConfig};

pub fn definition() -> ChecklistDefinition {
    ChecklistDefinition::builder("pre-flight", "PRE-FLIGHT")
        .config(SessionConfig::default().with_pages().next("during-flight"))
        .page("CONTROL STATION", |p| {
            p.item("cs-setup-item", "Set up the control station in shade, out of the spray zone")
                .item("cs-battery-item", "Control station battery charged above 80%")
                .item("cs-laptop-item", "Laptop powered from the control station battery")
                .item("cs-joystick-item", "Joystick connected")
                .item("cs-fxti-item", "FXTI connected to the laptop")
                .panel(Panel::proceed("control-proceed", "CONTROL STATION READY. Proceed to **VEHICLE**."))
        })
        .page("VEHICLE", |p| {
            p.item("veh-hull-item", "Inspect the hull and enclosures for cracks")
                .item("veh-orings-item", "O-rings clean and seated on every penetrator")
                .item("veh-props-item", "Propellers free of debris and spin freely")
                .item("veh-battery-item", "Vehicle battery charged and secured")
                .item("veh-vent-item", "Vent plug installed and tightened")
                .panel(Panel::proceed("vehicle-proceed", "VEHICLE READY. Proceed to **TETHER SPOOL**."))
        })
        .page("TETHER SPOOL", |p| {
            p.item("tether-damage-item", "Tether jacket free of cuts and kinks")
                .item("tether-connector-item", "Tether connector clean and dry")
                .item("tether-strain-item", "Strain relief attached to the vehicle frame")
                .panel(Panel::proceed("tether-proceed", "TETHER READY. Proceed to **SOFTWARE**."))
        })
        .page("SOFTWARE", |p| {
            p.item("sw-qgc-item", "QGroundControl running")
                .item("sw-heartbeat-item", "Vehicle heartbeat received")
                .item("sw-video-item", "Video feed visible")
                .item("sw-sensors-item", "Depth and heading readings plausible")
                .panel(Panel::proceed("software-proceed", "SOFTWARE READY. Proceed to **DRY TEST**."))
        })
        .page("DRY TEST", |p| {
            p.item("dry-arm-item", "Arm the vehicle")
                .item("dry-thrusters-item", "Pulse each thruster briefly")
                .item("dry-lights-item", "Lights respond to the joystick")
                .item("dry-disarm-item", "Disarm the vehicle")
                .panel(Panel::warning(
                    "not-ready-message-row",
                    "%r%NOT READY%r%: complete every item before deployment.",
                ).shown())
                .panel(Panel::complete("completion-message-row", "PRE-FLIGHT COMPLETE. Vehicle is ready for deployment."))
        })
        .tab_rule(
            TabRule::all_checked()
                .proceed(0, "control-proceed")
                .proceed(1, "vehicle-proceed")
                .proceed(2, "tether-proceed")
                .proceed(3, "software-proceed"),
        )
        .completion(
            CompletionRule::new(Completion::AllItemsChecked, "CHECKLIST COMPLETE")
                .show("completion-message-row")
                .hide("not-ready-message-row"),
        )
        .build()
}
