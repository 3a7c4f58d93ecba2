use crate::definition::{ChecklistDefinition, Completion, CompletionRule, RevealRule, TabRule, Target};
use crate::domain::{ChecklistItem, Panel, Question, SessionConfig};

pub fn definition() -> ChecklistDefinition {
    ChecklistDefinition::builder("veh-connect-issues", "VEHICLE CONNECTION ISSUES")
        .config(SessionConfig::default().with_pages().next("home"))
        .page("PHYSICAL CONNECTION", |p| {
            p.item_with(
                ChecklistItem::new("pc-tether-item", "Tether seated at the FXTI and the vehicle penetrator")
                    .prereq_for("q1"),
            )
            .item_with(ChecklistItem::new("pc-fxti-item", "FXTI USB cable plugged into the laptop").prereq_for("q1"))
            .question(Question::yes_no("q1", "Is the FXTI link light on?"))
            .panel(
                Panel::instruction(
                    "q1-no-instruction",
                    "Reseat the FXTI USB cable, then continue to **SOFTWARE CONNECTION**.",
                )
                .when("q1", "no"),
            )
            .question(Question::yes_no("q2", "Does the laptop show a wired network connection?").when("q1", "yes"))
            .panel(
                Panel::instruction(
                    "q2-no-instruction",
                    "Set the Ethernet adapter to static IP `192.168.2.1`, then continue to **SOFTWARE CONNECTION**.",
                )
                .when("q2", "no"),
            )
            .question(Question::yes_no("q3", "Does `ping 192.168.2.2` reply?").when("q2", "yes"))
            .panel(Panel::success("q3-success", "Link restored. Resume the mission.").when("q3", "yes"))
            .panel(
                Panel::instruction("q3-no-instruction", "Continue to **SOFTWARE CONNECTION**.").when("q3", "no"),
            )
        })
        .page("SOFTWARE CONNECTION", |p| {
            p.question(Question::yes_no("sw-q1", "Is QGroundControl running?"))
                .panel(
                    Panel::instruction("sw-q1-no-instruction", "Start QGroundControl, then continue to **VEHICLE CONNECTION**.")
                        .when("sw-q1", "no"),
                )
                .question(Question::yes_no("sw-q2", "Does BlueOS load at `http://192.168.2.2`?").when("sw-q1", "yes"))
                .item_with(ChecklistItem::new("blueos-restart-item", "Power cycle the vehicle to restart BlueOS").when("sw-q2", "no"))
                .panel(Panel::instruction(
                    "blueos-restart-instruction",
                    "Wait 60 seconds for BlueOS to boot, then answer again.",
                ))
                .question(Question::yes_no("sw-q3", "Does QGroundControl show the vehicle connected?").when("sw-q2", "yes"))
                .panel(Panel::success("sw-q3-success", "Software link restored. Resume the mission.").when("sw-q3", "yes"))
                .panel(
                    Panel::instruction("sw-q3-no-instruction", "Continue to **VEHICLE CONNECTION**.").when("sw-q3", "no"),
                )
        })
        .page("VEHICLE CONNECTION", |p| {
            p.question(Question::yes_no("vc-q1", "Did the vehicle lights flash at power on?"))
                .panel(
                    Panel::instruction("vc-q1-shared", "Keep the vehicle in the water while testing.")
                        .when("vc-q1", "yes")
                        .when("vc-q1", "no"),
                )
                .question(Question::yes_no("vc-q2b", "Is the vehicle battery above 14.8V?").when("vc-q1", "no"))
                .item_with(ChecklistItem::new("vc-battery-check-item", "Swap in a charged vehicle battery").when("vc-q2b", "no"))
                .panel(Panel::instruction(
                    "vc-battery-try-again-instruction",
                    "Power the vehicle on again and watch the lights.",
                ))
                .panel(Panel::instruction(
                    "vc-q2b-reselect-instruction",
                    "Answer the battery question again.",
                ))
                .panel(Panel::abort("vc-q2b-abort", "Vehicle unresponsive. %r%ABORT MISSION%r%.").when("vc-q2b", "yes"))
                .question(Question::yes_no("vc-q2", "Is BlueOS reporting a heartbeat?").when("vc-q1", "yes"))
                .item_with(
                    ChecklistItem::new("vc-blueos-wait-item", "Wait two minutes for BlueOS to finish starting")
                        .when("vc-q2", "no"),
                )
                .panel(Panel::instruction(
                    "vc-blueos-restore-instruction",
                    "Check the heartbeat again and answer the question above.",
                ))
                .question(Question::yes_no("vc-q3", "Is the autopilot detected in BlueOS?").when("vc-q2", "yes"))
                .panel(Panel::abort("vc-q3-abort", "Autopilot missing. %r%ABORT MISSION%r%.").when("vc-q3", "no"))
                .question(Question::yes_no("vc-q4", "Does QGroundControl connect now?").when("vc-q3", "yes"))
                .panel(Panel::success("vc-q4-success", "Vehicle connected. Resume the mission.").when("vc-q4", "yes"))
                .panel(Panel::abort("vc-q4-abort", "%r%ABORT MISSION%r%.").when("vc-q4", "no"))
        })
        .clear_branches_on_page_change()
        .reveal(
            RevealRule::when_checked(&["blueos-restart-item"])
                .reveal(&["blueos-restart-instruction"])
                .reset("sw-q2")
                .dismissed_by("sw-q2", "yes"),
        )
        .reveal(
            RevealRule::when_checked(&["vc-battery-check-item"])
                .reveal(&["vc-battery-try-again-instruction", "vc-q2b-reselect-instruction"])
                .reset("vc-q2b")
                .dismissed_by("vc-q2b", "yes"),
        )
        .reveal(
            RevealRule::when_checked(&["vc-blueos-wait-item"])
                .reveal(&["vc-blueos-restore-instruction"])
                .reset("vc-q2")
                .dismissed_by("vc-q2", "yes"),
        )
        .tab_rule(
            TabRule::endpoints_only()
                .endpoint(Target::path("q1", "no"))
                .endpoint(Target::path("q2", "no"))
                .endpoint(Target::path("q3", "no"))
                .endpoint(Target::path("sw-q1", "no"))
                .endpoint(Target::path("sw-q3", "no"))
                .endpoint(Target::element("blueos-restart-instruction")),
        )
        .completion(CompletionRule::new(
            Completion::AnyVisible(vec![
                Target::path("q3", "yes"),
                Target::path("sw-q3", "yes"),
                Target::path("vc-q4", "yes"),
            ]),
            "MISSION READY",
        ))
        .build()
}
