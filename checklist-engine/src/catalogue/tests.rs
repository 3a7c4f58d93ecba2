use std::collections::HashSet;

use super::*;
use crate::domain::Row;

fn check_all_items(session: &mut Session, page: usize) {
    let ids: Vec<String> = session.pages()[page]
        .item_ids()
        .map(|id| id.to_string())
        .collect();
    for id in ids {
        if session.is_visible(&id) && !session.is_checked(&id) {
            session.toggle_item(&id);
        }
    }
}

#[test]
fn test_every_builtin_opens() {
    for slug in SLUGS {
        let session = open(slug).unwrap_or_else(|e| panic!("{}: {}", slug, e));
        assert_eq!(session.slug(), *slug);
    }
    assert_eq!(all().len(), SLUGS.len());
}

#[test]
fn test_unknown_slug() {
    assert!(by_slug("nope").is_none());
    assert!(matches!(open("nope"), Err(DomainError::NotFound(_))));
    assert!(by_slug(DEFAULT_SLUG).is_some());
}

#[test]
fn test_links_and_next_point_at_known_checklists() {
    let known: HashSet<&str> = SLUGS.iter().copied().collect();
    for definition in all() {
        if let Some(next) = &definition.config.next_checklist {
            assert!(known.contains(next.as_str()), "{} -> {}", definition.slug, next);
        }
        for row in definition.rows() {
            if let crate::definition::RowSpec::Panel(panel) = row {
                if let Some(link) = &panel.link {
                    assert!(known.contains(link.as_str()), "{} links to {}", definition.slug, link);
                }
            }
        }
    }
}

#[test]
fn test_menu_pages_are_untracked() {
    for slug in ["welcome", "home"] {
        let session = open(slug).unwrap();
        assert!(session.progress().is_none(), "{}", slug);
    }
    let welcome = open("welcome").unwrap();
    assert!(welcome.scroll_affordance().up_disabled);
    assert!(welcome.scroll_affordance().down_disabled);
}

#[test]
fn test_pre_flight_tab_proceed_and_completion() {
    let mut session = open("pre-flight").unwrap();
    assert!(session.is_visible("not-ready-message-row"));
    assert!(!session.is_visible("control-proceed"));

    check_all_items(&mut session, 0);
    assert!(session.is_visible("control-proceed"));
    assert!(session.pager().next_highlighted);

    for page in 0..session.pages().len() {
        session.show_page(page);
        check_all_items(&mut session, page);
    }
    let progress = session.progress().unwrap();
    assert!(progress.complete);
    assert!(progress.text().ends_with(" -- CHECKLIST COMPLETE"));
    assert!(session.is_visible("completion-message-row"));
    assert!(!session.is_visible("not-ready-message-row"));
    assert!(session.footer().next_checklist_visible);
    assert!(!session.footer().pager_visible);
}

#[test]
fn test_during_flight_offers_next_only_on_last_page() {
    let mut session = open("during-flight").unwrap();
    for page in 0..session.pages().len() {
        session.show_page(page);
        check_all_items(&mut session, page);
    }
    assert!(session.is_visible("monitoring-complete"));
    assert!(session.footer().next_checklist_visible);

    session.show_page(0);
    assert!(session.progress().unwrap().complete);
    assert!(!session.footer().next_checklist_visible);
    assert!(session.footer().pager_visible);
}

#[test]
fn test_cs_battery_power_button_resets_q1() {
    let mut session = open("cs-battery-failure").unwrap();
    assert!(!session.choices_enabled("q1"));
    session.toggle_item("cs-hold-item");
    session.toggle_item("cs-note-item");
    assert!(session.choices_enabled("q1"));

    session.select_choice("q1", "no");
    assert!(session.is_visible("battery-power-button-item"));
    assert!(!session.choices_enabled("q1"));

    session.toggle_item("battery-power-button-item");
    assert!(session.is_visible("battery-instructions"));
    assert!(session.is_visible("battery-abort-action"));
    assert!(session.choices_enabled("q1"));
    assert!(!session.is_checked("q1"));

    session.select_choice("q1", "yes");
    assert!(!session.is_visible("battery-instructions"));
    assert!(!session.is_visible("battery-power-button-item"));
    assert!(session.is_visible("q2"));
}

#[test]
fn test_cs_battery_mission_ready() {
    let mut session = open("cs-battery-failure").unwrap();
    session.toggle_item("cs-hold-item");
    session.toggle_item("cs-note-item");
    for (q, c) in [("q1", "yes"), ("q2", "yes"), ("q3", "no")] {
        session.select_choice(q, c);
    }
    for id in ["q3-battery-off-item", "q3-battery-on-item", "q3-dc-output-item"] {
        session.toggle_item(id);
    }
    assert!(session.is_visible("q3-instructions"));
    assert!(session.choices_enabled("q3"));

    // sticky: undoing one step keeps the instructions
    session.toggle_item("q3-dc-output-item");
    assert!(session.is_visible("q3-instructions"));

    session.select_choice("q3", "yes");
    assert!(!session.is_visible("q3-instructions"));
    session.select_choice("q4", "yes");
    assert!(session.is_visible("q4-success"));
    let progress = session.progress().unwrap();
    assert!(progress.complete);
    assert!(progress.text().ends_with(" -- MISSION READY"));
}

#[test]
fn test_veh_connect_endpoint_highlights_next() {
    let mut session = open("veh-connect-issues").unwrap();
    session.toggle_item("pc-tether-item");
    session.toggle_item("pc-fxti-item");
    assert!(!session.pager().next_highlighted);

    session.select_choice("q1", "no");
    assert!(session.is_visible("q1-no-instruction"));
    assert!(session.pager().next_highlighted);
}

#[test]
fn test_veh_connect_page_change_clears_branches() {
    let mut session = open("veh-connect-issues").unwrap();
    session.toggle_item("pc-tether-item");
    session.toggle_item("pc-fxti-item");
    session.select_choice("q1", "yes");
    assert!(session.is_visible("q2"));

    session.navigate_page(1);
    assert!(!session.is_visible("q2"));
    assert!(session.choices_enabled("q1"));

    session.select_choice("sw-q1", "yes");
    session.select_choice("sw-q2", "no");
    session.toggle_item("blueos-restart-item");
    assert!(session.is_visible("blueos-restart-instruction"));
    assert!(session.pager().next_highlighted);
    session.select_choice("sw-q2", "yes");
    assert!(!session.is_visible("blueos-restart-instruction"));
    session.select_choice("sw-q3", "yes");
    assert!(session.progress().unwrap().complete);
}

#[test]
fn test_veh_connect_shared_branch() {
    let mut session = open("veh-connect-issues").unwrap();
    session.show_page(2);
    session.select_choice("vc-q1", "no");
    assert!(session.is_visible("vc-q1-shared"));
    assert!(session.is_visible("vc-q2b"));
    assert!(!session.is_visible("vc-q2"));
}

#[test]
fn test_veh_function_retry_group() {
    let mut session = open("veh-function").unwrap();
    session.toggle_item("vf-armed-item");
    session.toggle_item("vf-joystick-item");
    session.select_choice("q1", "no");
    session.toggle_item("blueos-restart-item");
    assert!(!session.is_visible("q1-retry-instruction"));
    session.toggle_item("vehicle-arming-retry-item");
    assert!(session.is_visible("q1-retry-instruction"));
    assert!(session.choices_enabled("q1"));

    session.select_choice("q1", "yes");
    assert!(session.progress().unwrap().complete);
}

#[test]
fn test_abort_mission_system_secured() {
    let mut session = open("abort-mission").unwrap();
    session.select_choice("q1", "yes");
    session.toggle_item("vehicle-retrieved-item");
    assert!(session.is_visible("vehicle-instructions"));
    assert!(session.pager().next_highlighted);

    for page in [1, 2] {
        session.show_page(page);
        check_all_items(&mut session, page);
    }
    session.show_page(3);
    session.select_choice("cs-q1", "no");
    assert!(!session.progress().unwrap().complete);
    session.toggle_item("cs-no-qgc-item");
    assert!(!session.is_visible("cs-no-complete"));
    session.toggle_item("cs-no-power-item");
    assert!(session.is_visible("cs-no-complete"));

    let progress = session.progress().unwrap();
    assert!(progress.complete);
    assert!(progress.text().ends_with(" -- SYSTEM SECURED"));
}

#[test]
fn test_home_rows_are_links() {
    let session = open("home").unwrap();
    assert_eq!(session.pages().len(), 2);
    for page in session.pages() {
        for row in &page.rows {
            let Row::Panel(id) = row else {
                panic!("home row {} is not a panel", row.id());
            };
            assert!(session.panel(id.as_str()).unwrap().link.is_some());
            assert!(session.is_visible(id.as_str()));
        }
    }
}
