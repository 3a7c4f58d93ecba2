//! Built-in Checklists
//!
//! Every checklist the app ships, addressable by slug.

mod abort_mission;
mod cs_battery;
mod during_flight;
mod home;
mod post_flight;
mod pre_flight;
mod veh_arming;
mod veh_connect;
mod veh_function;
mod welcome;

#[cfg(test)]
mod tests;

use crate::definition::ChecklistDefinition;
use crate::domain::{DomainError, DomainResult};
use crate::session::Session;

/// Opened when no (or an unknown) slug is requested
pub const DEFAULT_SLUG: &str = "welcome";

/// Slugs in menu order
pub const SLUGS: &[&str] = &[
    "welcome",
    "home",
    "pre-flight",
    "during-flight",
    "post-flight",
    "cs-battery-failure",
    "veh-connect-issues",
    "veh-function",
    "veh-arming",
    "abort-mission",
];

pub fn by_slug(slug: &str) -> Option<ChecklistDefinition> {
    let definition = match slug {
        "welcome" => welcome::definition(),
        "home" => home::definition(),
        "pre-flight" => pre_flight::definition(),
        "during-flight" => during_flight::definition(),
        "post-flight" => post_flight::definition(),
        "cs-battery-failure" => cs_battery::definition(),
        "veh-connect-issues" => veh_connect::definition(),
        "veh-function" => veh_function::definition(),
        "veh-arming" => veh_arming::definition(),
        "abort-mission" => abort_mission::definition(),
        _ => return None,
    };
    Some(definition)
}

pub fn all() -> Vec<ChecklistDefinition> {
    SLUGS.iter().filter_map(|slug| by_slug(slug)).collect()
}

/// Open a fresh session on a built-in checklist
pub fn open(slug: &str) -> DomainResult<Session> {
    let definition = by_slug(slug).ok_or_else(|| DomainError::NotFound(format!("checklist '{}'", slug)))?;
    Session::new(definition)
}
