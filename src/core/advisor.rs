//! Control advisory engine
//!
//! Maps the current session state to an ordered list of UI recommendations.
//! Pure over its input: no side effects, no I/O, idempotent per snapshot.
//! The mapping from control id to a concrete widget belongs to the caller.

use crate::core::session::SessionState;
use crate::core::vehicle::VehicleProfile;

/// Stable identifiers of the advised controls.
pub mod controls {
    pub const BUILD_ROUTE: &str = "build-route";
    pub const CLEAR_VIA: &str = "clear-via";
}

/// What the UI should do with a control.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlAction {
    Enable,
    Disable,
    Highlight,
    SetTooltip,
}

/// One advisory for one control. Ephemeral: produced fresh per evaluation,
/// consumed immediately.
#[derive(Debug, Clone, PartialEq)]
pub struct Recommendation {
    pub target_id: &'static str,
    pub action: ControlAction,
    pub reason: Option<String>,
}

impl Recommendation {
    fn new(target_id: &'static str, action: ControlAction) -> Self {
        Self { target_id, action, reason: None }
    }

    fn with_reason(target_id: &'static str, action: ControlAction, reason: String) -> Self {
        Self { target_id, action, reason: Some(reason) }
    }
}

type Rule = fn(&SessionState) -> Recommendation;

/// Ordered rule table. Every rule fires on every evaluation and yields
/// exactly one recommendation.
static RULES: &[Rule] = &[
    build_control_rule,
    clear_via_rule,
    vehicle_tab_rule,
    vehicle_tooltip_rule,
];

fn build_control_rule(state: &SessionState) -> Recommendation {
    if state.build_in_flight {
        Recommendation::with_reason(
            controls::BUILD_ROUTE,
            ControlAction::Disable,
            "Route request in progress.".to_string(),
        )
    } else if state.has_both_addresses() {
        Recommendation::new(controls::BUILD_ROUTE, ControlAction::Enable)
    } else {
        Recommendation::with_reason(
            controls::BUILD_ROUTE,
            ControlAction::Disable,
            "Specify both start and finish points.".to_string(),
        )
    }
}

fn clear_via_rule(state: &SessionState) -> Recommendation {
    if state.via_points.is_empty() {
        Recommendation::with_reason(
            controls::CLEAR_VIA,
            ControlAction::Disable,
            "No intermediate points to clear.".to_string(),
        )
    } else {
        Recommendation::new(controls::CLEAR_VIA, ControlAction::Enable)
    }
}

fn vehicle_tab_rule(state: &SessionState) -> Recommendation {
    Recommendation::new(state.vehicle.control_id(), ControlAction::Highlight)
}

fn vehicle_tooltip_rule(state: &SessionState) -> Recommendation {
    let tooltip = match &state.vehicle {
        VehicleProfile::Car => "No weight restrictions apply.".to_string(),
        profile => {
            // restrictions() is Some for every truck variant
            let weight = profile.restrictions().map(|r| r.weight).unwrap_or(0);
            format!("Gross weight limit {} t.", weight / 1000)
        }
    };
    Recommendation::with_reason(state.vehicle.control_id(), ControlAction::SetTooltip, tooltip)
}

/// Evaluate the full rule table against a session snapshot.
pub fn evaluate(state: &SessionState) -> Vec<Recommendation> {
    RULES.iter().map(|rule| rule(state)).collect()
}
