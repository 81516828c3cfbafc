//! Shared session state for one route planning session
//!
//! Exactly one session is active at a time. The planner owns this record and
//! is the only writer; the control advisor reads it. No ambient globals.

use crate::core::geo::Coordinate;
use crate::core::loader::LoadState;
use crate::core::provider::RouteHandle;
use crate::core::vehicle::VehicleProfile;

/// Default number of route alternatives requested per build.
pub const DEFAULT_ALTERNATIVES: u32 = 3;

/// Mutable state of the active planning session.
#[derive(Debug, Clone, PartialEq)]
pub struct SessionState {
    pub start_text: String,
    pub finish_text: String,
    /// Intermediate points, append-only until explicitly cleared
    pub via_points: Vec<Coordinate>,
    pub vehicle: VehicleProfile,
    pub alternatives_wanted: u32,
    pub load_state: LoadState,
    /// The currently rendered route, if any
    pub active_route: Option<RouteHandle>,
    /// True while a build attempt is between begin and settlement
    pub build_in_flight: bool,
}

impl SessionState {
    pub fn new() -> Self {
        Self {
            start_text: String::new(),
            finish_text: String::new(),
            via_points: Vec::new(),
            vehicle: VehicleProfile::default(),
            alternatives_wanted: DEFAULT_ALTERNATIVES,
            load_state: LoadState::Idle,
            active_route: None,
            build_in_flight: false,
        }
    }

    /// Both address fields carry non-blank text.
    pub fn has_both_addresses(&self) -> bool {
        !self.start_text.trim().is_empty() && !self.finish_text.trim().is_empty()
    }
}

impl Default for SessionState {
    fn default() -> Self {
        Self::new()
    }
}
