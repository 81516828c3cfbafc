//! Geographic primitives and display formatting
//!
//! Coordinates are provider-order (latitude, longitude) pairs. Formatting
//! helpers follow Russian-locale display conventions (comma decimal
//! separator for kilometres).

use serde::{Deserialize, Serialize};

/// Immutable geographic coordinate (latitude, longitude).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub lat: f64,
    pub lon: f64,
}

impl Coordinate {
    pub fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }
}

/// Ordered role a waypoint plays inside a route request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WaypointRole {
    Start,
    Via,
    Finish,
}

/// A routed location: role plus position.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Waypoint {
    pub role: WaypointRole,
    pub position: Coordinate,
}

impl Waypoint {
    pub fn start(position: Coordinate) -> Self {
        Self { role: WaypointRole::Start, position }
    }

    pub fn via(position: Coordinate) -> Self {
        Self { role: WaypointRole::Via, position }
    }

    pub fn finish(position: Coordinate) -> Self {
        Self { role: WaypointRole::Finish, position }
    }
}

/// Format a distance in metres as kilometres with one decimal, comma
/// separator: `12345.0` -> `"12,3 км"`.
pub fn fmt_dist(meters: f64) -> String {
    let km = format!("{:.1}", meters / 1000.0).replace('.', ",");
    format!("{km} км")
}

/// Format a duration in seconds as hours and minutes: `"1 ч 5 мин"`,
/// or just minutes when under an hour.
pub fn fmt_time(seconds: f64) -> String {
    let hours = (seconds / 3600.0) as u64;
    let minutes = ((seconds % 3600.0) / 60.0).round() as u64;
    if hours > 0 {
        format!("{hours} ч {minutes} мин")
    } else {
        format!("{minutes} мин")
    }
}
