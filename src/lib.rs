//! # Transroute
//!
//! Asynchronous route planning orchestrator for vehicle-constrained routing
//! through an external mapping provider, plus an adaptive advisory engine
//! that derives UI control recommendations from session state.
//!
//! The crate does not talk to a concrete mapping SDK. The embedding
//! application supplies a [`MapProvider`] (geocoding, route construction,
//! rendering) and a [`Notifier`] (user-visible messages); the
//! [`RoutePlanner`] orchestrates the build flow between them:
//!
//! 1. one-time provider readiness handshake with a fixed deadline,
//! 2. address resolution (start, then finish),
//! 3. multi-point route construction with truck restrictions,
//! 4. rendering of the newest result, stale attempts discarded.
//!
//! ```no_run
//! # async fn example<P, N>(provider: P, notifier: N)
//! # where P: transroute::MapProvider, N: transroute::Notifier {
//! use transroute::{Coordinate, RoutePlanner, VehicleProfile};
//!
//! let mut planner = RoutePlanner::new(provider, notifier);
//! planner.start().await.ok();
//! planner.set_start_address("Moscow");
//! planner.set_finish_address("Tver");
//! planner.add_via_point(Coordinate::new(56.0, 36.5));
//! planner.select_vehicle(VehicleProfile::truck_heavy());
//! if planner.build_route().await.is_ok() {
//!     for advisory in planner.recommendations() {
//!         // apply advisory to the UI layer
//!         let _ = advisory;
//!     }
//! }
//! # }
//! ```

mod core;

pub use self::core::advisor::{self, controls, ControlAction, Recommendation};
pub use self::core::error::{classify, normalize, Category, Diagnostic, Error, RawFailure, Result};
pub use self::core::features::{load_markers, MapMarker};
pub use self::core::geo::{fmt_dist, fmt_time, Coordinate, Waypoint, WaypointRole};
pub use self::core::geocode::GeocodingClient;
pub use self::core::loader::{LoadSequencer, LoadState, DEFAULT_READY_TIMEOUT};
pub use self::core::planner::RoutePlanner;
pub use self::core::provider::{
    MapProvider, Notifier, ProviderConfig, RouteAlternative, RouteHandle, RouteResult,
};
pub use self::core::route::{RouteBuilder, RouteParams, RouteRequest};
pub use self::core::session::{SessionState, DEFAULT_ALTERNATIVES};
pub use self::core::settle::Settlement;
pub use self::core::vehicle::{RoutingMode, TruckRestrictions, VehicleProfile};
