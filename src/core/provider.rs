//! External capability seams: map provider and notifier
//!
//! The orchestrator never talks to a concrete mapping SDK. It consumes an
//! abstract provider (geocoding, route construction, rendering) and an
//! abstract notifier (user-visible messages). Real implementations live with
//! the embedding application; tests supply scripted stubs.

use std::time::Duration;

use crate::core::error::RawFailure;
use crate::core::geo::Coordinate;
use crate::core::route::RouteRequest;

/// Opaque handle to a provider-side rendered route.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RouteHandle(pub u64);

/// One computed route alternative.
#[derive(Debug, Clone, PartialEq)]
pub struct RouteAlternative {
    pub distance_m: f64,
    pub duration_s: f64,
}

/// A successfully built route: the provider handle plus a non-empty ordered
/// set of alternatives. At most one result is rendered at a time; the
/// previous one must be unrendered before a new one is shown.
#[derive(Debug, Clone, PartialEq)]
pub struct RouteResult {
    pub handle: RouteHandle,
    pub alternatives: Vec<RouteAlternative>,
}

impl RouteResult {
    /// The best (first) alternative. Present by invariant.
    pub fn best(&self) -> Option<&RouteAlternative> {
        self.alternatives.first()
    }
}

/// The external mapping/routing capability.
///
/// All failures are delivered as [`RawFailure`] so the error classifier owns
/// their interpretation. Each async operation settles exactly once.
pub trait MapProvider {
    /// One-shot readiness handshake with the provider runtime.
    fn await_ready(&self) -> impl std::future::Future<Output = Result<(), RawFailure>>;

    /// Resolve an address to its single best match, `None` when the provider
    /// finds nothing.
    fn geocode_once(
        &self,
        query: &str,
    ) -> impl std::future::Future<Output = Result<Option<Coordinate>, RawFailure>>;

    /// Construct a multi-point route for the given request.
    fn build_route(
        &self,
        request: &RouteRequest,
    ) -> impl std::future::Future<Output = Result<RouteResult, RawFailure>>;

    /// Display a previously built route on the map surface.
    fn render(&self, handle: &RouteHandle);

    /// Remove a rendered route from the map surface.
    fn unrender(&self, handle: &RouteHandle);
}

/// User-facing message sink (toast-style, with a display duration hint).
pub trait Notifier {
    fn show(&self, message: &str, duration: Duration);
}

/// Static provider configuration delivered by the embedding application.
#[derive(Debug, Clone, PartialEq)]
pub struct ProviderConfig {
    pub api_key: String,
    pub lang: String,
    /// Feature packages requested from the provider runtime
    pub packages: Vec<String>,
    pub center: Coordinate,
    pub zoom: u8,
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            lang: "ru_RU".to_string(),
            packages: vec![
                "package.standard".to_string(),
                "package.search".to_string(),
                "multiRouter.MultiRoute".to_string(),
                "package.geoObjects".to_string(),
            ],
            // Moscow
            center: Coordinate::new(55.751244, 37.618423),
            zoom: 8,
        }
    }
}
