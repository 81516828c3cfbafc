//! Multi-point route construction
//!
//! Builds a vehicle-constrained provider request from resolved waypoints and
//! waits for exactly one terminal signal. The truck constraint block is only
//! attached for truck profiles and only with the fields the profile carries.

use serde::Serialize;

use crate::core::error::{Error, Result};
use crate::core::geo::Coordinate;
use crate::core::provider::{MapProvider, RouteResult};
use crate::core::vehicle::{RoutingMode, TruckRestrictions, VehicleProfile};

/// Provider-wire routing parameters.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RouteParams {
    /// Number of alternative routes requested
    pub results: u32,
    pub routing_mode: RoutingMode,
    pub avoid_traffic_jams: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub truck: Option<TruckRestrictions>,
}

/// A complete route construction request: ordered reference points (start,
/// vias, finish) plus routing parameters. Invariant: at least two points.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RouteRequest {
    pub reference_points: Vec<Coordinate>,
    pub params: RouteParams,
}

impl RouteRequest {
    /// Assemble a request for the given points and profile.
    pub fn new(points: Vec<Coordinate>, profile: &VehicleProfile, alternatives: u32) -> Self {
        Self {
            reference_points: points,
            params: RouteParams {
                results: alternatives,
                routing_mode: profile.routing_mode(),
                avoid_traffic_jams: true,
                truck: profile.restrictions().cloned(),
            },
        }
    }
}

/// Constructs routes through the provider.
pub struct RouteBuilder<'a, P> {
    provider: &'a P,
}

impl<'a, P: MapProvider> RouteBuilder<'a, P> {
    pub fn new(provider: &'a P) -> Self {
        Self { provider }
    }

    /// Build a route through the ordered points for the given profile.
    ///
    /// Fails with [`Error::InsufficientWaypoints`] before any provider call
    /// when fewer than two points are supplied, [`Error::RouteNotFound`] when
    /// the provider answers with an empty alternative set, and a classified
    /// [`Error::Provider`] otherwise.
    pub async fn build(
        &self,
        points: &[Coordinate],
        profile: &VehicleProfile,
        alternatives: u32,
    ) -> Result<RouteResult> {
        if points.len() < 2 {
            return Err(Error::InsufficientWaypoints(points.len()));
        }

        let request = RouteRequest::new(points.to_vec(), profile, alternatives);
        log::debug!(
            "building route: {} points, mode {:?}",
            request.reference_points.len(),
            request.params.routing_mode
        );

        match self.provider.build_route(&request).await {
            Ok(result) if result.alternatives.is_empty() => Err(Error::RouteNotFound),
            Ok(result) => Ok(result),
            Err(raw) => Err(Error::from_raw(&raw)),
        }
    }
}
