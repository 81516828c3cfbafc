//! Address resolution against the map provider
//!
//! One best match per query, no retries: a failed resolution is surfaced and
//! only re-attempted by a fresh user action.

use crate::core::error::{Error, Result};
use crate::core::geo::Coordinate;
use crate::core::provider::MapProvider;

/// Thin wrapper around the provider's single-match geocoding call.
pub struct GeocodingClient<'a, P> {
    provider: &'a P,
}

impl<'a, P: MapProvider> GeocodingClient<'a, P> {
    pub fn new(provider: &'a P) -> Self {
        Self { provider }
    }

    /// Resolve an address to its best-match coordinate.
    ///
    /// Fails with [`Error::EmptyInput`] for blank input, [`Error::NotFound`]
    /// when the provider has zero matches, and a classified
    /// [`Error::Provider`] for provider-level failures.
    pub async fn resolve(&self, address: &str) -> Result<Coordinate> {
        let query = address.trim();
        if query.is_empty() {
            return Err(Error::EmptyInput);
        }

        match self.provider.geocode_once(query).await {
            Ok(Some(position)) => Ok(position),
            Ok(None) => Err(Error::NotFound(query.to_string())),
            Err(raw) => Err(Error::from_raw(&raw)),
        }
    }
}
