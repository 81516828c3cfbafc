//! Auxiliary geo-feature feed
//!
//! Fetches a GeoJSON-style document of labeled point features (weight-control
//! frames) rendered as map markers. The feed is cosmetic: unreachable,
//! non-2xx, or malformed content degrades to an empty marker list and a
//! warning, never to an error.

use std::time::{Duration, SystemTime, UNIX_EPOCH};

use once_cell::sync::Lazy;
use reqwest::{Client, ClientBuilder};
use serde::Deserialize;

use crate::core::geo::Coordinate;

/// Shared HTTP client for feed fetches
static FEED_CLIENT: Lazy<Client> = Lazy::new(|| {
    ClientBuilder::new()
        .timeout(Duration::from_secs(30))
        .connect_timeout(Duration::from_secs(10))
        .user_agent(concat!("transroute/", env!("CARGO_PKG_VERSION")))
        .build()
        .expect("Failed to create HTTP client")
});

#[derive(Debug, Deserialize)]
struct FeatureCollection {
    #[serde(default)]
    features: Vec<Feature>,
}

#[derive(Debug, Deserialize)]
struct Feature {
    #[serde(default)]
    properties: Option<FeatureProperties>,
    #[serde(default)]
    geometry: Option<Geometry>,
}

#[derive(Debug, Deserialize)]
struct FeatureProperties {
    name: Option<String>,
    comment: Option<String>,
    date: Option<String>,
}

#[derive(Debug, Deserialize)]
struct Geometry {
    #[serde(default)]
    coordinates: Vec<f64>,
}

/// One auxiliary map marker parsed from the feed.
#[derive(Debug, Clone, PartialEq)]
pub struct MapMarker {
    pub name: String,
    pub comment: Option<String>,
    pub date: Option<String>,
    pub position: Coordinate,
}

/// Fetch and parse the feature feed.
///
/// Every failure path returns an empty list; features without a usable point
/// geometry are skipped individually.
pub async fn load_markers(url: &str) -> Vec<MapMarker> {
    // Cache-busting version tag, matching the feed's delivery convention
    let stamp = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis())
        .unwrap_or(0);
    let separator = if url.contains('?') { '&' } else { '?' };
    let versioned = format!("{url}{separator}v={stamp}");

    let response = match FEED_CLIENT.get(&versioned).send().await {
        Ok(response) => response,
        Err(err) => {
            log::warn!("feature feed unreachable: {err}");
            return Vec::new();
        }
    };

    if !response.status().is_success() {
        log::warn!("feature feed returned HTTP {}", response.status());
        return Vec::new();
    }

    let collection: FeatureCollection = match response.json().await {
        Ok(collection) => collection,
        Err(err) => {
            log::warn!("feature feed is not valid GeoJSON: {err}");
            return Vec::new();
        }
    };

    collection
        .features
        .into_iter()
        .filter_map(marker_from_feature)
        .collect()
}

fn marker_from_feature(feature: Feature) -> Option<MapMarker> {
    let geometry = feature.geometry?;
    // Provider point order: [lat, lon]
    if geometry.coordinates.len() < 2 {
        return None;
    }
    let position = Coordinate::new(geometry.coordinates[0], geometry.coordinates[1]);

    let properties = feature.properties.unwrap_or(FeatureProperties {
        name: None,
        comment: None,
        date: None,
    });

    Some(MapMarker {
        name: properties.name.unwrap_or_else(|| "Weight frame".to_string()),
        comment: properties.comment,
        date: properties.date,
        position,
    })
}
