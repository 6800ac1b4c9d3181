//! Route geometry from routing-engine GeoJSON.
//!
//! Directions services return a `FeatureCollection` whose first feature holds
//! the route `LineString` in `[lon, lat]` order, and usually a
//! `properties.summary` with total distance (meters) and duration (seconds).

use serde::Deserialize;

use crate::error::{Result, RouteProgressError};
use crate::geo_utils::polyline_length;
use crate::{GpsPoint, Route, RouteDetails};

#[derive(Debug, Deserialize)]
struct FeatureCollection {
    #[serde(default)]
    features: Vec<Feature>,
}

#[derive(Debug, Deserialize)]
struct Feature {
    geometry: Option<Geometry>,
    #[serde(default)]
    properties: Option<Properties>,
}

#[derive(Debug, Deserialize)]
struct Geometry {
    #[serde(rename = "type")]
    kind: String,
    coordinates: serde_json::Value,
}

#[derive(Debug, Deserialize)]
struct Properties {
    summary: Option<Summary>,
}

#[derive(Debug, Deserialize)]
struct Summary {
    distance: Option<f64>,
    duration: Option<f64>,
}

/// Coordinates and optional totals read from a GeoJSON route.
#[derive(Debug, Clone, PartialEq)]
pub struct RouteGeometry {
    pub points: Vec<GpsPoint>,
    /// Total distance in meters, if the source reported one
    pub distance: Option<f64>,
    /// Total duration in seconds, if the source reported one
    pub duration: Option<f64>,
}

impl RouteGeometry {
    /// Build a [`Route`].
    ///
    /// Without a reported distance the haversine length of the geometry is
    /// used; without a reported duration it is 0 (speed unavailable).
    pub fn into_route(self, route_id: impl Into<String>, details: RouteDetails) -> Result<Route> {
        let distance = self
            .distance
            .unwrap_or_else(|| polyline_length(&self.points));
        let duration = self.duration.unwrap_or(0.0);
        Ok(Route::new(route_id, self.points, distance, duration)?.with_details(details))
    }
}

/// Parse the first feature of a GeoJSON `FeatureCollection` as a route.
///
/// Extra coordinate dimensions (elevation) are ignored.
pub fn parse_route_geometry(json: &str) -> Result<RouteGeometry> {
    let collection: FeatureCollection = serde_json::from_str(json)?;
    let feature = collection
        .features
        .into_iter()
        .next()
        .ok_or_else(|| RouteProgressError::GeoJson("no features".to_string()))?;

    let geometry = feature
        .geometry
        .ok_or_else(|| RouteProgressError::GeoJson("feature has no geometry".to_string()))?;
    if geometry.kind != "LineString" {
        return Err(RouteProgressError::GeoJson(format!(
            "expected LineString, found {}",
            geometry.kind
        )));
    }

    let raw: Vec<Vec<f64>> = serde_json::from_value(geometry.coordinates)?;
    let points = raw
        .iter()
        .map(|c| match c.as_slice() {
            [lon, lat, ..] => Ok(GpsPoint::new(*lat, *lon)),
            _ => Err(RouteProgressError::GeoJson(format!(
                "coordinate needs 2 values, found {}",
                c.len()
            ))),
        })
        .collect::<Result<Vec<_>>>()?;

    let summary = feature.properties.and_then(|p| p.summary);
    Ok(RouteGeometry {
        points,
        distance: summary.as_ref().and_then(|s| s.distance),
        duration: summary.as_ref().and_then(|s| s.duration),
    })
}
