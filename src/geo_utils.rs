//! # Geographic Utilities
//!
//! Small geographic helpers used for segment lengths, map framing and
//! fallback route distances.
//!
//! | Function | Description |
//! |----------|-------------|
//! | [`haversine_distance`] | Great-circle distance between two GPS points |
//! | [`polyline_length`] | Total length of a GPS track in meters |
//! | [`compute_bounds`] | Bounding box of a GPS track |
//! | [`compute_center`] | Mean position of a GPS track |
//!
//! All functions expect WGS84 coordinates (latitude/longitude in degrees).
//!
//! ```rust
//! use route_progress::{GpsPoint, geo_utils};
//!
//! let houston = GpsPoint::new(29.7604, -95.3698);
//! let new_orleans = GpsPoint::new(29.9511, -90.0715);
//!
//! let dist = geo_utils::haversine_distance(&houston, &new_orleans);
//! assert!((dist - 512_000.0).abs() < 5_000.0); // ~512 km as the crow flies
//! ```

use geo::{Distance, Haversine, Point};

use crate::{Bounds, GpsPoint};

/// Great-circle distance in meters between two GPS points (spherical Earth,
/// radius 6,371 km).
#[inline]
pub fn haversine_distance(p1: &GpsPoint, p2: &GpsPoint) -> f64 {
    let point1 = Point::new(p1.longitude, p1.latitude);
    let point2 = Point::new(p2.longitude, p2.latitude);
    Haversine::distance(point1, point2)
}

/// Sum of haversine distances between consecutive points.
///
/// Empty or single-point tracks return 0.0.
pub fn polyline_length(points: &[GpsPoint]) -> f64 {
    if points.len() < 2 {
        return 0.0;
    }

    points
        .windows(2)
        .map(|w| haversine_distance(&w[0], &w[1]))
        .sum()
}

/// Bounding box enclosing all points.
///
/// For empty input the result is inverted (MAX/MIN sentinels); use
/// [`Bounds::from_points`] when emptiness matters.
pub fn compute_bounds(points: &[GpsPoint]) -> Bounds {
    let mut min_lat = f64::MAX;
    let mut max_lat = f64::MIN;
    let mut min_lng = f64::MAX;
    let mut max_lng = f64::MIN;

    for p in points {
        min_lat = min_lat.min(p.latitude);
        max_lat = max_lat.max(p.latitude);
        min_lng = min_lng.min(p.longitude);
        max_lng = max_lng.max(p.longitude);
    }

    Bounds { min_lat, max_lat, min_lng, max_lng }
}

/// Arithmetic mean of all latitudes and longitudes. Returns (0, 0) for empty
/// input.
///
/// Fine for regional routes; tracks crossing the antimeridian average badly.
pub fn compute_center(points: &[GpsPoint]) -> GpsPoint {
    if points.is_empty() {
        return GpsPoint::new(0.0, 0.0);
    }

    let sum_lat: f64 = points.iter().map(|p| p.latitude).sum();
    let sum_lng: f64 = points.iter().map(|p| p.longitude).sum();
    let n = points.len() as f64;

    GpsPoint::new(sum_lat / n, sum_lng / n)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx_eq(a: f64, b: f64, epsilon: f64) -> bool {
        (a - b).abs() < epsilon
    }

    #[test]
    fn test_haversine_distance_same_point() {
        let p = GpsPoint::new(29.7604, -95.3698);
        assert_eq!(haversine_distance(&p, &p), 0.0);
    }

    #[test]
    fn test_haversine_one_degree_latitude() {
        let a = GpsPoint::new(30.0, -91.0);
        let b = GpsPoint::new(31.0, -91.0);
        assert!(approx_eq(haversine_distance(&a, &b), 111_195.0, 100.0));
    }

    #[test]
    fn test_polyline_length_short_tracks() {
        assert_eq!(polyline_length(&[]), 0.0);
        assert_eq!(polyline_length(&[GpsPoint::new(29.76, -95.37)]), 0.0);
    }

    #[test]
    fn test_polyline_length_is_sum_of_legs() {
        let track = vec![
            GpsPoint::new(29.76, -95.37),
            GpsPoint::new(29.80, -95.30),
            GpsPoint::new(29.85, -95.20),
        ];
        let legs = haversine_distance(&track[0], &track[1]) + haversine_distance(&track[1], &track[2]);
        assert!(approx_eq(polyline_length(&track), legs, 1e-6));
    }

    #[test]
    fn test_compute_bounds() {
        let track = vec![
            GpsPoint::new(29.76, -95.37),
            GpsPoint::new(30.22, -92.02),
            GpsPoint::new(29.95, -90.07),
        ];
        let bounds = compute_bounds(&track);
        assert_eq!(bounds.min_lat, 29.76);
        assert_eq!(bounds.max_lat, 30.22);
        assert_eq!(bounds.min_lng, -95.37);
        assert_eq!(bounds.max_lng, -90.07);
    }

    #[test]
    fn test_compute_center() {
        let track = vec![GpsPoint::new(29.0, -95.0), GpsPoint::new(31.0, -91.0)];
        let center = compute_center(&track);
        assert!(approx_eq(center.latitude, 30.0, 1e-9));
        assert!(approx_eq(center.longitude, -93.0, 1e-9));
        assert_eq!(compute_center(&[]), GpsPoint::new(0.0, 0.0));
    }
}
