//! # Path Splitting
//!
//! Splits an ordered route geometry into the part already driven and the part
//! still ahead, given a fractional [`Progress`].
//!
//! ```rust
//! use route_progress::{GpsPoint, Progress, split_route};
//!
//! let route = vec![
//!     GpsPoint::new(29.7604, -95.3698), // Houston
//!     GpsPoint::new(30.0802, -94.1266),
//!     GpsPoint::new(30.2241, -92.0198),
//!     GpsPoint::new(29.9511, -90.0715), // New Orleans
//! ];
//!
//! let progress = Progress::new(0.5).unwrap();
//! let (completed, remaining) = split_route(&route, progress);
//! assert_eq!(completed.len(), 2);
//! assert_eq!(remaining.len(), 2);
//! ```

use log::debug;

use crate::error::{Result, RouteProgressError};

/// Fraction of a route considered complete, always within `[0.0, 1.0]`.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "f64", into = "f64"))]
pub struct Progress(f64);

impl Progress {
    /// Nothing driven yet.
    pub const ZERO: Progress = Progress(0.0);
    /// Route finished.
    pub const COMPLETE: Progress = Progress(1.0);

    /// Validate a raw fraction.
    ///
    /// Fails with [`RouteProgressError::InvalidProgress`] for NaN or values
    /// outside `[0, 1]`.
    pub fn new(value: f64) -> Result<Self> {
        if (0.0..=1.0).contains(&value) {
            Ok(Self(value))
        } else {
            Err(RouteProgressError::InvalidProgress(value))
        }
    }

    /// The raw fraction.
    #[inline]
    pub fn value(self) -> f64 {
        self.0
    }

    /// Progress as a percentage (0-100).
    #[inline]
    pub fn percent(self) -> f64 {
        self.0 * 100.0
    }

    /// Fraction still to go, `1 - progress`.
    #[inline]
    pub fn remaining_fraction(self) -> f64 {
        1.0 - self.0
    }

    pub fn is_complete(self) -> bool {
        self.0 >= 1.0
    }

    /// Move forward by `delta`, saturating at 1.0.
    ///
    /// Fails with [`RouteProgressError::InvalidIncrement`] unless `delta` is
    /// finite and strictly positive, so progress can never decrease.
    pub fn advance(self, delta: f64) -> Result<Self> {
        if !delta.is_finite() || delta <= 0.0 {
            return Err(RouteProgressError::InvalidIncrement(delta));
        }
        Ok(Self((self.0 + delta).min(1.0)))
    }
}

impl TryFrom<f64> for Progress {
    type Error = RouteProgressError;

    fn try_from(value: f64) -> Result<Self> {
        Progress::new(value)
    }
}

impl From<Progress> for f64 {
    fn from(progress: Progress) -> f64 {
        progress.0
    }
}

/// Index at which a sequence of `len` points is split: `floor(len * progress)`.
///
/// Clamped to `len` so floating-point noise can never index past the end.
#[inline]
pub fn split_index(len: usize, progress: Progress) -> usize {
    ((len as f64 * progress.value()).floor() as usize).min(len)
}

/// Split `points` into `(completed, remaining)` sub-slices.
///
/// `completed = points[..idx]` and `remaining = points[idx..]` where
/// `idx = floor(len * progress)`. The input is only borrowed, never copied
/// or modified, so concatenating both halves always reproduces it.
///
/// - progress 0.0 gives `([], points)`
/// - progress 1.0 gives `(points, [])`
/// - empty input gives two empty slices
pub fn split_route<T>(points: &[T], progress: Progress) -> (&[T], &[T]) {
    let idx = split_index(points.len(), progress);
    debug!(
        "split_route: {} points at {:.3} -> {} completed / {} remaining",
        points.len(),
        progress.value(),
        idx,
        points.len() - idx
    );
    points.split_at(idx)
}

/// Where to draw the vehicle marker.
///
/// The last completed point, or the route start when nothing has been driven
/// yet. `None` only for an empty route.
pub fn vehicle_position<T: Copy>(points: &[T], progress: Progress) -> Option<T> {
    let (completed, _) = split_route(points, progress);
    completed.last().or_else(|| points.first()).copied()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::GpsPoint;

    fn sample_route(n: usize) -> Vec<GpsPoint> {
        (0..n)
            .map(|i| GpsPoint::new(29.76 + i as f64 * 0.01, -95.37 + i as f64 * 0.05))
            .collect()
    }

    #[test]
    fn test_progress_validation() {
        assert!(Progress::new(0.0).is_ok());
        assert!(Progress::new(1.0).is_ok());
        assert_eq!(
            Progress::new(1.2),
            Err(RouteProgressError::InvalidProgress(1.2))
        );
        assert!(Progress::new(-0.01).is_err());
        assert!(Progress::new(f64::NAN).is_err());
    }

    #[test]
    fn test_progress_advance_saturates() {
        let p = Progress::new(0.98).unwrap();
        let p = p.advance(0.01).unwrap();
        assert!((p.value() - 0.99).abs() < 1e-12);
        let p = p.advance(0.5).unwrap();
        assert_eq!(p, Progress::COMPLETE);
        assert_eq!(p.advance(0.01).unwrap(), Progress::COMPLETE);
    }

    #[test]
    fn test_progress_rejects_bad_increment() {
        let p = Progress::ZERO;
        assert_eq!(p.advance(0.0), Err(RouteProgressError::InvalidIncrement(0.0)));
        assert!(p.advance(-0.1).is_err());
        assert!(p.advance(f64::INFINITY).is_err());
    }

    #[test]
    fn test_split_at_zero() {
        let route = sample_route(7);
        let (completed, remaining) = split_route(&route, Progress::ZERO);
        assert!(completed.is_empty());
        assert_eq!(remaining, route.as_slice());
    }

    #[test]
    fn test_split_at_one() {
        let route = sample_route(7);
        let (completed, remaining) = split_route(&route, Progress::COMPLETE);
        assert_eq!(completed, route.as_slice());
        assert!(remaining.is_empty());
    }

    #[test]
    fn test_split_floor_index() {
        let route = sample_route(10);
        // 10 * 0.27 = 2.7 -> 2
        let (completed, remaining) = split_route(&route, Progress::new(0.27).unwrap());
        assert_eq!(completed.len(), 2);
        assert_eq!(remaining.len(), 8);
        assert_eq!(remaining[0], route[2]);
    }

    #[test]
    fn test_split_empty_route() {
        let empty: Vec<GpsPoint> = vec![];
        let (completed, remaining) = split_route(&empty, Progress::new(0.5).unwrap());
        assert!(completed.is_empty());
        assert!(remaining.is_empty());
    }

    #[test]
    fn test_split_concatenation_identity() {
        for n in 0..25 {
            let route = sample_route(n);
            for step in 0..=20 {
                let progress = Progress::new(step as f64 / 20.0).unwrap();
                let (completed, remaining) = split_route(&route, progress);
                assert_eq!(completed.len() + remaining.len(), n);
                let joined: Vec<GpsPoint> =
                    completed.iter().chain(remaining.iter()).copied().collect();
                assert_eq!(joined, route);
            }
        }
    }

    #[test]
    fn test_vehicle_position() {
        let route = sample_route(4);
        assert_eq!(vehicle_position(&route, Progress::ZERO), Some(route[0]));
        assert_eq!(vehicle_position(&route, Progress::new(0.5).unwrap()), Some(route[1]));
        assert_eq!(vehicle_position(&route, Progress::COMPLETE), Some(route[3]));

        let empty: Vec<GpsPoint> = vec![];
        assert_eq!(vehicle_position(&empty, Progress::COMPLETE), None);
    }
}
