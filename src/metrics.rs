//! # Travel Metrics
//!
//! Remaining distance, remaining time and average speed derived from a
//! route's totals and its current [`Progress`].
//!
//! All inputs are in storage units: meters and seconds. Conversion to display
//! units is pure scaling through the constants in [`units`].
//!
//! ```rust
//! use route_progress::{Progress, SpeedUnit, derive_metrics};
//!
//! // 100 km in 1 hour, half done
//! let metrics = derive_metrics(
//!     100_000.0,
//!     3_600.0,
//!     Progress::new(0.5).unwrap(),
//!     SpeedUnit::KILOMETERS_PER_HOUR,
//! );
//! assert_eq!(metrics.remaining_distance, 50_000.0);
//! assert_eq!(metrics.remaining_time, 1_800.0);
//! assert_eq!(metrics.speed().unwrap(), 100.0);
//! ```

use crate::error::{Result, RouteProgressError};
use crate::split::Progress;

/// Fixed conversion constants.
pub mod units {
    /// Meters in one statute mile.
    pub const METERS_PER_MILE: f64 = 1609.34;
    pub const METERS_PER_KILOMETER: f64 = 1000.0;
    /// Miles in one kilometer.
    pub const KILOMETERS_TO_MILES: f64 = 0.621371;
    pub const SECONDS_PER_MINUTE: f64 = 60.0;
    pub const SECONDS_PER_HOUR: f64 = 3600.0;
}

/// Display unit for distances.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "ffi", derive(uniffi::Enum))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum DistanceUnit {
    Meters,
    Kilometers,
    Miles,
}

impl DistanceUnit {
    /// Meters per one of this unit.
    pub fn meters(self) -> f64 {
        match self {
            DistanceUnit::Meters => 1.0,
            DistanceUnit::Kilometers => units::METERS_PER_KILOMETER,
            DistanceUnit::Miles => units::METERS_PER_MILE,
        }
    }
}

/// Display unit for durations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "ffi", derive(uniffi::Enum))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TimeUnit {
    Seconds,
    Minutes,
    Hours,
}

impl TimeUnit {
    /// Seconds per one of this unit.
    pub fn seconds(self) -> f64 {
        match self {
            TimeUnit::Seconds => 1.0,
            TimeUnit::Minutes => units::SECONDS_PER_MINUTE,
            TimeUnit::Hours => units::SECONDS_PER_HOUR,
        }
    }
}

/// Speed expressed as distance-unit per time-unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "ffi", derive(uniffi::Record))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SpeedUnit {
    pub distance: DistanceUnit,
    pub time: TimeUnit,
}

impl SpeedUnit {
    pub const METERS_PER_SECOND: SpeedUnit = SpeedUnit {
        distance: DistanceUnit::Meters,
        time: TimeUnit::Seconds,
    };
    pub const KILOMETERS_PER_HOUR: SpeedUnit = SpeedUnit {
        distance: DistanceUnit::Kilometers,
        time: TimeUnit::Hours,
    };
    pub const MILES_PER_HOUR: SpeedUnit = SpeedUnit {
        distance: DistanceUnit::Miles,
        time: TimeUnit::Hours,
    };
}

/// Convert meters to `unit`.
#[inline]
pub fn convert_distance(meters: f64, unit: DistanceUnit) -> f64 {
    meters / unit.meters()
}

/// Convert seconds to `unit`.
#[inline]
pub fn convert_duration(seconds: f64, unit: TimeUnit) -> f64 {
    seconds / unit.seconds()
}

/// Distance still to drive: `max(total * (1 - progress), 0)`.
#[inline]
pub fn remaining_distance(total_distance: f64, progress: Progress) -> f64 {
    (total_distance * progress.remaining_fraction()).max(0.0)
}

/// Time still to drive: `max(total * (1 - progress), 0)`.
#[inline]
pub fn remaining_time(total_duration: f64, progress: Progress) -> f64 {
    (total_duration * progress.remaining_fraction()).max(0.0)
}

/// Average speed over the whole route, in `unit`.
///
/// Fails with [`RouteProgressError::DivisionUndefined`] when the duration is
/// zero. Negative or non-finite durations are treated the same way: speed is
/// unavailable.
pub fn average_speed(total_distance: f64, total_duration: f64, unit: SpeedUnit) -> Result<f64> {
    if !total_duration.is_finite() || total_duration <= 0.0 {
        return Err(RouteProgressError::DivisionUndefined);
    }
    let distance = convert_distance(total_distance, unit.distance);
    let duration = convert_duration(total_duration, unit.time);
    Ok(distance / duration)
}

/// Metrics for one route at one progress value.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "ffi", derive(uniffi::Record))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RouteMetrics {
    /// Meters still to drive
    pub remaining_distance: f64,
    /// Seconds still to drive
    pub remaining_time: f64,
    /// Average speed in the requested unit, `None` when the duration is zero
    pub average_speed: Option<f64>,
}

impl RouteMetrics {
    /// Average speed, or [`RouteProgressError::DivisionUndefined`].
    pub fn speed(&self) -> Result<f64> {
        self.average_speed.ok_or(RouteProgressError::DivisionUndefined)
    }

    /// Remaining distance in `unit`.
    pub fn remaining_distance_in(&self, unit: DistanceUnit) -> f64 {
        convert_distance(self.remaining_distance, unit)
    }

    /// Remaining time in `unit`.
    pub fn remaining_time_in(&self, unit: TimeUnit) -> f64 {
        convert_duration(self.remaining_time, unit)
    }
}

/// Derive all metrics at once.
///
/// Remaining distance and time are always produced; an undefined average
/// speed only leaves [`RouteMetrics::average_speed`] empty.
pub fn derive_metrics(
    total_distance: f64,
    total_duration: f64,
    progress: Progress,
    unit: SpeedUnit,
) -> RouteMetrics {
    RouteMetrics {
        remaining_distance: remaining_distance(total_distance, progress),
        remaining_time: remaining_time(total_duration, progress),
        average_speed: average_speed(total_distance, total_duration, unit).ok(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx_eq(a: f64, b: f64, epsilon: f64) -> bool {
        (a - b).abs() < epsilon
    }

    #[test]
    fn test_remaining_at_bounds() {
        let total = 563_000.0;
        assert_eq!(remaining_distance(total, Progress::ZERO), total);
        assert_eq!(remaining_distance(total, Progress::COMPLETE), 0.0);
        assert_eq!(remaining_time(20_000.0, Progress::ZERO), 20_000.0);
        assert_eq!(remaining_time(20_000.0, Progress::COMPLETE), 0.0);
    }

    #[test]
    fn test_remaining_never_negative() {
        assert_eq!(remaining_distance(-10.0, Progress::new(0.5).unwrap()), 0.0);
    }

    #[test]
    fn test_zero_duration_speed_undefined() {
        let metrics = derive_metrics(0.0, 0.0, Progress::new(0.5).unwrap(), SpeedUnit::MILES_PER_HOUR);
        assert_eq!(metrics.remaining_distance, 0.0);
        assert_eq!(metrics.remaining_time, 0.0);
        assert_eq!(metrics.average_speed, None);
        assert_eq!(metrics.speed(), Err(RouteProgressError::DivisionUndefined));
        assert_eq!(
            average_speed(1000.0, 0.0, SpeedUnit::METERS_PER_SECOND),
            Err(RouteProgressError::DivisionUndefined)
        );
    }

    #[test]
    fn test_average_speed_mph() {
        // 1 mile in 1 minute = 60 mph
        let speed = average_speed(units::METERS_PER_MILE, 60.0, SpeedUnit::MILES_PER_HOUR).unwrap();
        assert!(approx_eq(speed, 60.0, 1e-9));
    }

    #[test]
    fn test_average_speed_units_agree() {
        let mps = average_speed(10_000.0, 400.0, SpeedUnit::METERS_PER_SECOND).unwrap();
        let kph = average_speed(10_000.0, 400.0, SpeedUnit::KILOMETERS_PER_HOUR).unwrap();
        assert!(approx_eq(mps, 25.0, 1e-9));
        assert!(approx_eq(kph, 90.0, 1e-9));
    }

    #[test]
    fn test_display_conversions() {
        let metrics = derive_metrics(
            2.0 * units::METERS_PER_MILE,
            2.0 * units::SECONDS_PER_HOUR,
            Progress::new(0.25).unwrap(),
            SpeedUnit::MILES_PER_HOUR,
        );
        assert!(approx_eq(metrics.remaining_distance_in(DistanceUnit::Miles), 1.5, 1e-9));
        assert!(approx_eq(metrics.remaining_time_in(TimeUnit::Hours), 1.5, 1e-9));
        assert!(approx_eq(metrics.speed().unwrap(), 1.0, 1e-9));
    }

    #[test]
    fn test_kilometer_mile_constants_consistent() {
        let miles = convert_distance(units::METERS_PER_KILOMETER, DistanceUnit::Miles);
        assert!(approx_eq(miles, units::KILOMETERS_TO_MILES, 1e-5));
    }
}
