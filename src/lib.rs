//! # Route Progress
//!
//! Progress segmentation and road-type aggregation for live delivery-route
//! dashboards.
//!
//! This library provides:
//! - Splitting a route into completed and remaining geometry by progress
//! - Per-session progress tracking with a monotonic increment
//! - Remaining distance/time and average speed derivation
//! - Grouping of road-annotated traces into same-type segments
//! - Road-type frequency breakdown and legend colors
//!
//! Rendering, file loading and data-store access belong to the host.
//!
//! ## Features
//!
//! - **`parallel`** - Enable parallel fleet snapshots with rayon
//! - **`serde`** - Derive Serialize/Deserialize on data types
//! - **`geojson`** - Parse routing-engine GeoJSON into routes
//! - **`ffi`** - Enable FFI bindings for mobile platforms (iOS/Android)
//! - **`full`** - Enable all features
//!
//! ## Quick Start
//!
//! ```rust
//! use route_progress::{GpsPoint, ProgressStore, Route, SpeedUnit, snapshot_fleet};
//!
//! let route = Route::new(
//!     "ROUTE_1",
//!     vec![
//!         GpsPoint::new(29.7604, -95.3698),
//!         GpsPoint::new(30.0802, -94.1266),
//!         GpsPoint::new(29.9511, -90.0715),
//!     ],
//!     563_000.0, // meters
//!     19_800.0,  // seconds
//! ).unwrap();
//!
//! let mut store = ProgressStore::default(); // ROUTE_1..ROUTE_5 seeds
//! store.tick().unwrap();
//!
//! let snapshots = snapshot_fleet(&[route], &store, SpeedUnit::MILES_PER_HOUR).unwrap();
//! println!(
//!     "{}: {:.0}% done, {:.1} mph",
//!     snapshots[0].route_id,
//!     snapshots[0].percent_complete(),
//!     snapshots[0].metrics.speed().unwrap(),
//! );
//! ```

// Unified error handling
pub mod error;
pub use error::{Result, RouteProgressError};

// Geographic helpers (haversine, bounds, center)
pub mod geo_utils;

// Completed/remaining split
pub mod split;
pub use split::{split_index, split_route, vehicle_position, Progress};

// Session progress state
pub mod progress;
pub use progress::{
    ProgressConfig, ProgressStore, RouteSeed, DEFAULT_PROGRESS_STEP, DEFAULT_ROUTE_SEEDS,
};

// Remaining distance/time and speed
pub mod metrics;
pub use metrics::{
    average_speed, convert_distance, convert_duration, derive_metrics, remaining_distance,
    remaining_time, units, DistanceUnit, RouteMetrics, SpeedUnit, TimeUnit,
};

// Road-type segmentation
pub mod segments;
pub use segments::{
    group_segments, segment_at, timeline_position, AnnotatedPoint, RoadAttributes, RoadSegment,
    TimelinePosition,
};

// Road-type breakdown
pub mod stats;
pub use stats::{category_breakdown, road_type_breakdown, CategoryBreakdown, CategoryShare};

// Colors and legend
pub mod palette;
pub use palette::{legend, palette_color, road_type_color, route_color, LegendEntry};

// Per-route render snapshots
pub mod fleet;
pub use fleet::{snapshot_fleet, snapshot_route, RouteSnapshot};

#[cfg(feature = "parallel")]
pub use fleet::snapshot_fleet_parallel;

// GeoJSON route source
#[cfg(feature = "geojson")]
pub mod geojson;

#[cfg(feature = "geojson")]
pub use geojson::{parse_route_geometry, RouteGeometry};

#[cfg(feature = "ffi")]
uniffi::setup_scaffolding!();

/// Initialize logging for Android (only used in FFI)
#[cfg(all(feature = "ffi", target_os = "android"))]
fn init_logging() {
    use android_logger::Config;
    use log::LevelFilter;

    android_logger::init_once(
        Config::default()
            .with_max_level(LevelFilter::Debug)
            .with_tag("RouteProgressRust")
    );
}

#[cfg(all(feature = "ffi", not(target_os = "android")))]
fn init_logging() {
    // No-op on non-Android platforms
}

// ============================================================================
// Core Types
// ============================================================================

/// A GPS coordinate with latitude and longitude.
///
/// # Example
/// ```
/// use route_progress::GpsPoint;
/// let point = GpsPoint::new(29.7604, -95.3698); // Houston
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "ffi", derive(uniffi::Record))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GpsPoint {
    pub latitude: f64,
    pub longitude: f64,
}

impl GpsPoint {
    /// Create a new GPS point.
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self { latitude, longitude }
    }

    /// Check if the point has valid coordinates.
    pub fn is_valid(&self) -> bool {
        self.latitude.is_finite()
            && self.longitude.is_finite()
            && self.latitude >= -90.0
            && self.latitude <= 90.0
            && self.longitude >= -180.0
            && self.longitude <= 180.0
    }
}

/// Bounding box of a route, for framing the map.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "ffi", derive(uniffi::Record))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Bounds {
    pub min_lat: f64,
    pub max_lat: f64,
    pub min_lng: f64,
    pub max_lng: f64,
}

impl Bounds {
    /// Create bounds from GPS points.
    pub fn from_points(points: &[GpsPoint]) -> Option<Self> {
        if points.is_empty() {
            return None;
        }
        Some(geo_utils::compute_bounds(points))
    }

    /// Get the center point of the bounds.
    pub fn center(&self) -> GpsPoint {
        GpsPoint::new(
            (self.min_lat + self.max_lat) / 2.0,
            (self.min_lng + self.max_lng) / 2.0,
        )
    }
}

/// Vehicle fields shown in route tooltips. Opaque to the core.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "ffi", derive(uniffi::Record))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct VehicleInfo {
    pub vehicle_id: Option<String>,
    pub make: Option<String>,
    pub model: Option<String>,
    pub year: Option<String>,
    pub fuel_type: Option<String>,
    pub additional_info: Option<String>,
}

/// Descriptive route fields, passed through unchanged.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "ffi", derive(uniffi::Record))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RouteDetails {
    /// e.g. "In Transit"
    pub status: Option<String>,
    pub description: Option<String>,
    /// Start location label
    pub start: Option<String>,
    /// End location label
    pub end: Option<String>,
    pub vehicle: VehicleInfo,
}

/// A pre-computed delivery route.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "ffi", derive(uniffi::Record))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Route {
    /// Unique route identifier
    pub route_id: String,
    /// Route geometry in travel order
    pub points: Vec<GpsPoint>,
    /// Total route distance in meters
    pub total_distance: f64,
    /// Total route duration in seconds
    pub total_duration: f64,
    pub details: RouteDetails,
}

impl Route {
    /// Create a route with empty descriptive fields.
    ///
    /// Fails with [`RouteProgressError::EmptyInput`] if `points` is empty.
    pub fn new(
        route_id: impl Into<String>,
        points: Vec<GpsPoint>,
        total_distance: f64,
        total_duration: f64,
    ) -> Result<Self> {
        if points.is_empty() {
            return Err(RouteProgressError::empty("route geometry"));
        }
        Ok(Self {
            route_id: route_id.into(),
            points,
            total_distance,
            total_duration,
            details: RouteDetails::default(),
        })
    }

    pub fn with_details(mut self, details: RouteDetails) -> Self {
        self.details = details;
        self
    }

    /// Bounding box of the geometry; `None` for an empty route.
    pub fn bounds(&self) -> Option<Bounds> {
        Bounds::from_points(&self.points)
    }

    /// Mean position of the geometry, for centering the map.
    pub fn center(&self) -> GpsPoint {
        geo_utils::compute_center(&self.points)
    }

    /// Borrowed `(completed, remaining)` split at `progress`.
    pub fn split(&self, progress: Progress) -> (&[GpsPoint], &[GpsPoint]) {
        split_route(&self.points, progress)
    }

    /// Metrics at `progress`, speed in `unit`.
    pub fn metrics(&self, progress: Progress, unit: SpeedUnit) -> RouteMetrics {
        derive_metrics(self.total_distance, self.total_duration, progress, unit)
    }
}

// ============================================================================
// FFI Exports (only when feature enabled)
// ============================================================================

#[cfg(feature = "ffi")]
mod ffi {
    use super::*;
    use log::{debug, info};
    use std::sync::{Arc, Mutex};

    /// Completed/remaining geometry for the host to draw.
    #[derive(Debug, Clone, uniffi::Record)]
    pub struct SplitResult {
        pub completed: Vec<GpsPoint>,
        pub remaining: Vec<GpsPoint>,
    }

    /// Split a route's points at a progress fraction.
    #[uniffi::export]
    pub fn ffi_split_route(
        points: Vec<GpsPoint>,
        progress: f64,
    ) -> std::result::Result<SplitResult, RouteProgressError> {
        init_logging();
        debug!("[RouteProgressRust] split_route: {} points at {:.3}", points.len(), progress);
        let (completed, remaining) = split_route(&points, Progress::new(progress)?);
        Ok(SplitResult {
            completed: completed.to_vec(),
            remaining: remaining.to_vec(),
        })
    }

    /// Remaining distance/time and average speed for a route.
    #[uniffi::export]
    pub fn ffi_derive_metrics(
        total_distance: f64,
        total_duration: f64,
        progress: f64,
        unit: SpeedUnit,
    ) -> std::result::Result<RouteMetrics, RouteProgressError> {
        init_logging();
        Ok(derive_metrics(total_distance, total_duration, Progress::new(progress)?, unit))
    }

    /// Group a road-annotated trace into same-type segments.
    #[uniffi::export]
    pub fn ffi_group_segments(points: Vec<AnnotatedPoint>) -> Vec<RoadSegment> {
        init_logging();
        let start = std::time::Instant::now();
        let segments = group_segments(&points);
        info!(
            "[RouteProgressRust] Grouped {} points into {} segments in {:?}",
            points.len(),
            segments.len(),
            start.elapsed()
        );
        segments
    }

    /// Road-type breakdown of a trace.
    #[uniffi::export]
    pub fn ffi_road_type_breakdown(
        points: Vec<AnnotatedPoint>,
    ) -> std::result::Result<CategoryBreakdown, RouteProgressError> {
        init_logging();
        road_type_breakdown(&points)
    }

    /// Legend rows for a breakdown.
    #[uniffi::export]
    pub fn ffi_legend(breakdown: CategoryBreakdown) -> Vec<LegendEntry> {
        legend(&breakdown)
    }

    /// Get default progress configuration.
    #[uniffi::export]
    pub fn default_progress_config() -> ProgressConfig {
        init_logging();
        info!("[RouteProgressRust] default_progress_config called - Rust is active!");
        ProgressConfig::default()
    }

    /// Session-owned progress store for FFI hosts.
    ///
    /// The mutex serializes increments from host threads.
    #[derive(uniffi::Object)]
    pub struct ProgressTracker {
        store: Mutex<ProgressStore>,
    }

    impl ProgressTracker {
        fn lock(&self) -> std::sync::MutexGuard<'_, ProgressStore> {
            self.store.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
        }
    }

    #[uniffi::export]
    impl ProgressTracker {
        #[uniffi::constructor]
        pub fn new(config: ProgressConfig) -> std::result::Result<Arc<Self>, RouteProgressError> {
            init_logging();
            info!("[RouteProgressRust] ProgressTracker with {} seeds", config.seeds.len());
            let store = ProgressStore::from_config(&config)?;
            Ok(Arc::new(Self { store: Mutex::new(store) }))
        }

        pub fn get(&self, route_id: String) -> std::result::Result<f64, RouteProgressError> {
            Ok(self.lock().get(&route_id)?.value())
        }

        pub fn increment(&self, route_id: String, delta: f64) -> std::result::Result<f64, RouteProgressError> {
            Ok(self.lock().increment(&route_id, delta)?.value())
        }

        /// Advance every route by the configured step.
        pub fn tick(&self) -> std::result::Result<(), RouteProgressError> {
            self.lock().tick()
        }

        pub fn route_ids(&self) -> Vec<String> {
            self.lock().route_ids()
        }

        /// Snapshot the given routes in selection order.
        pub fn snapshot(
            &self,
            routes: Vec<Route>,
            unit: SpeedUnit,
        ) -> std::result::Result<Vec<RouteSnapshot>, RouteProgressError> {
            let store = self.lock();
            info!("[RouteProgressRust] Using PARALLEL snapshot processing (rayon)");
            snapshot_fleet_parallel(&routes, &store, unit)
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
