//! # Fleet Snapshots
//!
//! Everything the live map needs for one route in one render pass: the split
//! geometry, where to put the vehicle marker, start/end markers, tooltip
//! metrics and the route's color.
//!
//! Snapshots own their data so a host can hand them across threads or FFI
//! without holding borrows into the route set.

use std::borrow::Borrow;
use std::time::Instant;

use log::{debug, info};

use crate::error::{Result, RouteProgressError};
use crate::metrics::{derive_metrics, RouteMetrics, SpeedUnit};
use crate::palette::route_color;
use crate::progress::ProgressStore;
use crate::split::{split_route, vehicle_position};
use crate::{GpsPoint, Route, RouteDetails};

/// Render-ready state of one route.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "ffi", derive(uniffi::Record))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RouteSnapshot {
    pub route_id: String,
    /// Route color from the wrapping palette
    pub color: String,
    /// Progress fraction (0-1)
    pub progress: f64,
    /// Driven part of the route
    pub completed: Vec<GpsPoint>,
    /// Part still ahead (drawn animated while non-empty)
    pub remaining: Vec<GpsPoint>,
    /// Vehicle marker position
    pub vehicle_position: GpsPoint,
    pub start: GpsPoint,
    pub end: GpsPoint,
    pub metrics: RouteMetrics,
    /// Pass-through descriptive fields for tooltips
    pub details: RouteDetails,
}

impl RouteSnapshot {
    pub fn percent_complete(&self) -> f64 {
        self.progress * 100.0
    }
}

/// Build the snapshot of one route.
///
/// Fails with [`RouteProgressError::KeyNotFound`] when the store has no
/// progress for the route and [`RouteProgressError::EmptyInput`] when the
/// route has no geometry.
pub fn snapshot_route(
    route: &Route,
    store: &ProgressStore,
    color_index: usize,
    unit: SpeedUnit,
) -> Result<RouteSnapshot> {
    let progress = store.get(&route.route_id)?;
    let (start, end) = match (route.points.first(), route.points.last()) {
        (Some(s), Some(e)) => (*s, *e),
        _ => return Err(RouteProgressError::empty("route geometry")),
    };
    let vehicle = vehicle_position(&route.points, progress).unwrap_or(start);
    let (completed, remaining) = split_route(&route.points, progress);
    let metrics = derive_metrics(route.total_distance, route.total_duration, progress, unit);

    if metrics.average_speed.is_none() {
        debug!("{}: average speed unavailable (zero duration)", route.route_id);
    }

    Ok(RouteSnapshot {
        route_id: route.route_id.clone(),
        color: route_color(color_index).to_string(),
        progress: progress.value(),
        completed: completed.to_vec(),
        remaining: remaining.to_vec(),
        vehicle_position: vehicle,
        start,
        end,
        metrics,
        details: route.details.clone(),
    })
}

/// Snapshot every route in the selection.
///
/// Colors follow selection order. The first failing route aborts the batch.
pub fn snapshot_fleet<R: Borrow<Route>>(
    routes: &[R],
    store: &ProgressStore,
    unit: SpeedUnit,
) -> Result<Vec<RouteSnapshot>> {
    let start = Instant::now();
    let snapshots = routes
        .iter()
        .enumerate()
        .map(|(idx, r)| snapshot_route(<R as Borrow<Route>>::borrow(r), store, idx, unit))
        .collect::<Result<Vec<_>>>()?;
    info!(
        "snapshot_fleet: {} routes in {:?}",
        snapshots.len(),
        start.elapsed()
    );
    Ok(snapshots)
}

/// Parallel version of [`snapshot_fleet`]; output order matches input order.
#[cfg(feature = "parallel")]
pub fn snapshot_fleet_parallel<R: Borrow<Route> + Sync>(
    routes: &[R],
    store: &ProgressStore,
    unit: SpeedUnit,
) -> Result<Vec<RouteSnapshot>> {
    use rayon::prelude::*;

    let start = Instant::now();
    let snapshots = routes
        .par_iter()
        .enumerate()
        .map(|(idx, r)| snapshot_route(<R as Borrow<Route>>::borrow(r), store, idx, unit))
        .collect::<Result<Vec<_>>>()?;
    info!(
        "snapshot_fleet_parallel: {} routes in {:?}",
        snapshots.len(),
        start.elapsed()
    );
    Ok(snapshots)
}
