//! # Road-Type Segmentation
//!
//! Breaks a road-annotated trace into maximal runs of consecutive points that
//! share one road type, for drawing each run in its own color.
//!
//! ## Algorithm
//! 1. Walk the points once, in travel order
//! 2. Start a new run on the first point and whenever the road type changes
//! 3. Each run keeps the attributes of its **first** point; later points only
//!    contribute coordinates
//!
//! Runs are never merged or reordered, so the segments partition the input:
//! concatenating their coordinates gives back the original trace.
//!
//! ```rust
//! use route_progress::{AnnotatedPoint, GpsPoint, group_segments};
//!
//! let trace: Vec<AnnotatedPoint> = ["primary", "primary", "motorway"]
//!     .iter()
//!     .enumerate()
//!     .map(|(i, t)| AnnotatedPoint::new(GpsPoint::new(29.76, -95.37 + i as f64 * 0.01), *t))
//!     .collect();
//!
//! let segments = group_segments(&trace);
//! assert_eq!(segments.len(), 2);
//! assert_eq!(segments[0].points.len(), 2);
//! assert_eq!(segments[1].road_type, "motorway");
//! ```

use log::debug;

use crate::error::{Result, RouteProgressError};
use crate::geo_utils::polyline_length;
use crate::GpsPoint;

/// Descriptive road fields carried alongside each point.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "ffi", derive(uniffi::Record))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RoadAttributes {
    /// Street name
    pub name: Option<String>,
    /// Posted speed limit as recorded by the source (e.g. "55 mph")
    pub speed_limit: Option<String>,
    /// Total lane count
    pub lanes: Option<u32>,
    /// Surface material ("asphalt", "gravel", ...)
    pub surface: Option<String>,
}

/// A trace point annotated with its road classification.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "ffi", derive(uniffi::Record))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AnnotatedPoint {
    pub point: GpsPoint,
    /// Road class, e.g. "motorway", "residential"
    pub road_type: String,
    pub attributes: RoadAttributes,
}

impl AnnotatedPoint {
    /// Point with a road type and no descriptive fields.
    pub fn new(point: GpsPoint, road_type: impl Into<String>) -> Self {
        Self {
            point,
            road_type: road_type.into(),
            attributes: RoadAttributes::default(),
        }
    }

    pub fn with_attributes(mut self, attributes: RoadAttributes) -> Self {
        self.attributes = attributes;
        self
    }
}

/// A maximal run of consecutive points sharing one road type.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "ffi", derive(uniffi::Record))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RoadSegment {
    pub road_type: String,
    /// Coordinates of the run, in travel order
    pub points: Vec<GpsPoint>,
    /// Attributes of the run's first point
    pub attributes: RoadAttributes,
    /// Index of the run's first point in the source trace
    pub start_index: u32,
    /// Length of the run's own polyline in meters
    pub distance_meters: f64,
}

impl RoadSegment {
    /// Number of source points in this run.
    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Index one past the run's last point in the source trace.
    pub fn end_index(&self) -> usize {
        self.start_index as usize + self.points.len()
    }
}

// Run under construction
struct OpenRun<'a> {
    leader: &'a AnnotatedPoint,
    start_index: usize,
    points: Vec<GpsPoint>,
}

impl OpenRun<'_> {
    fn close(self) -> RoadSegment {
        let distance_meters = polyline_length(&self.points);
        RoadSegment {
            road_type: self.leader.road_type.clone(),
            attributes: self.leader.attributes.clone(),
            start_index: self.start_index as u32,
            points: self.points,
            distance_meters,
        }
    }
}

/// Group a road-annotated trace into contiguous same-type segments.
///
/// Single pass, O(n). Empty input gives an empty result. A run of one point
/// is a valid segment.
pub fn group_segments(points: &[AnnotatedPoint]) -> Vec<RoadSegment> {
    let mut segments = Vec::new();
    let mut run: Option<OpenRun> = None;

    for (idx, p) in points.iter().enumerate() {
        if let Some(open) = run.as_mut() {
            if open.leader.road_type == p.road_type {
                open.points.push(p.point);
                continue;
            }
        }

        if let Some(open) = run.take() {
            segments.push(open.close());
        }
        run = Some(OpenRun {
            leader: p,
            start_index: idx,
            points: vec![p.point],
        });
    }

    if let Some(open) = run {
        segments.push(open.close());
    }

    debug!(
        "group_segments: {} points -> {} segments",
        points.len(),
        segments.len()
    );
    segments
}

/// Find the segment containing source point `point_index`.
///
/// `segments` must come from [`group_segments`]. Returns `None` when the index
/// is past the end of the trace.
pub fn segment_at(segments: &[RoadSegment], point_index: usize) -> Option<&RoadSegment> {
    let pos = segments.partition_point(|s| s.end_index() <= point_index);
    segments
        .get(pos)
        .filter(|s| (s.start_index as usize) <= point_index)
}

/// Vehicle position on the road-type timeline.
#[derive(Debug, Clone, PartialEq)]
pub struct TimelinePosition<'a> {
    pub step: usize,
    /// `step / (len - 1)`
    pub progress: f64,
    pub point: &'a AnnotatedPoint,
}

/// Look up the annotated point at timeline `step`.
///
/// Progress is `step / (len - 1)`, so the first point is 0.0 and the last is
/// 1.0. A single-point trace sits at 1.0.
pub fn timeline_position(points: &[AnnotatedPoint], step: usize) -> Result<TimelinePosition<'_>> {
    if points.is_empty() {
        return Err(RouteProgressError::empty("road-annotated trace"));
    }
    let point = points.get(step).ok_or(RouteProgressError::StepOutOfRange {
        step: step as u32,
        len: points.len() as u32,
    })?;
    let progress = if points.len() == 1 {
        1.0
    } else {
        step as f64 / (points.len() - 1) as f64
    };
    Ok(TimelinePosition { step, progress, point })
}
