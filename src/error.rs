//! Error type shared by every fallible operation in the crate.

use thiserror::Error;

/// Errors returned by progress, metrics and segmentation operations.
///
/// All variants are local, recoverable conditions. Hosts translate them into
/// user-facing messages ("speed unavailable", "no data for selected range").
#[derive(Error, Debug, Clone, PartialEq)]
#[cfg_attr(feature = "ffi", derive(uniffi::Error))]
#[cfg_attr(feature = "ffi", uniffi(flat_error))]
pub enum RouteProgressError {
    /// Progress was requested for a route that was never seeded.
    #[error("no progress tracked for route '{0}'")]
    KeyNotFound(String),
    /// Average speed over a zero (or invalid) duration.
    #[error("average speed is undefined for a zero duration")]
    DivisionUndefined,
    /// A non-empty sequence was required.
    #[error("empty input: {0}")]
    EmptyInput(String),
    /// A progress value outside [0, 1] (or NaN) was supplied directly.
    #[error("progress {0} is outside [0, 1]")]
    InvalidProgress(f64),
    /// Increments must be finite and strictly positive.
    #[error("invalid progress increment {0}: must be finite and > 0")]
    InvalidIncrement(f64),
    #[error("timeline step {step} out of range for {len} points")]
    StepOutOfRange { step: u32, len: u32 },
    /// Route geometry could not be read from GeoJSON.
    #[error("invalid GeoJSON route: {0}")]
    GeoJson(String),
}

impl RouteProgressError {
    pub(crate) fn empty(what: &str) -> Self {
        Self::EmptyInput(what.to_string())
    }
}

#[cfg(feature = "geojson")]
impl From<serde_json::Error> for RouteProgressError {
    fn from(e: serde_json::Error) -> Self {
        Self::GeoJson(e.to_string())
    }
}

/// Crate-wide result alias.
pub type Result<T> = std::result::Result<T, RouteProgressError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        assert_eq!(
            RouteProgressError::KeyNotFound("ROUTE_9".into()).to_string(),
            "no progress tracked for route 'ROUTE_9'"
        );
        assert_eq!(
            RouteProgressError::StepOutOfRange { step: 5, len: 3 }.to_string(),
            "timeline step 5 out of range for 3 points"
        );
        assert_eq!(
            RouteProgressError::empty("road points").to_string(),
            "empty input: road points"
        );
    }
}
