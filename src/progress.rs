//! # Progress Tracking
//!
//! Per-route progress state for one dashboard session.
//!
//! The store is seeded once (from a [`ProgressConfig`] or explicit seeds) and
//! then only moves forward through [`ProgressStore::increment`]. It does not
//! model wall-clock time: the host decides when to call [`ProgressStore::tick`].
//!
//! The store is a plain owned value. Mutation takes `&mut self`, so sharing it
//! across threads requires the host to wrap it in a lock.

use std::collections::BTreeMap;

use log::debug;

use crate::error::{Result, RouteProgressError};
use crate::split::Progress;

/// Default amount added to every route on each simulated update (1%).
pub const DEFAULT_PROGRESS_STEP: f64 = 0.01;

/// Seed values used when the host does not supply its own.
pub const DEFAULT_ROUTE_SEEDS: [(&str, f64); 5] = [
    ("ROUTE_1", 0.27),
    ("ROUTE_2", 0.43),
    ("ROUTE_3", 0.52),
    ("ROUTE_4", 0.22),
    ("ROUTE_5", 0.34),
];

/// Initial progress for one route.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "ffi", derive(uniffi::Record))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RouteSeed {
    pub route_id: String,
    /// Fraction in [0, 1]
    pub progress: f64,
}

impl RouteSeed {
    pub fn new(route_id: impl Into<String>, progress: f64) -> Self {
        Self { route_id: route_id.into(), progress }
    }
}

/// Configuration for a session's progress store.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "ffi", derive(uniffi::Record))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ProgressConfig {
    /// Amount added to every route by [`ProgressStore::tick`].
    /// Default: 0.01 (1% per update)
    pub step: f64,

    /// Initial progress per route.
    /// Default: the five demo routes ROUTE_1..ROUTE_5
    pub seeds: Vec<RouteSeed>,
}

impl Default for ProgressConfig {
    fn default() -> Self {
        Self {
            step: DEFAULT_PROGRESS_STEP,
            seeds: DEFAULT_ROUTE_SEEDS
                .iter()
                .map(|(id, p)| RouteSeed::new(*id, *p))
                .collect(),
        }
    }
}

/// Mapping from route identifier to its current [`Progress`].
#[derive(Debug, Clone)]
pub struct ProgressStore {
    progress: BTreeMap<String, Progress>,
    step: f64,
}

impl ProgressStore {
    /// Create a store from explicit `(route_id, fraction)` seeds.
    ///
    /// Fails with [`RouteProgressError::InvalidProgress`] if any seed is
    /// outside `[0, 1]`. A later seed for the same id replaces an earlier one.
    ///
    /// # Example
    /// ```
    /// use route_progress::ProgressStore;
    ///
    /// let mut store = ProgressStore::with_seeds([("ROUTE_1", 0.25)]).unwrap();
    /// store.increment("ROUTE_1", 0.5).unwrap();
    /// assert_eq!(store.get("ROUTE_1").unwrap().value(), 0.75);
    /// ```
    pub fn with_seeds<I, S>(seeds: I) -> Result<Self>
    where
        I: IntoIterator<Item = (S, f64)>,
        S: Into<String>,
    {
        let mut progress = BTreeMap::new();
        for (route_id, value) in seeds {
            progress.insert(route_id.into(), Progress::new(value)?);
        }
        Ok(Self { progress, step: DEFAULT_PROGRESS_STEP })
    }

    /// Create a store from a [`ProgressConfig`].
    ///
    /// The configured step must be a valid increment (finite, > 0).
    pub fn from_config(config: &ProgressConfig) -> Result<Self> {
        if !config.step.is_finite() || config.step <= 0.0 {
            return Err(RouteProgressError::InvalidIncrement(config.step));
        }
        let mut store = Self::with_seeds(
            config.seeds.iter().map(|s| (s.route_id.clone(), s.progress)),
        )?;
        store.step = config.step;
        Ok(store)
    }

    /// Current progress of a route.
    pub fn get(&self, route_id: &str) -> Result<Progress> {
        self.progress
            .get(route_id)
            .copied()
            .ok_or_else(|| RouteProgressError::KeyNotFound(route_id.to_string()))
    }

    /// Advance one route by `delta`, saturating at 1.0. Returns the new value.
    ///
    /// Progress never decreases: `delta` must be finite and strictly positive.
    pub fn increment(&mut self, route_id: &str, delta: f64) -> Result<Progress> {
        let current = self
            .progress
            .get_mut(route_id)
            .ok_or_else(|| RouteProgressError::KeyNotFound(route_id.to_string()))?;
        let next = current.advance(delta)?;
        debug!(
            "increment {}: {:.3} -> {:.3}",
            route_id,
            current.value(),
            next.value()
        );
        *current = next;
        Ok(next)
    }

    /// Advance every tracked route by `delta`.
    ///
    /// The increment is validated before any route is touched, so a bad
    /// `delta` leaves the store unchanged.
    pub fn increment_all(&mut self, delta: f64) -> Result<()> {
        Progress::ZERO.advance(delta)?;
        for (route_id, progress) in self.progress.iter_mut() {
            *progress = progress.advance(delta)?;
            debug!("increment {}: now {:.3}", route_id, progress.value());
        }
        Ok(())
    }

    /// Advance every route by the configured step (one simulated update).
    pub fn tick(&mut self) -> Result<()> {
        self.increment_all(self.step)
    }

    /// Insert or replace the seed for a route.
    ///
    /// This is the only way to set a value directly, and it is validated:
    /// values outside `[0, 1]` fail with [`RouteProgressError::InvalidProgress`].
    pub fn seed(&mut self, route_id: impl Into<String>, value: f64) -> Result<()> {
        let progress = Progress::new(value)?;
        self.progress.insert(route_id.into(), progress);
        Ok(())
    }

    pub fn is_complete(&self, route_id: &str) -> Result<bool> {
        Ok(self.get(route_id)?.is_complete())
    }

    /// Step applied by [`ProgressStore::tick`].
    pub fn step(&self) -> f64 {
        self.step
    }

    /// Tracked route ids in sorted order.
    pub fn route_ids(&self) -> Vec<String> {
        self.progress.keys().cloned().collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, Progress)> {
        self.progress.iter().map(|(id, p)| (id.as_str(), *p))
    }

    pub fn len(&self) -> usize {
        self.progress.len()
    }

    pub fn is_empty(&self) -> bool {
        self.progress.is_empty()
    }
}

impl Default for ProgressStore {
    fn default() -> Self {
        Self::with_seeds(DEFAULT_ROUTE_SEEDS).unwrap_or_else(|_| Self {
            progress: BTreeMap::new(),
            step: DEFAULT_PROGRESS_STEP,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx_eq(a: f64, b: f64, epsilon: f64) -> bool {
        (a - b).abs() < epsilon
    }

    #[test]
    fn test_default_seeds() {
        let store = ProgressStore::default();
        assert_eq!(store.len(), 5);
        assert_eq!(store.get("ROUTE_1").unwrap().value(), 0.27);
        assert_eq!(store.get("ROUTE_5").unwrap().value(), 0.34);
        assert_eq!(
            store.route_ids(),
            vec!["ROUTE_1", "ROUTE_2", "ROUTE_3", "ROUTE_4", "ROUTE_5"]
        );
    }

    #[test]
    fn test_from_default_config_matches_default_store() {
        let store = ProgressStore::from_config(&ProgressConfig::default()).unwrap();
        let default_store = ProgressStore::default();
        assert_eq!(store.step(), DEFAULT_PROGRESS_STEP);
        for (id, p) in default_store.iter() {
            assert_eq!(store.get(id).unwrap(), p);
        }
    }

    #[test]
    fn test_get_unknown_route() {
        let store = ProgressStore::default();
        assert_eq!(
            store.get("ROUTE_42"),
            Err(RouteProgressError::KeyNotFound("ROUTE_42".to_string()))
        );
    }

    #[test]
    fn test_invalid_seed_rejected() {
        let result = ProgressStore::with_seeds([("A", 0.5), ("B", 1.5)]);
        assert_eq!(result.unwrap_err(), RouteProgressError::InvalidProgress(1.5));

        let config = ProgressConfig { step: 0.0, seeds: vec![] };
        assert!(matches!(
            ProgressStore::from_config(&config),
            Err(RouteProgressError::InvalidIncrement(_))
        ));
    }

    #[test]
    fn test_increment_clamps_at_one() {
        let mut store = ProgressStore::with_seeds([("A", 0.95)]).unwrap();
        let p = store.increment("A", 0.03).unwrap();
        assert!(approx_eq(p.value(), 0.98, 1e-12));
        let p = store.increment("A", 0.5).unwrap();
        assert_eq!(p.value(), 1.0);
        assert!(store.is_complete("A").unwrap());
    }

    #[test]
    fn test_increment_idempotent_at_ceiling() {
        let mut store = ProgressStore::with_seeds([("A", 1.0)]).unwrap();
        for _ in 0..10 {
            store.increment("A", 0.01).unwrap();
        }
        assert_eq!(store.get("A").unwrap(), Progress::COMPLETE);
    }

    #[test]
    fn test_increment_unknown_route() {
        let mut store = ProgressStore::default();
        assert!(matches!(
            store.increment("nope", 0.1),
            Err(RouteProgressError::KeyNotFound(_))
        ));
    }

    #[test]
    fn test_increment_never_decreases() {
        let mut store = ProgressStore::with_seeds([("A", 0.5)]).unwrap();
        assert!(store.increment("A", -0.2).is_err());
        assert!(store.increment("A", 0.0).is_err());
        assert_eq!(store.get("A").unwrap().value(), 0.5);
    }

    #[test]
    fn test_tick_advances_all_routes() {
        let mut store = ProgressStore::default();
        let before: Vec<f64> = store.iter().map(|(_, p)| p.value()).collect();
        store.tick().unwrap();
        let after: Vec<f64> = store.iter().map(|(_, p)| p.value()).collect();
        for (b, a) in before.iter().zip(after.iter()) {
            assert!(approx_eq(*a, b + DEFAULT_PROGRESS_STEP, 1e-12));
        }
    }

    #[test]
    fn test_many_ticks_reach_completion() {
        let mut store = ProgressStore::default();
        for _ in 0..200 {
            store.tick().unwrap();
        }
        assert!(store.iter().all(|(_, p)| p.is_complete()));
    }

    #[test]
    fn test_increment_all_bad_delta_leaves_store_unchanged() {
        let mut store = ProgressStore::default();
        assert!(store.increment_all(f64::NAN).is_err());
        assert_eq!(store.get("ROUTE_2").unwrap().value(), 0.43);
    }

    #[test]
    fn test_seed_validates() {
        let mut store = ProgressStore::default();
        store.seed("ROUTE_6", 0.1).unwrap();
        assert_eq!(store.get("ROUTE_6").unwrap().value(), 0.1);
        assert_eq!(
            store.seed("ROUTE_7", -0.5),
            Err(RouteProgressError::InvalidProgress(-0.5))
        );
        assert!(store.get("ROUTE_7").is_err());
    }
}
