//! Default collaborators.
//!
//! Neither is a substitute for a real routing engine or data service.  They
//! let a session run end to end with nothing but files on disk, and they
//! double as the collaborators of the demo binary.

use std::path::{Component, Path, PathBuf};

use async_trait::async_trait;

use vt_core::{Coordinate, TrackerError, TrackerResult};
use vt_route::{DatasetFormat, Route};

use crate::{HistoricalSource, RoutingService};

// ── StraightLineRouter ────────────────────────────────────────────────────────

/// Joins waypoints with straight legs, densified so consecutive points are
/// at most `spacing_m` metres apart.
///
/// Denser output makes the animation move at a roughly constant ground
/// speed, as a road-snapped route from a routing engine would.
#[derive(Debug, Clone)]
pub struct StraightLineRouter {
    pub spacing_m: f64,
}

impl Default for StraightLineRouter {
    fn default() -> Self {
        Self { spacing_m: 25.0 }
    }
}

impl StraightLineRouter {
    pub fn new(spacing_m: f64) -> Self {
        Self { spacing_m }
    }

    /// Synchronous core of [`RoutingService::route`].
    pub fn densify(&self, waypoints: &[Coordinate]) -> TrackerResult<Route> {
        if waypoints.len() < 2 {
            return Err(TrackerError::InsufficientWaypoints(waypoints.len()));
        }
        if !(self.spacing_m.is_finite() && self.spacing_m > 0.0) {
            return Err(TrackerError::Config(format!("invalid spacing {} m", self.spacing_m)));
        }

        let mut points = vec![waypoints[0]];
        for leg in waypoints.windows(2) {
            let (from, to) = (leg[0], leg[1]);
            let steps = (from.distance_m(to) / self.spacing_m).ceil().max(1.0) as usize;
            points.extend((1..=steps).map(|i| from.lerp(to, i as f64 / steps as f64)));
        }
        Ok(Route::new(points))
    }
}

#[async_trait]
impl RoutingService for StraightLineRouter {
    async fn route(&self, waypoints: &[Coordinate]) -> TrackerResult<Route> {
        self.densify(waypoints)
    }
}

// ── DatasetDirectory ──────────────────────────────────────────────────────────

/// Serves datasets from files under `root`.  The dataset identifier is a
/// file name relative to `root`; `.json` and `.csv` are understood.
#[derive(Debug, Clone)]
pub struct DatasetDirectory {
    root: PathBuf,
}

impl DatasetDirectory {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Resolve `dataset` under the root, refusing anything that could
    /// escape it.
    fn resolve(&self, dataset: &str) -> TrackerResult<PathBuf> {
        let rel = Path::new(dataset);
        let plain = !dataset.is_empty()
            && rel.components().all(|c| matches!(c, Component::Normal(_)));
        if !plain {
            return Err(TrackerError::FetchFailed(format!("invalid dataset identifier {dataset:?}")));
        }
        Ok(self.root.join(rel))
    }
}

#[async_trait]
impl HistoricalSource for DatasetDirectory {
    async fn fetch(&self, dataset: &str) -> TrackerResult<Route> {
        let path   = self.resolve(dataset)?;
        let format = DatasetFormat::from_path(&path)?;
        let bytes  = tokio::fs::read(&path)
            .await
            .map_err(|e| TrackerError::FetchFailed(format!("{}: {e}", path.display())))?;

        Ok(format.parse(bytes.as_slice())?)
    }
}
