//! Collaborator traits.
//!
//! The core never talks to a map library, a routing engine, a geocoder or a
//! GPS directly.  It calls these traits, and the application plugs in real
//! or fake implementations.
//!
//! # Thread safety
//!
//! Implementations must be `Send + Sync`: requests run on spawned tasks that
//! hold an `Arc` to the collaborator.

use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::mpsc;

use vt_core::{Coordinate, TrackerResult};
use vt_route::Route;

/// Computes a drivable path through waypoints.
#[async_trait]
pub trait RoutingService: Send + Sync {
    /// Resolve a path through `waypoints` (at least two).  The result may be
    /// finer-grained than the input.  No path → `TrackerError::RoutingFailed`.
    async fn route(&self, waypoints: &[Coordinate]) -> TrackerResult<Route>;
}

/// Turns a free-text place name into a coordinate.
#[async_trait]
pub trait Geocoder: Send + Sync {
    /// Best match for `query`.  No match → `TrackerError::NotFound`;
    /// transport failure → `TrackerError::FetchFailed`.
    async fn geocode(&self, query: &str) -> TrackerResult<Coordinate>;
}

/// Serves recorded routes by dataset identifier.
#[async_trait]
pub trait HistoricalSource: Send + Sync {
    async fn fetch(&self, dataset: &str) -> TrackerResult<Route>;
}

/// Handle identifying one live-position subscription.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct SubscriptionId(pub u64);

impl fmt::Display for SubscriptionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SubscriptionId({})", self.0)
    }
}

/// An active live-position subscription.
///
/// The provider pushes `Ok(position)` at its own cadence and `Err(..)` when
/// the source fails.  The subscription stays open until
/// [`LocationProvider::cancel`] is called with `id`.
pub struct LiveWatch {
    pub id:      SubscriptionId,
    pub updates: mpsc::Receiver<TrackerResult<Coordinate>>,
}

/// Device / vehicle location.
#[async_trait]
pub trait LocationProvider: Send + Sync {
    /// Start continuous updates.  Permission denied or no hardware →
    /// `TrackerError::SourceUnavailable`.
    fn watch(&self) -> TrackerResult<LiveWatch>;

    /// Stop the subscription `id`.  Must be called once per successful
    /// `watch`, or updates leak.
    fn cancel(&self, id: SubscriptionId);

    /// One-shot position fix.
    async fn current_position(&self) -> TrackerResult<Coordinate>;
}

/// The full set of collaborators a session needs.  Cheap to clone.
#[derive(Clone)]
pub struct Collaborators {
    pub routing:  Arc<dyn RoutingService>,
    pub geocoder: Arc<dyn Geocoder>,
    pub history:  Arc<dyn HistoricalSource>,
    pub location: Arc<dyn LocationProvider>,
}
