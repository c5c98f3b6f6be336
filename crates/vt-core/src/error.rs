//! Tracker error taxonomy.
//!
//! None of these errors terminates a session.  They are recovered at the
//! mode / animation controller boundary, where [`TrackerError::status`] and
//! [`TrackerError::alert`] turn them into something the user can see.
//! Sub-crates keep their own error enums and convert into `TrackerError`
//! via `From` impls.

use thiserror::Error;

use crate::Status;

/// The top-level error type shared by all `vt-*` crates.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum TrackerError {
    /// Location provider denied, absent, or failed mid-watch.
    #[error("location source unavailable: {0}")]
    SourceUnavailable(String),

    /// Historical data or geocoding request failed (network, HTTP, decode).
    #[error("fetch failed: {0}")]
    FetchFailed(String),

    /// The routing service found no path.
    #[error("routing failed: {0}")]
    RoutingFailed(String),

    /// Routing was asked for a path through fewer than two waypoints.
    #[error("routing needs at least 2 waypoints, got {0}")]
    InsufficientWaypoints(usize),

    /// Animation start attempted on a route with fewer than two points.
    #[error("cannot animate a route of {0} point(s)")]
    EmptyRoute(usize),

    /// The geocoder has no match for the query.
    #[error("no location matches {0:?}")]
    NotFound(String),

    #[error("configuration error: {0}")]
    Config(String),

    #[error("parse error: {0}")]
    Parse(String),
}

impl TrackerError {
    /// The status indicator value to show after this failure.
    pub fn status(&self) -> Status {
        match self {
            TrackerError::SourceUnavailable(_)     => Status::LOCATION_UNAVAILABLE,
            TrackerError::FetchFailed(_)           => Status::LOAD_FAILED,
            TrackerError::RoutingFailed(_)         => Status::ROUTING_ERROR,
            TrackerError::InsufficientWaypoints(_) => Status::ROUTE_ERROR,
            TrackerError::NotFound(_)              => Status::NOT_FOUND,
            TrackerError::EmptyRoute(_)
            | TrackerError::Config(_)
            | TrackerError::Parse(_)               => Status::READY,
        }
    }

    /// Message for the user-visible alert.
    pub fn alert(&self) -> String {
        match self {
            TrackerError::SourceUnavailable(m) => format!("Location tracking unavailable: {m}"),
            TrackerError::FetchFailed(m)       => format!("Could not load historical route data: {m}"),
            TrackerError::RoutingFailed(m)     => format!("Error finding route: {m}"),
            TrackerError::NotFound(_)          => "Location not found.".to_owned(),
            other                              => other.to_string(),
        }
    }
}

/// Shorthand result type for all `vt-*` crates.
pub type TrackerResult<T> = Result<T, TrackerError>;
