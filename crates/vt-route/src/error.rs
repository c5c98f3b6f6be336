//! Route-subsystem error type.

use thiserror::Error;

use vt_core::TrackerError;

/// Errors produced by `vt-route`.
#[derive(Debug, Error)]
pub enum RouteError {
    #[error("dataset is not a JSON array of {{latitude, longitude}}: {0}")]
    Json(#[from] serde_json::Error),

    #[error("dataset CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("point {index} out of range: ({latitude}, {longitude})")]
    InvalidPoint {
        index:     usize,
        latitude:  f64,
        longitude: f64,
    },

    #[error("unsupported dataset format: {0}")]
    Format(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<RouteError> for TrackerError {
    fn from(e: RouteError) -> Self {
        TrackerError::FetchFailed(e.to_string())
    }
}

pub type RouteResult<T> = Result<T, RouteError>;
