use thiserror::Error;

use vt_core::TrackerError;

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("session configuration error: {0}")]
    Config(#[from] TrackerError),

    #[error("session has shut down")]
    Closed,
}

pub type SessionResult<T> = Result<T, SessionError>;
