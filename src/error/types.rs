use thiserror::Error;

use crate::logging::LoggingError;

/// Unified result type for the layer navigation crate.
pub type Result<T> = std::result::Result<T, NavError>;

/// Errors surfaced while building a navigation session.
#[derive(Debug, Error)]
pub enum NavError {
    #[error("duplicate room `{0}` in content registry")]
    DuplicateRoom(String),
    #[error("duplicate modal `{0}` in content registry")]
    DuplicateModal(String),
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
    #[error("content decode error: {0}")]
    Decode(#[from] serde_json::Error),
    #[error("logging error: {0}")]
    Logging(#[from] LoggingError),
    #[error(transparent)]
    Io(#[from] std::io::Error),
}
