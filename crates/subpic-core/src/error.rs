//! Error types for subpic

use thiserror::Error;

/// Main error type for subpic operations
#[derive(Error, Debug)]
pub enum Error {
    /// A required geometry value was missing or had zero area
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// The frame backend could not allocate a frame
    #[error("Out of memory: frame allocation failed")]
    OutOfMemory,

    /// The dirty rectangle is empty; the caller should skip this frame
    #[error("Nothing to display")]
    NothingToDisplay,

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type alias using subpic's Error
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Create an invalid argument error
    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Error::InvalidArgument(message.into())
    }

    /// Whether this is the "skip this frame" outcome rather than a fault
    pub fn is_nothing_to_display(&self) -> bool {
        matches!(self, Error::NothingToDisplay)
    }
}
