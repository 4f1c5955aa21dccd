//! Unified error types for doctrack.
//!
//! This module provides the error type returned by the [`Tracker`] facade.
//! Lifecycle failures keep their full structure; configuration and I/O
//! failures only occur while building a tracker.
//!
//! [`Tracker`]: crate::Tracker

use doctrack_core::LifecycleError;
use thiserror::Error;

/// All doctrack errors.
#[derive(Debug, Error)]
pub enum Error {
    /// Rejected or contested lifecycle operation
    #[error(transparent)]
    Lifecycle(#[from] LifecycleError),

    /// Invalid configuration
    #[error("configuration error: {0}")]
    Config(String),

    /// I/O error while reading configuration
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for doctrack operations.
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Check if this error is retryable.
    ///
    /// Only lost optimistic-concurrency races are; the caller must re-read
    /// the current status before resubmitting.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Error::Lifecycle(e) if e.is_retryable())
    }

    /// Check if this is a concurrent modification.
    pub fn is_conflict(&self) -> bool {
        matches!(self, Error::Lifecycle(e) if e.is_conflict())
    }

    /// Check if the transition rules rejected the request.
    pub fn is_invalid_transition(&self) -> bool {
        matches!(self, Error::Lifecycle(e) if e.is_invalid_transition())
    }

    /// The underlying lifecycle error, if any.
    pub fn as_lifecycle(&self) -> Option<&LifecycleError> {
        match self {
            Error::Lifecycle(e) => Some(e),
            _ => None,
        }
    }
}

impl From<toml::de::Error> for Error {
    fn from(e: toml::de::Error) -> Self {
        Error::Config(e.to_string())
    }
}
