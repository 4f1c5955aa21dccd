//! Error types for lifecycle operations
//!
//! All errors are returned to the immediate caller. Nothing in the tracker
//! retries internally; `ConcurrentModification` in particular must be
//! observed and handled by the caller.

use crate::status::{status_label, Status};
use crate::types::EntityId;
use thiserror::Error;

/// Errors produced by the tracker and event stores
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LifecycleError {
    /// The transition table does not contain `from → to`
    #[error("invalid transition: {} -> {to}", status_label(*.from))]
    InvalidTransition {
        /// Current status (`None` if the entity is untracked)
        from: Option<Status>,
        /// Requested status
        to: Status,
    },

    /// Another append changed the entity's status first
    #[error(
        "concurrent modification of {entity_id}: expected {}, found {}",
        status_label(*.expected),
        status_label(*.actual)
    )]
    ConcurrentModification {
        /// The contested entity
        entity_id: EntityId,
        /// Status the caller based its write on
        expected: Option<Status>,
        /// Status actually found in the log
        actual: Option<Status>,
    },

    /// `initialize` called for an entity that already has a log
    #[error("entity already initialized: {entity_id}")]
    AlreadyInitialized {
        /// The entity
        entity_id: EntityId,
    },

    /// Append attempted after the entity reached a terminal status
    #[error("entity is in a terminal state: {entity_id}")]
    TerminalState {
        /// The entity
        entity_id: EntityId,
    },

    /// Failure reported by a backing store
    #[error("storage error: {0}")]
    Storage(String),
}

/// Result type for lifecycle operations
pub type Result<T> = std::result::Result<T, LifecycleError>;

impl LifecycleError {
    /// Check if re-reading the current status and resubmitting may succeed
    pub fn is_retryable(&self) -> bool {
        matches!(self, LifecycleError::ConcurrentModification { .. })
    }

    /// Check if this is a lost optimistic-concurrency race
    pub fn is_conflict(&self) -> bool {
        matches!(self, LifecycleError::ConcurrentModification { .. })
    }

    /// Check if the request was rejected by the transition rules
    pub fn is_invalid_transition(&self) -> bool {
        matches!(
            self,
            LifecycleError::InvalidTransition { .. } | LifecycleError::TerminalState { .. }
        )
    }
}
