//! Public types for the doctrack API.
//!
//! This module re-exports types from internal crates with a clean public interface.

// Identifiers
pub use doctrack_core::{ActorId, EntityId, EventId};

// Status vocabulary and rules
pub use doctrack_core::{status_label, ParseStatusError, Status, TransitionTable};

// Events
pub use doctrack_core::{CandidateEvent, EventKind, EventSource, LifecycleEvent};

// Errors from the lifecycle layer
pub use doctrack_core::LifecycleError;

// Extension points
pub use doctrack_core::{Clock, EventStore, ManualClock, SystemClock};
pub use doctrack_storage::ShardedEventStore;

// Caller inputs
pub use doctrack_engine::{Document, LifecycleTracker, TrackedDocument, TransitionRequest};

// Statistics
pub use doctrack_engine::{GlobalAnalytics, PerEntityStats, StatusDwell};
