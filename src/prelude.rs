//! Convenient imports for doctrack.
//!
//! ```ignore
//! use doctrack::prelude::*;
//!
//! let tracker = Tracker::in_memory();
//! tracker.initialize(&Document::new("plan-1", "alice"))?;
//! ```

// Main entry point
pub use crate::tracker::{Tracker, TrackerBuilder};
pub use crate::config::TrackerConfig;

// Error handling
pub use crate::error::{Error, Result};

// Core types
pub use crate::types::{ActorId, EntityId, EventKind, EventSource, LifecycleEvent, Status};

// Caller inputs
pub use crate::types::{Document, TrackedDocument, TransitionRequest};

// Statistics
pub use crate::types::{GlobalAnalytics, PerEntityStats};
