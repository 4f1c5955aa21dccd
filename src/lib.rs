//! # doctrack
//!
//! Document lifecycle tracking.
//!
//! doctrack governs the status of a document (plan, proposal, form) across
//! its life, records every transition as an immutable event, and derives
//! statistics from that event log.
//!
//! ## Quick Start
//!
//! ```
//! use doctrack::prelude::*;
//!
//! # fn main() -> doctrack::Result<()> {
//! let tracker = Tracker::in_memory();
//! let plan: EntityId = "plan-1".into();
//! let alice: ActorId = "alice".into();
//!
//! tracker.initialize(&Document::new("plan-1", "alice"))?;
//! tracker.transition_to(&plan, Status::Review, &alice, None)?;
//! tracker.transition_to(&plan, Status::Approved, &"bob".into(), Some("ship it"))?;
//!
//! let stats = tracker.get_lifecycle_stats(&plan);
//! assert_eq!(stats.event_count, 3);
//! assert_eq!(stats.most_active_user, Some(alice));
//! # Ok(())
//! # }
//! ```
//!
//! ## Lifecycle
//!
//! | From | To |
//! |------|----|
//! | none | draft |
//! | draft | review, archived |
//! | review | approved, draft, archived |
//! | approved | published, review, archived |
//! | published | archived |
//! | archived | draft |
//!
//! Any live document can be deleted with [`Tracker::delete`]; `deleted` is
//! terminal.
//!
//! ## Concurrency
//!
//! Writes use optimistic concurrency per document. A writer that loses a race
//! gets a conflict error ([`Error::is_conflict`]) and is expected to re-read
//! the status before retrying. The tracker never retries on its own.

#![warn(missing_docs)]

mod config;
mod error;
mod tracker;
mod types;

pub mod prelude;

// Re-export main entry points
pub use config::TrackerConfig;
pub use error::{Error, Result};
pub use tracker::{Tracker, TrackerBuilder};

// Re-export types
pub use types::*;
