//! Lifecycle engine
//!
//! Orchestration and statistics on top of an [`EventStore`]:
//! - [`LifecycleTracker`]: initialize, sync, transition, delete, query
//! - [`StatsAggregator`]: per-entity stats and global analytics
//!
//! [`EventStore`]: doctrack_core::EventStore

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod document;
pub mod stats;
pub mod tracker;

pub use document::{Document, TrackedDocument, TransitionRequest};
pub use stats::{GlobalAnalytics, PerEntityStats, StatsAggregator, StatusDwell};
pub use tracker::{LifecycleTracker, TrackerOptions};
