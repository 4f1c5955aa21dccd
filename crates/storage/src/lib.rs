//! Storage layer for the lifecycle tracker
//!
//! This crate implements the in-memory event store:
//! - ShardedEventStore: DashMap of per-entity logs
//! - Per-entity RwLock for atomic compare-then-append
//! - Clock injection for timestamps

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod sharded;

pub use sharded::{EntityLog, ShardedEventStore};
