//! Storage abstraction for lifecycle logs
//!
//! The [`EventStore`] trait is the seam between the tracker and whatever
//! holds the logs. Any append-only backing store keyed by
//! `(entity_id, sequence)` can implement it.

use crate::error::Result;
use crate::event::{CandidateEvent, LifecycleEvent};
use crate::status::Status;
use crate::types::EntityId;
use std::collections::BTreeSet;

/// Append-only, per-entity store of lifecycle events
///
/// # Atomicity
///
/// `append` must perform "read the last status, compare with
/// `expected_current`, then append" as one atomic step with respect to other
/// appends for the same entity. Appends for different entities must not
/// serialize against each other.
///
/// # Thread Safety
///
/// Implementations are shared across caller threads and must be
/// `Send + Sync`.
pub trait EventStore: Send + Sync {
    /// Append `candidate` if the entity's current status is `expected_current`
    ///
    /// # Errors
    /// - `ConcurrentModification` if the current status differs; the log is
    ///   left untouched
    /// - `TerminalState` if the entity's log already ends in a terminal status
    fn append(
        &self,
        entity_id: &EntityId,
        candidate: CandidateEvent,
        expected_current: Option<Status>,
    ) -> Result<LifecycleEvent>;

    /// The entity's events in append order (empty if unknown)
    fn history(&self, entity_id: &EntityId) -> Vec<LifecycleEvent>;

    /// `to_status` of the entity's last event (`None` if unknown)
    fn current_status(&self, entity_id: &EntityId) -> Option<Status>;

    /// Every entity with at least one event, in ascending order
    fn all_entity_ids(&self) -> BTreeSet<EntityId>;

    /// Number of events recorded for the entity
    fn len(&self, entity_id: &EntityId) -> usize {
        self.history(entity_id).len()
    }

    /// Check if the entity has no events
    fn is_empty(&self, entity_id: &EntityId) -> bool {
        self.len(entity_id) == 0
    }

    /// Number of entities with at least one event
    fn entity_count(&self) -> usize {
        self.all_entity_ids().len()
    }
}
