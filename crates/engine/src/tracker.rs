//! Lifecycle tracker
//!
//! Validates requested transitions against the [`TransitionTable`] and
//! records them through an [`EventStore`].
//!
//! ## Write Protocol
//!
//! ```text
//! 1. current = store.current_status(entity)
//! 2. reject if TransitionTable forbids current → target
//! 3. store.append(entity, candidate, expected_current = current)
//! 4. ConcurrentModification goes back to the caller unchanged
//! ```
//!
//! The tracker never retries. A caller that loses a race re-reads the status
//! and decides whether its transition still makes sense.

use crate::document::{TrackedDocument, TransitionRequest};
use crate::stats::{GlobalAnalytics, PerEntityStats, StatsAggregator};
use doctrack_core::{
    ActorId, CandidateEvent, EntityId, EventKind, EventSource, EventStore, LifecycleError,
    LifecycleEvent, Result, Status, TransitionTable,
};
use rustc_hash::FxHashMap;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Tunables shared by every tracker operation
#[derive(Debug, Clone)]
pub struct TrackerOptions {
    /// Source recorded when a request does not name one
    pub default_source: EventSource,
    /// Reason overrides keyed by target status
    pub reasons: FxHashMap<Status, String>,
}

impl TrackerOptions {
    /// Reason for a transition into `status` when the caller gave none
    pub fn reason_for(&self, status: Status) -> &str {
        self.reasons
            .get(&status)
            .map_or(status.default_reason(), String::as_str)
    }
}

impl Default for TrackerOptions {
    fn default() -> Self {
        Self {
            default_source: EventSource::User,
            reasons: FxHashMap::default(),
        }
    }
}

/// Orchestrates lifecycle writes and queries
///
/// Cheap to clone; clones share the same store.
///
/// # Example
///
/// ```ignore
/// let store = Arc::new(ShardedEventStore::new());
/// let tracker = LifecycleTracker::new(store);
///
/// tracker.initialize(&Document::new("plan-1", "alice"))?;
/// tracker.transition_to(&"plan-1".into(), Status::Review, &"alice".into(), None)?;
/// ```
#[derive(Clone)]
pub struct LifecycleTracker {
    store: Arc<dyn EventStore>,
    options: Arc<TrackerOptions>,
}

impl LifecycleTracker {
    /// Create a tracker with default options
    pub fn new(store: Arc<dyn EventStore>) -> Self {
        Self::with_options(store, TrackerOptions::default())
    }

    /// Create a tracker with explicit options
    pub fn with_options(store: Arc<dyn EventStore>, options: TrackerOptions) -> Self {
        Self {
            store,
            options: Arc::new(options),
        }
    }

    /// The underlying store
    pub fn store(&self) -> &Arc<dyn EventStore> {
        &self.store
    }

    /// Active options
    pub fn options(&self) -> &TrackerOptions {
        &self.options
    }

    /// Statistics view over the same store
    pub fn stats(&self) -> StatsAggregator {
        StatsAggregator::new(Arc::clone(&self.store))
    }

    // ========================================================================
    // Writes
    // ========================================================================

    /// Record the creation of a document (none → draft)
    ///
    /// # Errors
    /// - `AlreadyInitialized` if the entity already has events, including
    ///   when a concurrent `initialize` got there first
    pub fn initialize<D: TrackedDocument + ?Sized>(&self, document: &D) -> Result<LifecycleEvent> {
        let entity_id = document.entity_id();
        if !self.store.is_empty(&entity_id) {
            return Err(LifecycleError::AlreadyInitialized { entity_id });
        }

        let candidate = CandidateEvent::new(
            Status::Draft,
            document.owner(),
            EventKind::Creation,
            self.options.default_source,
        )
        .with_reason(self.options.reason_for(Status::Draft));

        match self.store.append(&entity_id, candidate, None) {
            Ok(event) => {
                info!(entity_id = %entity_id, actor = %event.actor_id, "document lifecycle started");
                Ok(event)
            }
            Err(LifecycleError::ConcurrentModification { .. }) => {
                Err(LifecycleError::AlreadyInitialized { entity_id })
            }
            Err(e) => Err(e),
        }
    }

    /// Sync the tracked status with the status the document reports
    ///
    /// Returns `Ok(None)` when they already agree. Otherwise records a
    /// `status_change` event attributed to the document's last editor.
    /// A reported status of `deleted` is recorded as a deletion.
    pub fn update<D: TrackedDocument + ?Sized>(
        &self,
        document: &D,
    ) -> Result<Option<LifecycleEvent>> {
        let entity_id = document.entity_id();
        let reported = document.status();
        let current = self.store.current_status(&entity_id);

        if current == Some(reported) {
            debug!(entity_id = %entity_id, status = %reported, "status already in sync");
            return Ok(None);
        }

        let request = TransitionRequest::new(entity_id, reported, document.modified_by())
            .kind(EventKind::StatusChange);
        let event = if reported == Status::Deleted {
            self.delete_with(request)?
        } else {
            self.transition(request)?
        };
        Ok(Some(event))
    }

    /// Move an entity to `new_status`
    ///
    /// # Errors
    /// - `InvalidTransition` if the table forbids the move
    /// - `ConcurrentModification` if another write changed the status between
    ///   the read and the append
    pub fn transition_to(
        &self,
        entity_id: &EntityId,
        new_status: Status,
        actor_id: &ActorId,
        reason: Option<&str>,
    ) -> Result<LifecycleEvent> {
        self.transition(
            TransitionRequest::new(entity_id.clone(), new_status, actor_id.clone())
                .maybe_reason(reason),
        )
    }

    /// General form of [`transition_to`](Self::transition_to)
    pub fn transition(&self, request: TransitionRequest) -> Result<LifecycleEvent> {
        let current = self.store.current_status(&request.entity_id);
        if !TransitionTable::can_transition(current, request.to) {
            warn!(
                entity_id = %request.entity_id,
                from = %doctrack_core::status_label(current),
                to = %request.to,
                actor = %request.actor_id,
                "rejected lifecycle transition"
            );
            return Err(LifecycleError::InvalidTransition {
                from: current,
                to: request.to,
            });
        }
        self.commit(request, current)
    }

    /// Move a live entity into the terminal `deleted` status
    ///
    /// Deletion bypasses the transition table, which has no edge into
    /// `deleted`. The log is kept as the audit trail.
    ///
    /// # Errors
    /// - `InvalidTransition` if the entity was never initialized
    /// - `TerminalState` if it is already deleted
    /// - `ConcurrentModification` on a lost race
    pub fn delete(
        &self,
        entity_id: &EntityId,
        actor_id: &ActorId,
        reason: Option<&str>,
    ) -> Result<LifecycleEvent> {
        self.delete_with(
            TransitionRequest::new(entity_id.clone(), Status::Deleted, actor_id.clone())
                .maybe_reason(reason),
        )
    }

    fn delete_with(&self, request: TransitionRequest) -> Result<LifecycleEvent> {
        let current = self.store.current_status(&request.entity_id);
        match current {
            None => {
                return Err(LifecycleError::InvalidTransition {
                    from: None,
                    to: Status::Deleted,
                })
            }
            Some(status) if status.is_terminal() => {
                return Err(LifecycleError::TerminalState {
                    entity_id: request.entity_id,
                })
            }
            Some(_) => {}
        }

        let event = self.commit(request, current)?;
        info!(entity_id = %event.entity_id, actor = %event.actor_id, "document deleted");
        Ok(event)
    }

    fn commit(&self, request: TransitionRequest, current: Option<Status>) -> Result<LifecycleEvent> {
        let TransitionRequest {
            entity_id,
            to,
            actor_id,
            reason,
            kind,
            source,
        } = request;

        let reason = reason.unwrap_or_else(|| self.options.reason_for(to).to_string());
        let candidate = CandidateEvent::new(
            to,
            actor_id,
            kind,
            source.unwrap_or(self.options.default_source),
        )
        .with_reason(reason);

        self.store
            .append(&entity_id, candidate, current)
            .map_err(|e| {
                if e.is_conflict() {
                    warn!(entity_id = %entity_id, error = %e, "lost lifecycle race");
                }
                e
            })
    }

    // ========================================================================
    // Queries (total: unknown entities yield empty results)
    // ========================================================================

    /// Check whether `from → to` is permitted
    pub fn can_transition(&self, from: Option<Status>, to: Status) -> bool {
        TransitionTable::can_transition(from, to)
    }

    /// Status of the entity's last event
    pub fn get_current_status(&self, entity_id: &EntityId) -> Option<Status> {
        self.store.current_status(entity_id)
    }

    /// Statuses reachable from the current one; empty for unknown entities
    pub fn get_available_transitions(&self, entity_id: &EntityId) -> Vec<Status> {
        match self.store.current_status(entity_id) {
            Some(status) => TransitionTable::allowed_targets(Some(status)).to_vec(),
            None => Vec::new(),
        }
    }

    /// The entity's events in order
    pub fn get_lifecycle_history(&self, entity_id: &EntityId) -> Vec<LifecycleEvent> {
        self.store.history(entity_id)
    }

    /// Per-entity statistics
    pub fn get_lifecycle_stats(&self, entity_id: &EntityId) -> PerEntityStats {
        self.stats().per_entity_stats(entity_id)
    }

    /// Analytics across every entity
    pub fn get_global_analytics(&self) -> GlobalAnalytics {
        self.stats().global_analytics()
    }
}

impl std::fmt::Debug for LifecycleTracker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LifecycleTracker")
            .field("options", &self.options)
            .finish_non_exhaustive()
    }
}
