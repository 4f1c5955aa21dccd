//! Sharded in-memory event store
//!
//! DashMap keyed by EntityId, one lock per entity log.
//!
//! # Design
//!
//! - DashMap: 16-way sharded, only touched to find or create an entity's log
//! - Per-entity RwLock: appends take the write lock for compare-then-push,
//!   readers take the read lock just long enough to clone the log
//! - Different entities: Never contend beyond the shard lookup
//!
//! Shard guards are never held while waiting on an entity lock; the log's
//! `Arc` is cloned out of the map first.

use dashmap::DashMap;
use doctrack_core::{
    Clock, CandidateEvent, EntityId, EventStore, LifecycleError, LifecycleEvent, Result, Status,
    SystemClock,
};
use parking_lot::RwLock;
use rustc_hash::FxHasher;
use std::collections::BTreeSet;
use std::hash::BuildHasherDefault;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tracing::debug;

type FxBuildHasher = BuildHasherDefault<FxHasher>;

/// One entity's append-only log
#[derive(Debug, Default)]
pub struct EntityLog {
    events: RwLock<Vec<LifecycleEvent>>,
}

impl EntityLog {
    /// Create an empty log
    pub fn new() -> Self {
        Self::default()
    }

    /// Copy of the log as of now
    pub fn snapshot(&self) -> Vec<LifecycleEvent> {
        self.events.read().clone()
    }

    /// Status of the last event
    pub fn current_status(&self) -> Option<Status> {
        self.events.read().last().map(|e| e.to_status)
    }

    /// Number of events
    pub fn len(&self) -> usize {
        self.events.read().len()
    }

    /// Check if the log has no events
    pub fn is_empty(&self) -> bool {
        self.events.read().is_empty()
    }
}

/// Sharded event store - DashMap by EntityId, locked Vec within
///
/// # Thread Safety
///
/// All operations are thread-safe:
/// - append(): Only locks the target entity's log
/// - history()/current_status(): Read lock on one entity's log
/// - Different entities never contend
///
/// # Example
///
/// ```ignore
/// use doctrack_storage::ShardedEventStore;
/// use std::sync::Arc;
///
/// let store = Arc::new(ShardedEventStore::new());
/// let events = store.history(&"plan-1".into());
/// ```
pub struct ShardedEventStore {
    /// Per-entity logs
    logs: DashMap<EntityId, Arc<EntityLog>, FxBuildHasher>,
    /// Timestamp source
    clock: Arc<dyn Clock>,
    /// Total successful appends across all entities
    appended: AtomicU64,
}

impl ShardedEventStore {
    /// Create a store using the system clock
    pub fn new() -> Self {
        Self::with_clock(Arc::new(SystemClock))
    }

    /// Create a store with a custom clock
    pub fn with_clock(clock: Arc<dyn Clock>) -> Self {
        Self::with_capacity_and_clock(0, clock)
    }

    /// Create with expected number of entities
    pub fn with_capacity(num_entities: usize) -> Self {
        Self::with_capacity_and_clock(num_entities, Arc::new(SystemClock))
    }

    /// Create with expected number of entities and a custom clock
    pub fn with_capacity_and_clock(num_entities: usize, clock: Arc<dyn Clock>) -> Self {
        Self {
            logs: DashMap::with_capacity_and_hasher(num_entities, FxBuildHasher::default()),
            clock,
            appended: AtomicU64::new(0),
        }
    }

    /// Total events appended across all entities
    pub fn total_events(&self) -> u64 {
        self.appended.load(Ordering::Acquire)
    }

    /// Look up an entity's log without holding the shard guard
    #[inline]
    fn log(&self, entity_id: &EntityId) -> Option<Arc<EntityLog>> {
        self.logs.get(entity_id).map(|entry| Arc::clone(entry.value()))
    }

    /// Find or create an entity's log
    fn log_or_create(&self, entity_id: &EntityId) -> Arc<EntityLog> {
        if let Some(log) = self.log(entity_id) {
            return log;
        }
        let entry = self
            .logs
            .entry(entity_id.clone())
            .or_insert_with(|| Arc::new(EntityLog::new()));
        Arc::clone(entry.value())
    }
}

impl EventStore for ShardedEventStore {
    fn append(
        &self,
        entity_id: &EntityId,
        candidate: CandidateEvent,
        expected_current: Option<Status>,
    ) -> Result<LifecycleEvent> {
        // Only a creation may allocate a log
        let log = match expected_current {
            None => self.log_or_create(entity_id),
            Some(_) => {
                self.log(entity_id)
                    .ok_or_else(|| LifecycleError::ConcurrentModification {
                        entity_id: entity_id.clone(),
                        expected: expected_current,
                        actual: None,
                    })?
            }
        };
        let mut events = log.events.write();

        let last = events.last();
        let actual = last.map(|e| e.to_status);
        if actual != expected_current {
            return Err(LifecycleError::ConcurrentModification {
                entity_id: entity_id.clone(),
                expected: expected_current,
                actual,
            });
        }
        if actual.is_some_and(|s| s.is_terminal()) {
            return Err(LifecycleError::TerminalState {
                entity_id: entity_id.clone(),
            });
        }

        // Clamp so a clock stepping backwards cannot reorder the log
        let floor = last.map_or(i64::MIN, |e| e.timestamp);
        let timestamp = self.clock.now_millis().max(floor);
        let sequence = events.len() as u64;

        let event =
            LifecycleEvent::from_candidate(candidate, entity_id.clone(), sequence, actual, timestamp);
        events.push(event.clone());
        self.appended.fetch_add(1, Ordering::AcqRel);

        debug!(
            entity_id = %entity_id,
            sequence,
            transition = %event.transition_label(),
            "appended lifecycle event"
        );
        Ok(event)
    }

    fn history(&self, entity_id: &EntityId) -> Vec<LifecycleEvent> {
        self.log(entity_id)
            .map(|log| log.snapshot())
            .unwrap_or_default()
    }

    fn current_status(&self, entity_id: &EntityId) -> Option<Status> {
        self.log(entity_id).and_then(|log| log.current_status())
    }

    fn all_entity_ids(&self) -> BTreeSet<EntityId> {
        // A creation's log is in the map before its first event is pushed
        self.logs
            .iter()
            .filter(|entry| !entry.value().is_empty())
            .map(|entry| entry.key().clone())
            .collect()
    }

    fn len(&self, entity_id: &EntityId) -> usize {
        self.log(entity_id).map_or(0, |log| log.len())
    }
}

impl Default for ShardedEventStore {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for ShardedEventStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ShardedEventStore")
            .field("entity_count", &self.logs.len())
            .field("total_events", &self.total_events())
            .finish()
    }
}
