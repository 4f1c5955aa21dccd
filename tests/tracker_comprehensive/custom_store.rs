//! Custom Store Tests
//!
//! The tracker runs against any `EventStore`, not just the built-in one.

use crate::*;
use doctrack::ShardedEventStore;
use parking_lot::Mutex;
use std::collections::{BTreeMap, BTreeSet};
use std::sync::atomic::{AtomicUsize, Ordering};

/// Single-lock store with a fixed timestamp per append index
#[derive(Default)]
struct LockedStore {
    logs: Mutex<BTreeMap<EntityId, Vec<LifecycleEvent>>>,
}

impl EventStore for LockedStore {
    fn append(
        &self,
        entity_id: &EntityId,
        candidate: CandidateEvent,
        expected_current: Option<Status>,
    ) -> std::result::Result<LifecycleEvent, LifecycleError> {
        let mut logs = self.logs.lock();
        let log = logs.entry(entity_id.clone()).or_default();
        let actual = log.last().map(|e| e.to_status);
        if actual != expected_current {
            return Err(LifecycleError::ConcurrentModification {
                entity_id: entity_id.clone(),
                expected: expected_current,
                actual,
            });
        }
        if actual.map_or(false, |s| s.is_terminal()) {
            return Err(LifecycleError::TerminalState {
                entity_id: entity_id.clone(),
            });
        }
        let sequence = log.len() as u64;
        let event = LifecycleEvent::from_candidate(
            candidate,
            entity_id.clone(),
            sequence,
            actual,
            sequence as i64 * 1_000,
        );
        log.push(event.clone());
        Ok(event)
    }

    fn history(&self, entity_id: &EntityId) -> Vec<LifecycleEvent> {
        self.logs.lock().get(entity_id).cloned().unwrap_or_default()
    }

    fn current_status(&self, entity_id: &EntityId) -> Option<Status> {
        self.logs
            .lock()
            .get(entity_id)
            .and_then(|log| log.last())
            .map(|e| e.to_status)
    }

    fn all_entity_ids(&self) -> BTreeSet<EntityId> {
        self.logs
            .lock()
            .iter()
            .filter(|(_, log)| !log.is_empty())
            .map(|(id, _)| id.clone())
            .collect()
    }
}

/// Counts appends before delegating
struct CountingStore {
    inner: ShardedEventStore,
    appends: AtomicUsize,
}

impl EventStore for CountingStore {
    fn append(
        &self,
        entity_id: &EntityId,
        candidate: CandidateEvent,
        expected_current: Option<Status>,
    ) -> std::result::Result<LifecycleEvent, LifecycleError> {
        self.appends.fetch_add(1, Ordering::SeqCst);
        self.inner.append(entity_id, candidate, expected_current)
    }

    fn history(&self, entity_id: &EntityId) -> Vec<LifecycleEvent> {
        self.inner.history(entity_id)
    }

    fn current_status(&self, entity_id: &EntityId) -> Option<Status> {
        self.inner.current_status(entity_id)
    }

    fn all_entity_ids(&self) -> BTreeSet<EntityId> {
        self.inner.all_entity_ids()
    }
}

#[test]
fn tracker_over_locked_store() {
    let store = Arc::new(LockedStore::default());
    let tracker = Tracker::builder().store(store.clone()).build();

    tracker.initialize(&Document::new("E1", "u1")).unwrap();
    tracker
        .transition_to(&eid("E1"), Status::Review, &actor("u1"), None)
        .unwrap();
    assert!(tracker
        .transition_to(&eid("E1"), Status::Published, &actor("u1"), None)
        .unwrap_err()
        .is_invalid_transition());

    let stats = tracker.get_lifecycle_stats(&eid("E1"));
    assert_eq!(stats.event_count, 2);
    assert_eq!(stats.total_lifecycle_time, 1_000);
    assert_eq!(store.history(&eid("E1")).len(), 2);
    assert_eq!(store.entity_count(), 1);
}

#[test]
fn rejected_requests_never_reach_the_store() {
    let store = Arc::new(CountingStore {
        inner: ShardedEventStore::new(),
        appends: AtomicUsize::new(0),
    });
    let tracker = Tracker::builder().store(store.clone()).build();

    tracker.initialize(&Document::new("E1", "u1")).unwrap();
    let _ = tracker.transition_to(&eid("E1"), Status::Published, &actor("u1"), None);
    let _ = tracker.transition_to(&eid("ghost"), Status::Review, &actor("u1"), None);
    assert!(tracker.update(&Document::new("E1", "u1")).unwrap().is_none());

    assert_eq!(store.appends.load(Ordering::SeqCst), 1);
}

#[test]
fn stale_expectation_rejected_by_custom_store() {
    let store = LockedStore::default();
    store
        .append(
            &eid("E1"),
            CandidateEvent::new(Status::Draft, actor("u1"), EventKind::Creation, EventSource::User),
            None,
        )
        .unwrap();

    let err = store
        .append(
            &eid("E1"),
            CandidateEvent::new(Status::Review, actor("u1"), EventKind::StatusTransition, EventSource::User),
            None,
        )
        .unwrap_err();
    assert!(err.is_conflict());
    assert_eq!(store.history(&eid("E1")).len(), 1);
}
