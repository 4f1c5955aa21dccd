//! Statistics derived from lifecycle logs
//!
//! Everything here is a pure function of events read from the store.
//!
//! ## Determinism
//!
//! "Most common" values break ties in favour of the key seen first. Global
//! analytics walk entities in ascending `EntityId` order and each entity's
//! events in log order, so results are reproducible.
//!
//! ## Average time in status
//!
//! `average_time_in_status` divides the total lifecycle time by the number of
//! history entries, including the open-ended final entry whose duration is 0.

use doctrack_core::{ActorId, EntityId, EventStore, LifecycleEvent, Status};
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use std::hash::Hash;
use std::sync::Arc;

/// Counter that remembers first-seen order
///
/// `leader()` returns the highest count; on ties, the earliest key wins.
#[derive(Debug, Clone)]
pub(crate) struct Tally<K> {
    counts: Vec<(K, u64)>,
    index: FxHashMap<K, usize>,
}

impl<K: Clone + Eq + Hash> Tally<K> {
    pub(crate) fn new() -> Self {
        Self {
            counts: Vec::new(),
            index: FxHashMap::default(),
        }
    }

    pub(crate) fn add(&mut self, key: K) {
        match self.index.get(&key) {
            Some(&slot) => self.counts[slot].1 += 1,
            None => {
                self.index.insert(key.clone(), self.counts.len());
                self.counts.push((key, 1));
            }
        }
    }

    pub(crate) fn leader(&self) -> Option<&K> {
        let mut best: Option<&(K, u64)> = None;
        for entry in &self.counts {
            // strict: an equal count never displaces an earlier key
            if best.map_or(true, |b| entry.1 > b.1) {
                best = Some(entry);
            }
        }
        best.map(|(key, _)| key)
    }

    pub(crate) fn into_counts(self) -> Vec<(K, u64)> {
        self.counts
    }
}

/// One entry of an entity's status history
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusDwell {
    /// Status entered
    pub status: Status,
    /// When it was entered (milliseconds since epoch)
    pub timestamp: i64,
    /// Milliseconds until the next event; 0 for the current status
    pub duration: i64,
}

/// Per-entity lifecycle statistics
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PerEntityStats {
    /// The entity
    pub entity_id: EntityId,
    /// Status of the last event
    pub current_status: Option<Status>,
    /// Number of events
    pub event_count: usize,
    /// Every status entered, in order
    pub status_history: Vec<StatusDwell>,
    /// Total time divided by the number of history entries (milliseconds)
    pub average_time_in_status: f64,
    /// Last timestamp minus first timestamp (milliseconds)
    pub total_lifecycle_time: i64,
    /// Actor with the most events
    pub most_active_user: Option<ActorId>,
}

impl PerEntityStats {
    /// Zeroed stats for an entity with no events
    pub fn empty(entity_id: EntityId) -> Self {
        Self {
            entity_id,
            current_status: None,
            event_count: 0,
            status_history: Vec::new(),
            average_time_in_status: 0.0,
            total_lifecycle_time: 0,
            most_active_user: None,
        }
    }

    /// Compute stats from an entity's log
    pub fn from_events(entity_id: EntityId, events: &[LifecycleEvent]) -> Self {
        if events.is_empty() {
            return Self::empty(entity_id);
        }

        let status_history: Vec<StatusDwell> = events
            .iter()
            .enumerate()
            .map(|(i, event)| StatusDwell {
                status: event.to_status,
                timestamp: event.timestamp,
                duration: events
                    .get(i + 1)
                    .map_or(0, |next| next.timestamp - event.timestamp),
            })
            .collect();

        let total_lifecycle_time: i64 = status_history.iter().map(|d| d.duration).sum();
        let average_time_in_status = if status_history.len() > 1 {
            total_lifecycle_time as f64 / status_history.len() as f64
        } else {
            0.0
        };

        let mut actors = Tally::new();
        for event in events {
            actors.add(event.actor_id.clone());
        }

        Self {
            entity_id,
            current_status: events.last().map(|e| e.to_status),
            event_count: events.len(),
            status_history,
            average_time_in_status,
            total_lifecycle_time,
            most_active_user: actors.leader().cloned(),
        }
    }
}

/// Analytics across every tracked entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GlobalAnalytics {
    /// Entities with at least one event
    pub total_documents: usize,
    /// Events across all entities
    pub total_events: usize,
    /// Events per `to_status`, in first-seen order
    pub status_distribution: Vec<(Status, u64)>,
    /// Key of `status_distribution` with the highest count
    pub most_common_status: Option<Status>,
    /// Events per `from->to` label, in first-seen order
    pub transition_distribution: Vec<(String, u64)>,
    /// Key of `transition_distribution` with the highest count
    pub most_common_transition: Option<String>,
    /// Actor with the most events overall
    pub most_active_user: Option<ActorId>,
    /// Entities per current status, in first-seen order
    pub current_status_distribution: Vec<(Status, u64)>,
    /// `total_events / total_documents`, 0 without documents
    pub average_events_per_document: f64,
}

impl GlobalAnalytics {
    /// Aggregate over entity logs in the given order
    pub fn from_logs<'a, I>(logs: I) -> Self
    where
        I: IntoIterator<Item = &'a [LifecycleEvent]>,
    {
        let mut statuses = Tally::new();
        let mut transitions = Tally::new();
        let mut actors = Tally::new();
        let mut current = Tally::new();
        let mut total_documents = 0usize;
        let mut total_events = 0usize;

        for events in logs {
            let Some(last) = events.last() else {
                continue;
            };
            total_documents += 1;
            total_events += events.len();
            current.add(last.to_status);
            for event in events {
                statuses.add(event.to_status);
                transitions.add(event.transition_label());
                actors.add(event.actor_id.clone());
            }
        }

        let average_events_per_document = if total_documents == 0 {
            0.0
        } else {
            total_events as f64 / total_documents as f64
        };

        Self {
            total_documents,
            total_events,
            most_common_status: statuses.leader().copied(),
            status_distribution: statuses.into_counts(),
            most_common_transition: transitions.leader().cloned(),
            transition_distribution: transitions.into_counts(),
            most_active_user: actors.leader().cloned(),
            current_status_distribution: current.into_counts(),
            average_events_per_document,
        }
    }

    /// Events recorded into `status`
    pub fn count_for(&self, status: Status) -> u64 {
        self.status_distribution
            .iter()
            .find(|(s, _)| *s == status)
            .map_or(0, |(_, n)| *n)
    }
}

/// Read-only statistics over an event store
#[derive(Clone)]
pub struct StatsAggregator {
    store: Arc<dyn EventStore>,
}

impl StatsAggregator {
    /// Create an aggregator reading from `store`
    pub fn new(store: Arc<dyn EventStore>) -> Self {
        Self { store }
    }

    /// Stats for one entity; zeroed if it is unknown
    pub fn per_entity_stats(&self, entity_id: &EntityId) -> PerEntityStats {
        let events = self.store.history(entity_id);
        PerEntityStats::from_events(entity_id.clone(), &events)
    }

    /// Analytics across all entities, ascending by entity id
    pub fn global_analytics(&self) -> GlobalAnalytics {
        let logs: Vec<Vec<LifecycleEvent>> = self
            .store
            .all_entity_ids()
            .iter()
            .map(|id| self.store.history(id))
            .collect();
        GlobalAnalytics::from_logs(logs.iter().map(Vec::as_slice))
    }
}

impl std::fmt::Debug for StatsAggregator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StatsAggregator").finish_non_exhaustive()
    }
}
