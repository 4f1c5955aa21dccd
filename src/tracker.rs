//! Main entry point for doctrack.
//!
//! This module provides the `Tracker` struct, the handle a hosting service
//! constructs once and shares across request handlers.

use crate::config::TrackerConfig;
use crate::error::Result;
use doctrack_core::{
    ActorId, Clock, EntityId, EventStore, LifecycleEvent, Status, SystemClock, TransitionTable,
};
use doctrack_engine::{
    GlobalAnalytics, LifecycleTracker, PerEntityStats, TrackedDocument, TransitionRequest,
};
use doctrack_storage::ShardedEventStore;
use std::path::Path;
use std::sync::Arc;

/// The document lifecycle tracker.
///
/// Create one with [`Tracker::in_memory`] or [`Tracker::builder`]. The
/// handle is cheap to clone and every clone shares the same event store.
///
/// # Example
///
/// ```
/// use doctrack::prelude::*;
///
/// # fn main() -> doctrack::Result<()> {
/// let tracker = Tracker::in_memory();
/// let plan: EntityId = "plan-1".into();
///
/// tracker.initialize(&Document::new("plan-1", "alice"))?;
/// tracker.transition_to(&plan, Status::Review, &"alice".into(), None)?;
///
/// assert_eq!(tracker.get_current_status(&plan), Some(Status::Review));
///
/// let err = tracker
///     .transition_to(&plan, Status::Published, &"alice".into(), None)
///     .unwrap_err();
/// assert!(err.is_invalid_transition());
/// # Ok(())
/// # }
/// ```
#[derive(Clone, Debug)]
pub struct Tracker {
    inner: LifecycleTracker,
    config: Arc<TrackerConfig>,
}

impl Tracker {
    /// Create a tracker over a fresh in-memory store with default settings.
    pub fn in_memory() -> Self {
        Self::builder().build()
    }

    /// Create a tracker configured from a TOML file.
    pub fn from_config_file(path: impl AsRef<Path>) -> Result<Self> {
        Ok(Self::builder().config(TrackerConfig::from_file(path)?).build())
    }

    /// Create a builder for tracker configuration.
    ///
    /// # Example
    ///
    /// ```
    /// use doctrack::prelude::*;
    ///
    /// let tracker = Tracker::builder()
    ///     .default_source(EventSource::Api)
    ///     .reason(Status::Review, "sent to reviewers")
    ///     .build();
    ///
    /// let event = tracker.initialize(&Document::new("plan-1", "alice")).unwrap();
    /// assert_eq!(event.source, EventSource::Api);
    /// ```
    pub fn builder() -> TrackerBuilder {
        TrackerBuilder::new()
    }

    /// The active configuration.
    pub fn config(&self) -> &TrackerConfig {
        &self.config
    }

    /// The engine-level tracker.
    pub fn engine(&self) -> &LifecycleTracker {
        &self.inner
    }

    /// The shared event store.
    pub fn store(&self) -> &Arc<dyn EventStore> {
        self.inner.store()
    }

    // =========================================================================
    // Lifecycle writes
    // =========================================================================

    /// Record a document's creation.
    pub fn initialize<D: TrackedDocument + ?Sized>(&self, document: &D) -> Result<LifecycleEvent> {
        Ok(self.inner.initialize(document)?)
    }

    /// Sync the tracked status with the document's reported status.
    ///
    /// Returns `Ok(None)` when nothing changed.
    pub fn update<D: TrackedDocument + ?Sized>(&self, document: &D) -> Result<Option<LifecycleEvent>> {
        Ok(self.inner.update(document)?)
    }

    /// Move an entity to `new_status`.
    ///
    /// A conflict error means another writer moved the entity first; re-read
    /// the status before deciding to retry.
    pub fn transition_to(
        &self,
        entity_id: &EntityId,
        new_status: Status,
        actor_id: &ActorId,
        reason: Option<&str>,
    ) -> Result<LifecycleEvent> {
        Ok(self.inner.transition_to(entity_id, new_status, actor_id, reason)?)
    }

    /// General transition with explicit kind and source.
    pub fn transition(&self, request: TransitionRequest) -> Result<LifecycleEvent> {
        Ok(self.inner.transition(request)?)
    }

    /// Transition on behalf of the configured system actor.
    pub fn transition_automated(
        &self,
        entity_id: &EntityId,
        new_status: Status,
        reason: Option<&str>,
    ) -> Result<LifecycleEvent> {
        let request = TransitionRequest::new(entity_id.clone(), new_status, self.config.system_actor())
            .maybe_reason(reason)
            .automated();
        self.transition(request)
    }

    /// Move a live entity into the terminal `deleted` status.
    pub fn delete(
        &self,
        entity_id: &EntityId,
        actor_id: &ActorId,
        reason: Option<&str>,
    ) -> Result<LifecycleEvent> {
        Ok(self.inner.delete(entity_id, actor_id, reason)?)
    }

    // =========================================================================
    // Queries
    // =========================================================================

    /// Check whether `from → to` is permitted.
    pub fn can_transition(&self, from: Option<Status>, to: Status) -> bool {
        TransitionTable::can_transition(from, to)
    }

    /// Current status, `None` if the entity is untracked.
    pub fn get_current_status(&self, entity_id: &EntityId) -> Option<Status> {
        self.inner.get_current_status(entity_id)
    }

    /// Statuses reachable from the current one.
    pub fn get_available_transitions(&self, entity_id: &EntityId) -> Vec<Status> {
        self.inner.get_available_transitions(entity_id)
    }

    /// Full event history in order.
    pub fn get_lifecycle_history(&self, entity_id: &EntityId) -> Vec<LifecycleEvent> {
        self.inner.get_lifecycle_history(entity_id)
    }

    /// Per-entity statistics.
    pub fn get_lifecycle_stats(&self, entity_id: &EntityId) -> PerEntityStats {
        self.inner.get_lifecycle_stats(entity_id)
    }

    /// Analytics across every tracked entity.
    pub fn get_global_analytics(&self) -> GlobalAnalytics {
        self.inner.get_global_analytics()
    }
}

/// Builder for tracker configuration.
///
/// # Example
///
/// ```ignore
/// // Production: config file, system clock, in-memory store
/// let tracker = Tracker::builder()
///     .config_file("./doctrack.toml")?
///     .build();
///
/// // Tests: deterministic clock
/// let clock = Arc::new(ManualClock::new(0));
/// let tracker = Tracker::builder().clock(clock.clone()).build();
///
/// // Custom backing store
/// let tracker = Tracker::builder().store(Arc::new(MyStore::connect()?)).build();
/// ```
#[derive(Default)]
pub struct TrackerBuilder {
    config: TrackerConfig,
    clock: Option<Arc<dyn Clock>>,
    store: Option<Arc<dyn EventStore>>,
}

impl TrackerBuilder {
    /// Create a new builder with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the whole configuration.
    pub fn config(mut self, config: TrackerConfig) -> Self {
        self.config = config;
        self
    }

    /// Load the configuration from a TOML file.
    pub fn config_file(self, path: impl AsRef<Path>) -> Result<Self> {
        Ok(self.config(TrackerConfig::from_file(path)?))
    }

    /// Source recorded when a request names none.
    pub fn default_source(mut self, source: doctrack_core::EventSource) -> Self {
        self.config.default_source = source;
        self
    }

    /// Override the default reason for one target status.
    pub fn reason(mut self, status: Status, reason: impl Into<String>) -> Self {
        self.config.reasons.insert(status, reason.into());
        self
    }

    /// Actor recorded for automated transitions.
    pub fn system_actor(mut self, actor: impl Into<String>) -> Self {
        self.config.system_actor = actor.into();
        self
    }

    /// Timestamp source for the built-in store.
    ///
    /// Ignored when a custom store is supplied.
    pub fn clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = Some(clock);
        self
    }

    /// Use a custom event store instead of the in-memory one.
    pub fn store(mut self, store: Arc<dyn EventStore>) -> Self {
        self.store = Some(store);
        self
    }

    /// Build the tracker.
    pub fn build(self) -> Tracker {
        let TrackerBuilder { config, clock, store } = self;
        let store = match store {
            Some(store) => store,
            None => {
                let clock: Arc<dyn Clock> = match clock {
                    Some(clock) => clock,
                    None => Arc::new(SystemClock),
                };
                let sharded: Arc<dyn EventStore> = Arc::new(
                    ShardedEventStore::with_capacity_and_clock(config.initial_capacity, clock),
                );
                sharded
            }
        };
        let inner = LifecycleTracker::with_options(store, config.tracker_options());
        Tracker {
            inner,
            config: Arc::new(config),
        }
    }
}

impl std::fmt::Debug for TrackerBuilder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TrackerBuilder")
            .field("config", &self.config)
            .field("custom_clock", &self.clock.is_some())
            .field("custom_store", &self.store.is_some())
            .finish()
    }
}
