//! Lifecycle event types
//!
//! These types define the structure of events in an entity's append-only
//! lifecycle log.

use crate::status::{status_label, Status};
use crate::types::{ActorId, EntityId, EventId};
use serde::{Deserialize, Serialize};

/// How a transition came about
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventKind {
    /// First event of an entity (none → draft)
    Creation,
    /// Status synced from a change made outside an explicit transition
    StatusChange,
    /// Explicit transition requested by a caller
    StatusTransition,
    /// Transition triggered by an automated process
    Automated,
}

impl EventKind {
    /// Snake-case identifier
    pub const fn as_str(&self) -> &'static str {
        match self {
            EventKind::Creation => "creation",
            EventKind::StatusChange => "status_change",
            EventKind::StatusTransition => "status_transition",
            EventKind::Automated => "automated",
        }
    }
}

impl std::fmt::Display for EventKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Which surface of the hosting service caused the transition
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EventSource {
    /// Interactive user action
    #[default]
    User,
    /// Internal system process
    System,
    /// External API client
    Api,
}

impl EventSource {
    /// Lowercase identifier
    pub const fn as_str(&self) -> &'static str {
        match self {
            EventSource::User => "user",
            EventSource::System => "system",
            EventSource::Api => "api",
        }
    }
}

impl std::fmt::Display for EventSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An event as proposed by the tracker, before the store accepts it
///
/// The store fills in the id, sequence, previous status and timestamp.
#[derive(Debug, Clone, PartialEq)]
pub struct CandidateEvent {
    /// Status the entity moves into
    pub to_status: Status,
    /// Who is causing the transition
    pub actor_id: ActorId,
    /// Human-readable explanation
    pub reason: String,
    /// How the transition came about
    pub kind: EventKind,
    /// Which surface caused it
    pub source: EventSource,
}

impl CandidateEvent {
    /// Create a candidate with the default reason for `to_status`
    pub fn new(to_status: Status, actor_id: ActorId, kind: EventKind, source: EventSource) -> Self {
        Self {
            to_status,
            actor_id,
            reason: to_status.default_reason().to_string(),
            kind,
            source,
        }
    }

    /// Replace the reason
    pub fn with_reason(mut self, reason: impl Into<String>) -> Self {
        self.reason = reason.into();
        self
    }
}

/// An immutable record of one status transition
///
/// Events are never modified after the store accepts them. Within one
/// entity, `sequence` is contiguous from 0 and `timestamp` never decreases.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LifecycleEvent {
    /// Unique identifier (assigned at append)
    pub id: EventId,
    /// The tracked document
    pub entity_id: EntityId,
    /// Position in the entity's log, starting at 0
    pub sequence: u64,
    /// Previous status; `None` only for the first event
    pub from_status: Option<Status>,
    /// Status this event transitions into
    pub to_status: Status,
    /// Who caused the transition
    pub actor_id: ActorId,
    /// Milliseconds since the Unix epoch
    pub timestamp: i64,
    /// Human-readable explanation
    pub reason: String,
    /// How the transition came about
    pub kind: EventKind,
    /// Which surface caused it
    pub source: EventSource,
}

impl LifecycleEvent {
    /// Assemble a stored event from a candidate
    pub fn from_candidate(
        candidate: CandidateEvent,
        entity_id: EntityId,
        sequence: u64,
        from_status: Option<Status>,
        timestamp: i64,
    ) -> Self {
        Self {
            id: EventId::new(),
            entity_id,
            sequence,
            from_status,
            to_status: candidate.to_status,
            actor_id: candidate.actor_id,
            timestamp,
            reason: candidate.reason,
            kind: candidate.kind,
            source: candidate.source,
        }
    }

    /// Transition label in the form `from->to` (`none` for the sentinel)
    pub fn transition_label(&self) -> String {
        format!("{}->{}", status_label(self.from_status), self.to_status)
    }

    /// Check if this is the entity's creation event
    pub fn is_first(&self) -> bool {
        self.from_status.is_none()
    }
}
