//! Caller-facing inputs to the tracker
//!
//! [`TrackedDocument`] is how the hosting service hands a document to
//! `initialize` and `update`; [`TransitionRequest`] is the general form of an
//! explicit transition.

use doctrack_core::{ActorId, EntityId, EventKind, EventSource, Status};

/// A document whose lifecycle is tracked
///
/// The tracker only reads identity, status and authorship. Content stays
/// with the hosting service.
pub trait TrackedDocument {
    /// Identifier of the document
    fn entity_id(&self) -> EntityId;

    /// Status as reported by the hosting service
    fn status(&self) -> Status;

    /// Creator; recorded as the actor of the creation event
    fn owner(&self) -> ActorId;

    /// Last editor; recorded as the actor of synced status changes
    fn modified_by(&self) -> ActorId {
        self.owner()
    }
}

/// Plain document record for callers without their own model type
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    /// Identifier
    pub id: EntityId,
    /// Reported status
    pub status: Status,
    /// Creator
    pub owner: ActorId,
    /// Last editor (falls back to the owner)
    pub modified_by: Option<ActorId>,
}

impl Document {
    /// A freshly created draft
    pub fn new(id: impl Into<EntityId>, owner: impl Into<ActorId>) -> Self {
        Self {
            id: id.into(),
            status: Status::Draft,
            owner: owner.into(),
            modified_by: None,
        }
    }

    /// Set the reported status
    pub fn with_status(mut self, status: Status) -> Self {
        self.status = status;
        self
    }

    /// Set the last editor
    pub fn edited_by(mut self, actor: impl Into<ActorId>) -> Self {
        self.modified_by = Some(actor.into());
        self
    }
}

impl TrackedDocument for Document {
    fn entity_id(&self) -> EntityId {
        self.id.clone()
    }

    fn status(&self) -> Status {
        self.status
    }

    fn owner(&self) -> ActorId {
        self.owner.clone()
    }

    fn modified_by(&self) -> ActorId {
        self.modified_by.clone().unwrap_or_else(|| self.owner.clone())
    }
}

/// An explicit transition request
///
/// # Example
///
/// ```ignore
/// let req = TransitionRequest::new("plan-1", Status::Review, "alice")
///     .reason("ready for feedback")
///     .source(EventSource::Api);
/// tracker.transition(req)?;
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransitionRequest {
    /// Entity to move
    pub entity_id: EntityId,
    /// Target status
    pub to: Status,
    /// Who is asking
    pub actor_id: ActorId,
    /// Explanation; the configured default for `to` when absent
    pub reason: Option<String>,
    /// Recorded event kind
    pub kind: EventKind,
    /// Recorded source; the configured default when absent
    pub source: Option<EventSource>,
}

impl TransitionRequest {
    /// Explicit user transition with default reason and source
    pub fn new(entity_id: impl Into<EntityId>, to: Status, actor_id: impl Into<ActorId>) -> Self {
        Self {
            entity_id: entity_id.into(),
            to,
            actor_id: actor_id.into(),
            reason: None,
            kind: EventKind::StatusTransition,
            source: None,
        }
    }

    /// Set the reason
    pub fn reason(mut self, reason: impl Into<String>) -> Self {
        self.reason = Some(reason.into());
        self
    }

    /// Set the reason if one is given
    pub fn maybe_reason(mut self, reason: Option<&str>) -> Self {
        self.reason = reason.map(str::to_string);
        self
    }

    /// Set the event kind
    pub fn kind(mut self, kind: EventKind) -> Self {
        self.kind = kind;
        self
    }

    /// Set the source
    pub fn source(mut self, source: EventSource) -> Self {
        self.source = Some(source);
        self
    }

    /// Mark as triggered by an automated process
    pub fn automated(self) -> Self {
        self.kind(EventKind::Automated).source(EventSource::System)
    }
}
