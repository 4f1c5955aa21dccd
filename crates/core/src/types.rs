//! Identifier types for the lifecycle tracker
//!
//! This module defines the identifiers used throughout the system:
//! - [`EntityId`]: The tracked document
//! - [`ActorId`]: The user or process causing a transition
//! - [`EventId`]: Unique identifier of one lifecycle event

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Identifier of a tracked document
///
/// EntityIds are opaque strings supplied by the hosting service. They order
/// lexicographically, which is the iteration order used by global analytics.
///
/// # Examples
///
/// ```
/// use doctrack_core::types::EntityId;
///
/// let id = EntityId::new("plan-42");
/// assert_eq!(id.as_str(), "plan-42");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EntityId(String);

impl EntityId {
    /// Create an EntityId from any string-like value
    pub fn new(id: impl Into<String>) -> Self {
        EntityId(id.into())
    }

    /// Borrow the raw identifier
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for EntityId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for EntityId {
    fn from(s: &str) -> Self {
        EntityId::new(s)
    }
}

impl From<String> for EntityId {
    fn from(s: String) -> Self {
        EntityId(s)
    }
}

/// Identifier of the user or process causing a transition
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ActorId(String);

impl ActorId {
    /// Create an ActorId from any string-like value
    pub fn new(id: impl Into<String>) -> Self {
        ActorId(id.into())
    }

    /// Borrow the raw identifier
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ActorId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ActorId {
    fn from(s: &str) -> Self {
        ActorId::new(s)
    }
}

impl From<String> for ActorId {
    fn from(s: String) -> Self {
        ActorId(s)
    }
}

/// Unique identifier of a lifecycle event
///
/// Assigned by the event store at append time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EventId(Uuid);

impl EventId {
    /// Create a new random EventId using UUID v4
    ///
    /// # Examples
    ///
    /// ```
    /// use doctrack_core::types::EventId;
    ///
    /// let id1 = EventId::new();
    /// let id2 = EventId::new();
    /// assert_ne!(id1, id2);
    /// ```
    pub fn new() -> Self {
        EventId(Uuid::new_v4())
    }
}

impl Default for EventId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for EventId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
