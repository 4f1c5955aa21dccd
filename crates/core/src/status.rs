//! Document status vocabulary
//!
//! ## The Six Statuses
//!
//! | Status | Meaning | Terminal |
//! |--------|---------|----------|
//! | Draft | Being written | no |
//! | Review | Submitted for review | no |
//! | Approved | Accepted by reviewers | no |
//! | Published | Visible to readers | no |
//! | Archived | Withdrawn, may be revived as a draft | no |
//! | Deleted | Gone; the log stays as an audit trail | yes |
//!
//! The "no status yet" sentinel is expressed as `Option<Status>::None`
//! everywhere a previous status is expected.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Lifecycle status of a tracked document
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    /// Being written
    Draft,
    /// Submitted for review
    Review,
    /// Accepted by reviewers
    Approved,
    /// Visible to readers
    Published,
    /// Withdrawn
    Archived,
    /// Terminal; no further events may be recorded
    Deleted,
}

impl Status {
    /// All statuses (for iteration)
    pub const ALL: [Status; 6] = [
        Status::Draft,
        Status::Review,
        Status::Approved,
        Status::Published,
        Status::Archived,
        Status::Deleted,
    ];

    /// Lowercase identifier
    pub const fn as_str(&self) -> &'static str {
        match self {
            Status::Draft => "draft",
            Status::Review => "review",
            Status::Approved => "approved",
            Status::Published => "published",
            Status::Archived => "archived",
            Status::Deleted => "deleted",
        }
    }

    /// Reason recorded when a transition into this status has none
    pub const fn default_reason(&self) -> &'static str {
        match self {
            Status::Draft => "Document created",
            Status::Review => "submitted for review",
            Status::Approved => "approved",
            Status::Published => "published",
            Status::Archived => "archived",
            Status::Deleted => "deleted",
        }
    }

    /// Check if no further events may follow this status
    pub const fn is_terminal(&self) -> bool {
        matches!(self, Status::Deleted)
    }

    /// Parse from lowercase identifier
    pub fn from_id(id: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|s| s.as_str() == id)
    }
}

impl std::fmt::Display for Status {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a string names no status
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown status: {0}")]
pub struct ParseStatusError(pub String);

impl FromStr for Status {
    type Err = ParseStatusError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Status::from_id(s).ok_or_else(|| ParseStatusError(s.to_string()))
    }
}

/// Render an optional status, using `none` for the sentinel
pub fn status_label(status: Option<Status>) -> &'static str {
    status.map_or("none", |s| s.as_str())
}
