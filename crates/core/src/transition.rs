//! Status transition rules
//!
//! Valid transitions:
//! - none → Draft
//! - Draft → Review, Archived
//! - Review → Approved, Draft, Archived
//! - Approved → Published, Review, Archived
//! - Published → Archived
//! - Archived → Draft
//! - Deleted → (terminal)
//!
//! The table is fixed at compile time. Nothing transitions into Deleted;
//! deletion is a separate tracker operation.

use crate::status::Status;

/// Static lookup of permitted status transitions
#[derive(Debug, Clone, Copy, Default)]
pub struct TransitionTable;

impl TransitionTable {
    /// Statuses reachable in one step from `from` (`None` = not yet tracked)
    pub const fn allowed_targets(from: Option<Status>) -> &'static [Status] {
        match from {
            None => &[Status::Draft],
            Some(Status::Draft) => &[Status::Review, Status::Archived],
            Some(Status::Review) => &[Status::Approved, Status::Draft, Status::Archived],
            Some(Status::Approved) => &[Status::Published, Status::Review, Status::Archived],
            Some(Status::Published) => &[Status::Archived],
            Some(Status::Archived) => &[Status::Draft],
            Some(Status::Deleted) => &[],
        }
    }

    /// Check whether `from → to` is a permitted edge
    pub fn can_transition(from: Option<Status>, to: Status) -> bool {
        Self::allowed_targets(from).contains(&to)
    }

    /// Every permitted edge, in table order
    pub fn edges() -> Vec<(Option<Status>, Status)> {
        std::iter::once(None)
            .chain(Status::ALL.iter().copied().map(Some))
            .flat_map(|from| {
                Self::allowed_targets(from)
                    .iter()
                    .map(move |&to| (from, to))
            })
            .collect()
    }
}
