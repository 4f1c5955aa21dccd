//! Core types for the document lifecycle tracker
//!
//! This crate defines the vocabulary shared by every other crate:
//! - [`Status`] and the fixed [`TransitionTable`]
//! - [`LifecycleEvent`] and its identifiers
//! - The [`EventStore`] trait and [`Clock`] abstraction
//! - [`LifecycleError`]

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod clock;
pub mod error;
pub mod event;
pub mod status;
pub mod traits;
pub mod transition;
pub mod types;

pub use clock::{Clock, ManualClock, SystemClock};
pub use error::{LifecycleError, Result};
pub use event::{CandidateEvent, EventKind, EventSource, LifecycleEvent};
pub use status::{status_label, ParseStatusError, Status};
pub use traits::EventStore;
pub use transition::TransitionTable;
pub use types::{ActorId, EntityId, EventId};
