//! Tracker configuration.
//!
//! Configuration is plain TOML:
//!
//! ```toml
//! default_source = "api"
//! initial_capacity = 1024
//! system_actor = "scheduler"
//!
//! [reasons]
//! review = "sent to reviewers"
//! ```
//!
//! Every field is optional.

use crate::error::{Error, Result};
use doctrack_core::{ActorId, EventSource, Status};
use doctrack_engine::TrackerOptions;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

/// Settings for a [`Tracker`](crate::Tracker).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TrackerConfig {
    /// Source recorded when a request names none.
    pub default_source: EventSource,
    /// Expected number of entities, used to presize the store.
    pub initial_capacity: usize,
    /// Actor recorded for automated transitions.
    pub system_actor: String,
    /// Reason overrides keyed by target status.
    pub reasons: BTreeMap<Status, String>,
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self {
            default_source: EventSource::User,
            initial_capacity: 0,
            system_actor: "system".to_string(),
            reasons: BTreeMap::new(),
        }
    }
}

impl TrackerConfig {
    /// Parse configuration from a TOML string.
    pub fn from_toml_str(s: &str) -> Result<Self> {
        let config: TrackerConfig = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    /// Read configuration from a TOML file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let text = std::fs::read_to_string(path.as_ref())?;
        Self::from_toml_str(&text)
    }

    /// Reject values that parse but make no sense.
    pub fn validate(&self) -> Result<()> {
        if self.system_actor.trim().is_empty() {
            return Err(Error::Config("system_actor must not be empty".into()));
        }
        if let Some((status, _)) = self.reasons.iter().find(|(_, r)| r.trim().is_empty()) {
            return Err(Error::Config(format!("empty reason for status {}", status)));
        }
        Ok(())
    }

    /// Actor recorded for automated transitions.
    pub fn system_actor(&self) -> ActorId {
        ActorId::new(self.system_actor.clone())
    }

    pub(crate) fn tracker_options(&self) -> TrackerOptions {
        TrackerOptions {
            default_source: self.default_source,
            reasons: self
                .reasons
                .iter()
                .map(|(status, reason)| (*status, reason.clone()))
                .collect(),
        }
    }
}
