//! Event bus configuration.

use serde::{Deserialize, Serialize};

/// Policy for broadcasting on a channel that has no registered handlers.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BroadcastMode {
    /// Fail with [`BusError::MissingListener`](super::BusError::MissingListener)
    #[default]
    RequireListener,
    /// Return without doing anything
    DontRequireListener,
}

/// What happens to a handler whose invocations keep failing.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FailurePolicy {
    /// Failing handlers stay registered.
    #[default]
    Keep,
    /// Unregister a handler after this many consecutive failed invocations.
    /// Values below 1 behave like 1.
    RemoveAfter(u32),
}

impl FailurePolicy {
    /// Consecutive failures after which a handler is dropped, if any.
    pub fn threshold(&self) -> Option<u32> {
        match self {
            Self::Keep => None,
            Self::RemoveAfter(limit) => Some((*limit).max(1)),
        }
    }
}

/// Tunables for an [`EventBus`](super::EventBus).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BusConfig {
    /// Mode used by broadcasts that do not name one
    pub default_mode: BroadcastMode,

    /// Handling of repeatedly failing handlers
    pub failure_policy: FailurePolicy,
}
