//! State machine configuration.

use crate::core::DEFAULT_HISTORY_LIMIT;
use serde::{Deserialize, Serialize};

/// Tunables for a [`StateMachine`](super::StateMachine).
///
/// Deserializable so an application can load it alongside its own settings:
///
/// ```rust
/// use tickbus::machine::MachineConfig;
///
/// let config: MachineConfig = serde_json::from_str(r#"{ "history_limit": 8 }"#).unwrap();
/// assert_eq!(config.history_limit, 8);
/// assert!(config.warn_on_ambiguous);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MachineConfig {
    /// Log a warning when more than one transition matches in a tick
    pub warn_on_ambiguous: bool,

    /// Number of fired transitions retained in history; 0 disables it
    pub history_limit: usize,
}

impl Default for MachineConfig {
    fn default() -> Self {
        Self {
            warn_on_ambiguous: true,
            history_limit: DEFAULT_HISTORY_LIMIT,
        }
    }
}
