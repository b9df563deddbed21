//! Errors raised while ticking a state machine.

use super::hooks::HookKind;
use crate::core::BoxError;
use thiserror::Error;

/// Errors that abort a call to [`StateMachine::update`](super::StateMachine::update).
///
/// The machine performs no recovery; the tick stops at the failing callback.
#[derive(Debug, Error)]
pub enum MachineError {
    #[error("Condition of transition '{from}' -> '{to}' failed: {source}")]
    Condition {
        from: String,
        to: String,
        source: BoxError,
    },

    #[error("The {hook} hook of state '{state}' failed: {source}")]
    Hook {
        state: String,
        hook: HookKind,
        source: BoxError,
    },
}
