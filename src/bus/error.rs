//! Event bus errors.

use std::fmt;
use thiserror::Error;

/// Registry operation that detected a problem.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Operation {
    AddListener,
    RemoveListener,
    Broadcast,
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let verb = match self {
            Self::AddListener => "add listener",
            Self::RemoveListener => "remove listener",
            Self::Broadcast => "broadcast",
        };
        f.write_str(verb)
    }
}

/// Errors returned by [`EventBus`](super::EventBus) operations.
///
/// Both variants indicate a programming mistake in the caller rather than a
/// runtime condition; the registry is left unchanged.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum BusError {
    #[error(
        "Attempting to {operation} with inconsistent signature for event type '{channel}'. \
         Current listeners have type {expected} and the caller uses type {found}"
    )]
    SignatureMismatch {
        channel: String,
        operation: Operation,
        expected: &'static str,
        found: &'static str,
    },

    #[error("Broadcasting message '{channel}' but no listener found")]
    MissingListener { channel: String },
}
