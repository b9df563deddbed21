//! Core state machine types.
//!
//! This module contains the building blocks shared by the machine and the
//! builders:
//! - State identities via the `State` trait
//! - Guard conditions for transition control
//! - Bounded history of fired transitions

mod guard;
mod history;
mod state;

pub use guard::Guard;
pub use history::{StateHistory, StateTransition, DEFAULT_HISTORY_LIMIT};
pub use state::State;

/// Boxed error returned by user callbacks (guards, hooks, handlers).
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;
