//! The tick-driven state machine.
//!
//! # Key Concepts
//!
//! - **Transitions**: guarded edges between states, evaluated every tick
//! - **Hooks**: per-state enter/exit/update capability records
//! - **State Machine**: selects at most one transition per tick and
//!   dispatches hooks in exit, enter, update order

mod config;
mod error;
mod hooks;
#[allow(clippy::module_inception)]
mod machine;
mod transition;

pub use config::MachineConfig;
pub use error::MachineError;
pub use hooks::{HookKind, HookResult, Hooks};
pub use machine::{StateMachine, Tick};
pub use transition::Transition;
