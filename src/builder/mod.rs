//! Builder API for ergonomic state machine construction.
//!
//! This module provides fluent builders and a macro for declaring state
//! enums, so a behavior module can describe its machine in one expression.

pub mod error;
pub mod machine;
pub mod macros;
pub mod transition;

pub use error::BuildError;
pub use machine::StateMachineBuilder;
pub use transition::TransitionBuilder;
