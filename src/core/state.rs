//! Core State trait for state machine states.
//!
//! A state is an identity value. Behavior attached to a state (enter, exit,
//! per-tick update) lives in a separate capability record, see
//! [`Hooks`](crate::machine::Hooks).

use std::fmt::Debug;

/// Trait for state machine states.
///
/// Two states are the same state exactly when they compare equal, so
/// implementors must not make logically different states equal unless they
/// are meant as aliases.
///
/// # Required Traits
///
/// - `Clone`: states are copied into transitions and history records
/// - `PartialEq`: transition matching compares `from` against the current state
/// - `Debug`: states show up in errors and log output
///
/// # Example
///
/// ```rust
/// use tickbus::core::State;
///
/// #[derive(Clone, PartialEq, Debug)]
/// enum EnemyState {
///     Idle,
///     Chasing,
///     Dead,
/// }
///
/// impl State for EnemyState {
///     fn name(&self) -> &str {
///         match self {
///             Self::Idle => "Idle",
///             Self::Chasing => "Chasing",
///             Self::Dead => "Dead",
///         }
///     }
///
///     fn is_final(&self) -> bool {
///         matches!(self, Self::Dead)
///     }
/// }
/// ```
pub trait State: Clone + PartialEq + Debug + Send + Sync + 'static {
    /// Get the state's name for display/logging.
    fn name(&self) -> &str;

    /// Check if this is a final (terminal) state.
    ///
    /// Purely informational: the machine keeps evaluating transitions out of
    /// a final state if any are declared.
    ///
    /// Default implementation returns `false`.
    fn is_final(&self) -> bool {
        false
    }
}
