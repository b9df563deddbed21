//! Guarded edges between states.

use crate::core::{BoxError, Guard, State};

/// A transition from one state to another, guarded by a condition.
///
/// `from` and `to` cannot change once the transition is built.
#[derive(Clone, Debug)]
pub struct Transition<S: State> {
    from: S,
    to: S,
    condition: Guard,
}

impl<S: State> Transition<S> {
    pub fn new(from: S, to: S, condition: Guard) -> Self {
        Self {
            from,
            to,
            condition,
        }
    }

    /// Transition guarded by an infallible closure.
    pub fn when<F>(from: S, to: S, condition: F) -> Self
    where
        F: Fn() -> bool + Send + Sync + 'static,
    {
        Self::new(from, to, Guard::new(condition))
    }

    /// Transition that fires whenever its source state is current.
    pub fn always(from: S, to: S) -> Self {
        Self::new(from, to, Guard::always())
    }

    pub fn from(&self) -> &S {
        &self.from
    }

    pub fn to(&self) -> &S {
        &self.to
    }

    pub fn condition(&self) -> &Guard {
        &self.condition
    }

    /// Whether this transition leaves `current`. Does not evaluate the guard.
    pub fn leaves(&self, current: &S) -> bool {
        *current == self.from
    }

    /// Check if this transition can fire from the current state.
    ///
    /// The guard is only evaluated when the source state matches.
    pub fn can_execute(&self, current: &S) -> Result<bool, BoxError> {
        if !self.leaves(current) {
            return Ok(false);
        }
        self.condition.check()
    }
}
