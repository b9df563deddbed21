//! Guard predicates for controlling state transitions.
//!
//! A guard is a zero-argument condition evaluated on every tick in which its
//! transition leaves the current state. Guards close over whatever world
//! state they need to observe.

use super::BoxError;
use std::fmt;
use std::sync::Arc;

type Predicate = Arc<dyn Fn() -> Result<bool, BoxError> + Send + Sync>;

/// Condition that determines if a transition fires.
///
/// # Example
///
/// ```rust
/// use std::sync::atomic::{AtomicBool, Ordering};
/// use std::sync::Arc;
/// use tickbus::core::Guard;
///
/// let player_visible = Arc::new(AtomicBool::new(false));
/// let flag = Arc::clone(&player_visible);
/// let guard = Guard::new(move || flag.load(Ordering::Relaxed));
///
/// assert!(!guard.check().unwrap());
/// player_visible.store(true, Ordering::Relaxed);
/// assert!(guard.check().unwrap());
/// ```
#[derive(Clone)]
pub struct Guard {
    predicate: Predicate,
}

impl Guard {
    /// Create a guard from an infallible predicate.
    pub fn new<F>(predicate: F) -> Self
    where
        F: Fn() -> bool + Send + Sync + 'static,
    {
        Guard {
            predicate: Arc::new(move || Ok(predicate())),
        }
    }

    /// Create a guard whose evaluation can fail.
    ///
    /// An error aborts the tick that evaluated it and is returned from
    /// [`StateMachine::update`](crate::machine::StateMachine::update).
    pub fn try_new<F>(predicate: F) -> Self
    where
        F: Fn() -> Result<bool, BoxError> + Send + Sync + 'static,
    {
        Guard {
            predicate: Arc::new(predicate),
        }
    }

    /// Guard that always passes.
    pub fn always() -> Self {
        Guard::new(|| true)
    }

    /// Evaluate the condition.
    pub fn check(&self) -> Result<bool, BoxError> {
        (self.predicate)()
    }
}

impl Default for Guard {
    fn default() -> Self {
        Self::always()
    }
}

impl fmt::Debug for Guard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Guard").finish_non_exhaustive()
    }
}
