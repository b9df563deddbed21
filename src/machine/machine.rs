//! Tick-driven state machine.

use super::config::MachineConfig;
use super::error::MachineError;
use super::hooks::{HookKind, Hooks};
use super::transition::Transition;
use crate::core::{State, StateHistory, StateTransition};
use chrono::Utc;

/// Outcome of a single [`StateMachine::update`] call.
#[derive(Clone, Debug, PartialEq)]
pub struct Tick<S: State> {
    /// Tick number, starting at 1
    pub tick: u64,

    /// The transition that fired, if any
    pub fired: Option<StateTransition<S>>,

    /// How many transitions out of the current state had a passing condition
    pub candidates: usize,
}

impl<S: State> Tick<S> {
    /// Whether more than one transition matched this tick.
    pub fn was_ambiguous(&self) -> bool {
        self.candidates > 1
    }
}

/// State machine advanced by an external scheduler, one tick per frame.
///
/// Holds exactly one current state and an ordered, fixed list of
/// transitions. List order breaks ties: when several transitions match in one
/// tick, the first declared one fires.
///
/// # Example
///
/// ```rust
/// use std::sync::atomic::{AtomicBool, Ordering};
/// use std::sync::Arc;
/// use tickbus::machine::{StateMachine, Transition};
/// use tickbus::state_enum;
///
/// state_enum! {
///     enum Sentry {
///         Patrol,
///         Alert,
///     }
/// }
///
/// let noise = Arc::new(AtomicBool::new(false));
/// let heard = Arc::clone(&noise);
/// let mut machine = StateMachine::new(
///     Sentry::Patrol,
///     vec![Transition::when(Sentry::Patrol, Sentry::Alert, move || heard.load(Ordering::Relaxed))],
/// );
///
/// machine.update().unwrap();
/// assert_eq!(machine.current_state(), &Sentry::Patrol);
///
/// noise.store(true, Ordering::Relaxed);
/// machine.update().unwrap();
/// assert_eq!(machine.current_state(), &Sentry::Alert);
/// ```
pub struct StateMachine<S: State> {
    current: S,
    transitions: Vec<Transition<S>>,
    hooks: Vec<(S, Hooks)>,
    config: MachineConfig,
    history: StateHistory<S>,
    ticks: u64,
}

impl<S: State> StateMachine<S> {
    /// Create a machine with no hooks and default configuration.
    pub fn new(initial: S, transitions: Vec<Transition<S>>) -> Self {
        Self::with_config(initial, transitions, MachineConfig::default())
    }

    /// Create a machine with no hooks.
    pub fn with_config(initial: S, transitions: Vec<Transition<S>>, config: MachineConfig) -> Self {
        Self::with_parts(initial, transitions, Vec::new(), config)
    }

    /// Create a machine from all of its parts.
    ///
    /// `hooks` pairs each state with its capability record. A state without
    /// an entry supports no hooks. Entries are not validated here: if a state
    /// appears more than once, the first entry is used and later ones are
    /// never called. [`StateMachineBuilder::build`](crate::builder::StateMachineBuilder::build)
    /// rejects such duplicates with
    /// [`BuildError::DuplicateHooks`](crate::builder::BuildError::DuplicateHooks).
    pub fn with_parts(
        initial: S,
        transitions: Vec<Transition<S>>,
        hooks: Vec<(S, Hooks)>,
        config: MachineConfig,
    ) -> Self {
        Self {
            current: initial,
            transitions,
            hooks,
            history: StateHistory::with_limit(config.history_limit),
            config,
            ticks: 0,
        }
    }

    /// Get current state
    pub fn current_state(&self) -> &S {
        &self.current
    }

    /// Check if machine is in a final state
    pub fn is_final(&self) -> bool {
        self.current.is_final()
    }

    /// Number of completed calls to [`update`](Self::update)
    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    pub fn history(&self) -> &StateHistory<S> {
        &self.history
    }

    pub fn transitions(&self) -> &[Transition<S>] {
        &self.transitions
    }

    pub fn config(&self) -> &MachineConfig {
        &self.config
    }

    /// Whether `state` has a hook of the given kind.
    pub fn supports(&self, state: &S, kind: HookKind) -> bool {
        self.hooks_for(state)
            .is_some_and(|hooks| hooks.supports(kind))
    }

    /// Advance the machine by one tick.
    ///
    /// 1. Evaluates the condition of every transition leaving the current
    ///    state, in declaration order, without short-circuiting.
    /// 2. If any passed, fires the first one: exit hook of the old state,
    ///    state change, enter hook of the new state.
    /// 3. Runs the update hook of whatever state is current afterwards, so a
    ///    state entered this tick is also updated this tick.
    ///
    /// Any failing condition or hook aborts the tick and is returned as-is.
    pub fn update(&mut self) -> Result<Tick<S>, MachineError> {
        self.ticks += 1;
        let tick = self.ticks;

        let mut selected: Option<usize> = None;
        let mut candidates = 0;
        for (index, transition) in self.transitions.iter().enumerate() {
            let passed = transition
                .can_execute(&self.current)
                .map_err(|source| MachineError::Condition {
                    from: transition.from().name().to_string(),
                    to: transition.to().name().to_string(),
                    source,
                })?;
            if passed {
                candidates += 1;
                selected.get_or_insert(index);
            }
        }

        tracing::trace!(tick, state = self.current.name(), candidates, "evaluated transitions");

        if candidates > 1 && self.config.warn_on_ambiguous {
            tracing::warn!(
                state = self.current.name(),
                candidates,
                "More than one state transition available, taking the first declared"
            );
        }

        let fired = match selected {
            Some(index) => {
                let next = self.transitions[index].to().clone();
                Some(self.change_state(next, tick)?)
            }
            None => None,
        };

        self.run_hook(HookKind::Update)?;

        Ok(Tick {
            tick,
            fired,
            candidates,
        })
    }

    fn change_state(&mut self, next: S, tick: u64) -> Result<StateTransition<S>, MachineError> {
        self.run_hook(HookKind::Exit)?;

        let from = std::mem::replace(&mut self.current, next);
        let record = StateTransition {
            from,
            to: self.current.clone(),
            tick,
            timestamp: Utc::now(),
        };
        tracing::debug!(
            from = record.from.name(),
            to = record.to.name(),
            tick,
            "state transition"
        );
        self.history.record(record.clone());

        self.run_hook(HookKind::Enter)?;
        Ok(record)
    }

    fn run_hook(&mut self, kind: HookKind) -> Result<(), MachineError> {
        let current = &self.current;
        let Some((_, hooks)) = self.hooks.iter_mut().find(|(state, _)| state == current) else {
            return Ok(());
        };
        hooks.run(kind).map_err(|source| MachineError::Hook {
            state: current.name().to_string(),
            hook: kind,
            source,
        })
    }

    fn hooks_for(&self, state: &S) -> Option<&Hooks> {
        self.hooks
            .iter()
            .find(|(candidate, _)| candidate == state)
            .map(|(_, hooks)| hooks)
    }
}

impl<S: State> std::fmt::Debug for StateMachine<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StateMachine")
            .field("current", &self.current)
            .field("transitions", &self.transitions.len())
            .field("ticks", &self.ticks)
            .finish_non_exhaustive()
    }
}
