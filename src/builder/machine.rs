//! Builder for constructing state machines.

use crate::builder::error::BuildError;
use crate::builder::transition::TransitionBuilder;
use crate::core::State;
use crate::machine::{Hooks, MachineConfig, StateMachine, Transition};

/// Builder for constructing state machines with a fluent API.
///
/// ```rust
/// use tickbus::builder::{StateMachineBuilder, TransitionBuilder};
/// use tickbus::machine::Hooks;
/// use tickbus::state_enum;
///
/// state_enum! {
///     enum Door {
///         Closed,
///         Open,
///     }
/// }
///
/// let mut machine = StateMachineBuilder::new()
///     .initial(Door::Closed)
///     .transition(TransitionBuilder::new().from(Door::Closed).to(Door::Open))
///     .unwrap()
///     .state(Door::Open, Hooks::new().on_enter(|| println!("creak")))
///     .build()
///     .unwrap();
///
/// machine.update().unwrap();
/// assert_eq!(machine.current_state(), &Door::Open);
/// ```
pub struct StateMachineBuilder<S: State> {
    initial: Option<S>,
    transitions: Vec<Transition<S>>,
    hooks: Vec<(S, Hooks)>,
    config: MachineConfig,
}

impl<S: State> StateMachineBuilder<S> {
    /// Create a new builder.
    pub fn new() -> Self {
        Self {
            initial: None,
            transitions: Vec::new(),
            hooks: Vec::new(),
            config: MachineConfig::default(),
        }
    }

    /// Set the initial state (required).
    pub fn initial(mut self, state: S) -> Self {
        self.initial = Some(state);
        self
    }

    /// Add a transition using a builder.
    /// Returns an error if the builder fails validation.
    pub fn transition(mut self, builder: TransitionBuilder<S>) -> Result<Self, BuildError> {
        let transition = builder.build()?;
        self.transitions.push(transition);
        Ok(self)
    }

    /// Add a pre-built transition.
    pub fn add_transition(mut self, transition: Transition<S>) -> Self {
        self.transitions.push(transition);
        self
    }

    /// Add multiple transitions at once, keeping their order.
    pub fn transitions(mut self, transitions: Vec<Transition<S>>) -> Self {
        self.transitions.extend(transitions);
        self
    }

    /// Attach the capability record of a state.
    pub fn state(mut self, state: S, hooks: Hooks) -> Self {
        self.hooks.push((state, hooks));
        self
    }

    pub fn config(mut self, config: MachineConfig) -> Self {
        self.config = config;
        self
    }

    /// Build the state machine.
    /// Returns an error if required fields are missing or a state was given
    /// hooks twice.
    pub fn build(self) -> Result<StateMachine<S>, BuildError> {
        let initial = self.initial.ok_or(BuildError::MissingInitialState)?;

        for (index, (state, _)) in self.hooks.iter().enumerate() {
            if self.hooks[..index].iter().any(|(seen, _)| seen == state) {
                return Err(BuildError::DuplicateHooks {
                    state: state.name().to_string(),
                });
            }
        }

        Ok(StateMachine::with_parts(
            initial,
            self.transitions,
            self.hooks,
            self.config,
        ))
    }
}

impl<S: State> Default for StateMachineBuilder<S> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::machine::HookKind;

    #[derive(Clone, PartialEq, Debug)]
    enum TestState {
        Menu,
        Playing,
        Paused,
    }

    impl State for TestState {
        fn name(&self) -> &str {
            match self {
                Self::Menu => "Menu",
                Self::Playing => "Playing",
                Self::Paused => "Paused",
            }
        }
    }

    #[test]
    fn builder_validates_required_fields() {
        let result = StateMachineBuilder::<TestState>::new().build();
        assert!(matches!(result, Err(BuildError::MissingInitialState)));
    }

    #[test]
    fn machine_without_transitions_builds() {
        let machine = StateMachineBuilder::new()
            .initial(TestState::Menu)
            .build()
            .unwrap();

        assert_eq!(machine.current_state(), &TestState::Menu);
        assert!(machine.transitions().is_empty());
    }

    #[test]
    fn transition_builder_errors_propagate() {
        let result = StateMachineBuilder::new()
            .initial(TestState::Menu)
            .transition(TransitionBuilder::new().from(TestState::Menu));

        assert!(matches!(result, Err(BuildError::MissingToState)));
    }

    #[test]
    fn fluent_api_keeps_transition_order() {
        let machine = StateMachineBuilder::new()
            .initial(TestState::Menu)
            .add_transition(Transition::always(TestState::Menu, TestState::Playing))
            .transitions(vec![
                Transition::always(TestState::Playing, TestState::Paused),
                Transition::always(TestState::Paused, TestState::Playing),
            ])
            .build()
            .unwrap();

        let targets: Vec<&TestState> = machine.transitions().iter().map(|t| t.to()).collect();
        assert_eq!(
            targets,
            vec![&TestState::Playing, &TestState::Paused, &TestState::Playing]
        );
    }

    #[test]
    fn state_hooks_are_attached() {
        let machine = StateMachineBuilder::new()
            .initial(TestState::Menu)
            .state(TestState::Paused, Hooks::new().on_enter(|| {}))
            .build()
            .unwrap();

        assert!(machine.supports(&TestState::Paused, HookKind::Enter));
        assert!(!machine.supports(&TestState::Menu, HookKind::Enter));
    }

    #[test]
    fn duplicate_hooks_are_rejected() {
        let result = StateMachineBuilder::new()
            .initial(TestState::Menu)
            .state(TestState::Playing, Hooks::new())
            .state(TestState::Paused, Hooks::new())
            .state(TestState::Playing, Hooks::new().on_update(|| {}))
            .build();

        assert_eq!(
            result.unwrap_err(),
            BuildError::DuplicateHooks {
                state: "Playing".to_string()
            }
        );
    }

    #[test]
    fn config_is_applied() {
        let machine = StateMachineBuilder::new()
            .initial(TestState::Menu)
            .config(MachineConfig {
                warn_on_ambiguous: false,
                history_limit: 4,
            })
            .build()
            .unwrap();

        assert!(!machine.config().warn_on_ambiguous);
        assert_eq!(machine.history().limit(), 4);
    }
}
