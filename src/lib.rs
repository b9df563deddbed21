//! Tickbus: a tick-driven state machine and a typed event bus
//!
//! Tickbus gives a behavior module two small tools. A [`StateMachine`]
//! is polled once per frame and fires at most one guarded transition,
//! running the exit, enter and update hooks of the states involved. An
//! [`EventBus`] connects modules through named channels whose handler
//! signature is checked at runtime, with failing handlers isolated from
//! the rest of a broadcast.
//!
//! # Core Concepts
//!
//! - **State**: identity of a machine state via the `State` trait
//! - **Transitions**: `from -> to` edges gated by a `Guard`
//! - **Hooks**: optional enter/exit/update callbacks per state
//! - **Channels**: signature-locked handler lists addressed by name
//!
//! # Example
//!
//! ```rust
//! use tickbus::bus::EventBus;
//! use tickbus::machine::{StateMachine, Transition};
//! use tickbus::state_enum;
//! use std::sync::atomic::{AtomicBool, Ordering};
//! use std::sync::Arc;
//!
//! state_enum! {
//!     enum Enemy {
//!         Patrol,
//!         Chase,
//!     }
//! }
//!
//! let bus = EventBus::new();
//! let spotted = Arc::new(AtomicBool::new(false));
//!
//! let flag = Arc::clone(&spotted);
//! bus.messenger::<()>()
//!     .listen("player_spotted", move || {
//!         flag.store(true, Ordering::Relaxed);
//!         Ok(())
//!     })
//!     .unwrap();
//!
//! let seen = Arc::clone(&spotted);
//! let mut enemy = StateMachine::new(
//!     Enemy::Patrol,
//!     vec![Transition::when(Enemy::Patrol, Enemy::Chase, move || {
//!         seen.load(Ordering::Relaxed)
//!     })],
//! );
//!
//! enemy.update().unwrap();
//! assert_eq!(enemy.current_state(), &Enemy::Patrol);
//!
//! bus.messenger::<()>().broadcast("player_spotted").unwrap();
//! enemy.update().unwrap();
//! assert_eq!(enemy.current_state(), &Enemy::Chase);
//! ```

pub mod builder;
pub mod bus;
pub mod core;
pub mod machine;

#[cfg(test)]
mod test_support;

// Re-export commonly used types
pub use builder::{BuildError, StateMachineBuilder, TransitionBuilder};
pub use bus::{BroadcastMode, BusConfig, BusError, EventBus, Listener, Messenger, Responder};
pub use core::{Guard, State, StateHistory, StateTransition};
pub use machine::{HookKind, Hooks, MachineConfig, MachineError, StateMachine, Transition};
