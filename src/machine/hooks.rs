//! Capability records for states.
//!
//! A state's behavior is described once, when the machine is built, by a
//! [`Hooks`] record holding up to three optional callbacks. The machine looks
//! the record up for the current state and calls whichever hooks are present.

use crate::core::BoxError;
use std::fmt;

/// Result returned by fallible hooks.
pub type HookResult = Result<(), BoxError>;

type HookFn = Box<dyn FnMut() -> HookResult + Send>;

/// Lifecycle hook a state may support.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum HookKind {
    /// Called when the state becomes current through a transition
    Enter,
    /// Called when the state stops being current through a transition
    Exit,
    /// Called once per tick while the state is current
    Update,
}

impl fmt::Display for HookKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Enter => "enter",
            Self::Exit => "exit",
            Self::Update => "update",
        };
        f.write_str(name)
    }
}

/// Optional enter/exit/update callbacks attached to one state.
///
/// # Example
///
/// ```rust
/// use tickbus::machine::{HookKind, Hooks};
///
/// let hooks = Hooks::new()
///     .on_enter(|| println!("spotted the player"))
///     .on_update(|| println!("chasing"));
///
/// assert!(hooks.supports(HookKind::Enter));
/// assert!(!hooks.supports(HookKind::Exit));
/// ```
#[derive(Default)]
pub struct Hooks {
    enter: Option<HookFn>,
    exit: Option<HookFn>,
    update: Option<HookFn>,
}

impl Hooks {
    /// Record with no hooks.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn on_enter<F>(self, mut hook: F) -> Self
    where
        F: FnMut() + Send + 'static,
    {
        self.try_on_enter(move || {
            hook();
            Ok(())
        })
    }

    pub fn on_exit<F>(self, mut hook: F) -> Self
    where
        F: FnMut() + Send + 'static,
    {
        self.try_on_exit(move || {
            hook();
            Ok(())
        })
    }

    pub fn on_update<F>(self, mut hook: F) -> Self
    where
        F: FnMut() + Send + 'static,
    {
        self.try_on_update(move || {
            hook();
            Ok(())
        })
    }

    /// Fallible enter hook. An error aborts the tick.
    pub fn try_on_enter<F>(mut self, hook: F) -> Self
    where
        F: FnMut() -> HookResult + Send + 'static,
    {
        self.enter = Some(Box::new(hook));
        self
    }

    /// Fallible exit hook. An error aborts the tick before the state changes.
    pub fn try_on_exit<F>(mut self, hook: F) -> Self
    where
        F: FnMut() -> HookResult + Send + 'static,
    {
        self.exit = Some(Box::new(hook));
        self
    }

    /// Fallible update hook. An error aborts the tick.
    pub fn try_on_update<F>(mut self, hook: F) -> Self
    where
        F: FnMut() -> HookResult + Send + 'static,
    {
        self.update = Some(Box::new(hook));
        self
    }

    /// Whether the record carries a hook of the given kind.
    pub fn supports(&self, kind: HookKind) -> bool {
        match kind {
            HookKind::Enter => self.enter.is_some(),
            HookKind::Exit => self.exit.is_some(),
            HookKind::Update => self.update.is_some(),
        }
    }

    /// Run the hook of the given kind. Missing hooks succeed trivially.
    pub(crate) fn run(&mut self, kind: HookKind) -> HookResult {
        let slot = match kind {
            HookKind::Enter => &mut self.enter,
            HookKind::Exit => &mut self.exit,
            HookKind::Update => &mut self.update,
        };
        match slot {
            Some(hook) => hook(),
            None => Ok(()),
        }
    }
}

impl fmt::Debug for Hooks {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Hooks")
            .field("enter", &self.enter.is_some())
            .field("exit", &self.exit.is_some())
            .field("update", &self.update.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use parking_lot::Mutex;
    use std::sync::Arc;

    #[test]
    fn empty_record_supports_nothing() {
        let hooks = Hooks::new();
        assert!(!hooks.supports(HookKind::Enter));
        assert!(!hooks.supports(HookKind::Exit));
        assert!(!hooks.supports(HookKind::Update));
    }

    #[test]
    fn missing_hook_runs_as_noop() {
        let mut hooks = Hooks::new();
        assert!(hooks.run(HookKind::Update).is_ok());
    }

    #[test]
    fn run_dispatches_to_matching_hook() {
        let calls = Arc::new(Mutex::new(Vec::new()));
        let (a, b, c) = (Arc::clone(&calls), Arc::clone(&calls), Arc::clone(&calls));
        let mut hooks = Hooks::new()
            .on_enter(move || a.lock().push("enter"))
            .on_exit(move || b.lock().push("exit"))
            .on_update(move || c.lock().push("update"));

        hooks.run(HookKind::Exit).unwrap();
        hooks.run(HookKind::Update).unwrap();
        hooks.run(HookKind::Enter).unwrap();

        assert_eq!(*calls.lock(), vec!["exit", "update", "enter"]);
    }

    #[test]
    fn hooks_keep_their_own_state() {
        let mut frames = 0u32;
        let seen = Arc::new(Mutex::new(0u32));
        let sink = Arc::clone(&seen);
        let mut hooks = Hooks::new().on_update(move || {
            frames += 1;
            *sink.lock() = frames;
        });

        for _ in 0..3 {
            hooks.run(HookKind::Update).unwrap();
        }

        assert_eq!(*seen.lock(), 3);
    }

    #[test]
    fn fallible_hook_surfaces_error() {
        let mut hooks = Hooks::new().try_on_enter(|| Err("asset missing".into()));
        let err = hooks.run(HookKind::Enter).unwrap_err();
        assert_eq!(err.to_string(), "asset missing");
    }

    #[test]
    fn debug_lists_capabilities() {
        let hooks = Hooks::new().on_exit(|| {});
        let rendered = format!("{hooks:?}");
        assert!(rendered.contains("exit: true"));
        assert!(rendered.contains("enter: false"));
    }

    #[test]
    fn hook_kind_displays_lowercase() {
        assert_eq!(HookKind::Enter.to_string(), "enter");
        assert_eq!(HookKind::Exit.to_string(), "exit");
        assert_eq!(HookKind::Update.to_string(), "update");
    }
}
