//! Positional, arity-specific view of an [`EventBus`].

use super::config::BroadcastMode;
use super::error::BusError;
use super::handler::{HandlerResult, Listener, Responder};
use super::registry::EventBus;
use super::report::BroadcastReport;
use std::fmt;
use std::marker::PhantomData;

/// Facade over a shared [`EventBus`] for channels carrying arguments `A`.
///
/// `A` is one of `()`, `(T,)`, `(T, U)` or `(T, U, V)`. Channel names are
/// not namespaced by arity: a two-argument messenger and a one-argument
/// messenger using the same name share one channel, and the second to
/// register gets a [`BusError::SignatureMismatch`].
///
/// ```rust
/// use tickbus::bus::EventBus;
///
/// let bus = EventBus::new();
/// let damage = bus.messenger::<(u32, String)>();
///
/// damage
///     .listen("player_hit", |amount, source| {
///         println!("{source} hit for {amount}");
///         Ok(())
///     })
///     .unwrap();
///
/// damage.broadcast("player_hit", 12, "goblin".to_string()).unwrap();
/// ```
pub struct Messenger<'bus, A> {
    bus: &'bus EventBus,
    _args: PhantomData<fn(A)>,
}

impl<'bus, A: 'static> Messenger<'bus, A> {
    pub(crate) fn new(bus: &'bus EventBus) -> Self {
        Self {
            bus,
            _args: PhantomData,
        }
    }

    /// The bus this messenger forwards to.
    pub fn bus(&self) -> &'bus EventBus {
        self.bus
    }

    pub fn add_listener(&self, name: &str, listener: &Listener<A>) -> Result<(), BusError> {
        self.bus.add_listener(name, listener)
    }

    pub fn remove_listener(&self, name: &str, listener: &Listener<A>) -> Result<bool, BusError> {
        self.bus.remove_listener(name, listener)
    }

    pub fn add_responder<R: 'static>(
        &self,
        name: &str,
        responder: &Responder<A, R>,
    ) -> Result<(), BusError> {
        self.bus.add_responder(name, responder)
    }

    pub fn remove_responder<R: 'static>(
        &self,
        name: &str,
        responder: &Responder<A, R>,
    ) -> Result<bool, BusError> {
        self.bus.remove_responder(name, responder)
    }

    /// Clear the whole shared registry, every arity included.
    pub fn clear(&self) {
        self.bus.clear();
    }
}

impl<A> Clone for Messenger<'_, A> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<A> Copy for Messenger<'_, A> {}

impl<A> fmt::Debug for Messenger<'_, A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Messenger")
            .field("args", &std::any::type_name::<A>())
            .finish_non_exhaustive()
    }
}

macro_rules! arity_facade {
    ($($ty:ident $arg:ident),*) => {
        impl<'bus, $($ty: 'static),*> Messenger<'bus, ($($ty,)*)> {
            /// Create a listener from `handler` and register it on `name`.
            ///
            /// The returned handle removes it again.
            pub fn listen<F>(&self, name: &str, handler: F) -> Result<Listener<($($ty,)*)>, BusError>
            where
                F: Fn($(&$ty),*) -> HandlerResult + Send + Sync + 'static,
            {
                let listener = Listener::<($($ty,)*)>::new(handler);
                self.bus.add_listener(name, &listener)?;
                Ok(listener)
            }

            /// Create a responder from `handler` and register it on `name`.
            pub fn respond<R, F>(
                &self,
                name: &str,
                handler: F,
            ) -> Result<Responder<($($ty,)*), R>, BusError>
            where
                R: 'static,
                F: Fn($(&$ty),*) -> R + Send + Sync + 'static,
            {
                let responder = Responder::<($($ty,)*), R>::new(handler);
                self.bus.add_responder(name, &responder)?;
                Ok(responder)
            }

            pub fn broadcast(&self, name: &str $(, $arg: $ty)*) -> Result<BroadcastReport, BusError> {
                self.bus.broadcast(name, ($($arg,)*))
            }

            pub fn broadcast_with_mode(
                &self,
                name: &str,
                $($arg: $ty,)*
                mode: BroadcastMode,
            ) -> Result<BroadcastReport, BusError> {
                self.bus.broadcast_with_mode(name, ($($arg,)*), mode)
            }

            pub fn broadcast_collect<R, C>(
                &self,
                name: &str,
                $($arg: $ty,)*
                collector: C,
            ) -> Result<BroadcastReport, BusError>
            where
                R: 'static,
                C: FnMut(R) -> HandlerResult,
            {
                self.bus.broadcast_collect(name, ($($arg,)*), collector)
            }

            pub fn broadcast_collect_with_mode<R, C>(
                &self,
                name: &str,
                $($arg: $ty,)*
                collector: C,
                mode: BroadcastMode,
            ) -> Result<BroadcastReport, BusError>
            where
                R: 'static,
                C: FnMut(R) -> HandlerResult,
            {
                self.bus
                    .broadcast_collect_with_mode(name, ($($arg,)*), collector, mode)
            }
        }
    };
}

arity_facade!();
arity_facade!(T a);
arity_facade!(T a, U b);
arity_facade!(T a, U b, V c);
