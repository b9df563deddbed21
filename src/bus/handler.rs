//! Handler handles and channel signatures.
//!
//! A channel's signature is the concrete handle type registered on it:
//! `Listener<A>` for void handlers and `Responder<A, R>` for handlers that
//! produce a value, where `A` is the argument tuple. Handles are cheap to
//! clone; clones refer to the same callback, which is how a handler is
//! identified again for removal.

use crate::core::BoxError;
use std::any::{type_name, TypeId};
use std::fmt;
use std::sync::Arc;

/// Error a listener or collector may fail with.
pub type HandlerError = BoxError;

/// Result returned by listeners and broadcast collectors.
pub type HandlerResult = Result<(), HandlerError>;

/// Argument/return shape shared by all handlers of one channel.
#[derive(Clone, Copy, Debug)]
pub struct Signature {
    id: TypeId,
    name: &'static str,
}

impl Signature {
    pub fn of<H: 'static>() -> Self {
        Self {
            id: TypeId::of::<H>(),
            name: type_name::<H>(),
        }
    }

    /// Readable type name, for diagnostics only.
    pub fn name(&self) -> &'static str {
        self.name
    }
}

impl PartialEq for Signature {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Signature {}

impl fmt::Display for Signature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name)
    }
}

/// Handle types the registry can store.
pub(crate) trait Handler: Clone + Send + 'static {
    /// Whether both handles point at the same callback.
    fn same(&self, other: &Self) -> bool;
}

/// Void handler for a channel carrying arguments `A`.
///
/// ```rust
/// use tickbus::bus::Listener;
///
/// let on_damage = Listener::<(u32, String)>::new(|amount, source| {
///     println!("took {amount} from {source}");
///     Ok(())
/// });
/// ```
pub struct Listener<A> {
    callback: Arc<dyn Fn(&A) -> HandlerResult + Send + Sync>,
}

impl<A: 'static> Listener<A> {
    /// Build a listener from a closure over the whole argument tuple.
    pub fn from_fn<F>(callback: F) -> Self
    where
        F: Fn(&A) -> HandlerResult + Send + Sync + 'static,
    {
        Self {
            callback: Arc::new(callback),
        }
    }

    pub(crate) fn call(&self, args: &A) -> HandlerResult {
        (self.callback)(args)
    }
}

impl<A> Clone for Listener<A> {
    fn clone(&self) -> Self {
        Self {
            callback: Arc::clone(&self.callback),
        }
    }
}

impl<A: 'static> Handler for Listener<A> {
    fn same(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.callback, &other.callback)
    }
}

impl<A> fmt::Debug for Listener<A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Listener")
            .field("args", &type_name::<A>())
            .finish_non_exhaustive()
    }
}

/// Value-producing handler for a channel carrying arguments `A`.
///
/// Responders are infallible; their values are handed to the broadcaster's
/// collector.
pub struct Responder<A, R> {
    callback: Arc<dyn Fn(&A) -> R + Send + Sync>,
}

impl<A: 'static, R: 'static> Responder<A, R> {
    /// Build a responder from a closure over the whole argument tuple.
    pub fn from_fn<F>(callback: F) -> Self
    where
        F: Fn(&A) -> R + Send + Sync + 'static,
    {
        Self {
            callback: Arc::new(callback),
        }
    }

    pub(crate) fn call(&self, args: &A) -> R {
        (self.callback)(args)
    }
}

impl<A, R> Clone for Responder<A, R> {
    fn clone(&self) -> Self {
        Self {
            callback: Arc::clone(&self.callback),
        }
    }
}

impl<A: 'static, R: 'static> Handler for Responder<A, R> {
    fn same(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.callback, &other.callback)
    }
}

impl<A, R> fmt::Debug for Responder<A, R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Responder")
            .field("args", &type_name::<A>())
            .field("returns", &type_name::<R>())
            .finish_non_exhaustive()
    }
}

// Positional constructors for arities 0 through 3.
macro_rules! arity_constructors {
    ($($ty:ident $arg:ident),*) => {
        impl<$($ty: 'static),*> Listener<($($ty,)*)> {
            /// Build a listener taking the channel's arguments positionally.
            pub fn new<F>(handler: F) -> Self
            where
                F: Fn($(&$ty),*) -> HandlerResult + Send + Sync + 'static,
            {
                Self::from_fn(move |($($arg,)*): &($($ty,)*)| handler($($arg),*))
            }
        }

        impl<$($ty: 'static,)* R: 'static> Responder<($($ty,)*), R> {
            /// Build a responder taking the channel's arguments positionally.
            pub fn new<F>(handler: F) -> Self
            where
                F: Fn($(&$ty),*) -> R + Send + Sync + 'static,
            {
                Self::from_fn(move |($($arg,)*): &($($ty,)*)| handler($($arg),*))
            }
        }
    };
}

arity_constructors!();
arity_constructors!(T a);
arity_constructors!(T a, U b);
arity_constructors!(T a, U b, V c);
