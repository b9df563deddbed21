//! Named, typed publish/subscribe channels.
//!
//! # Key Concepts
//!
//! - **Channel**: a name bound to an ordered list of handlers sharing one
//!   signature; it exists only while it has handlers
//! - **Signature**: argument tuple plus void/value return, fixed by the first
//!   registration and enforced on every later add, remove and broadcast
//! - **Isolation**: a failing handler is logged and reported, and delivery
//!   continues with the next one
//! - **Messenger**: positional facade for arities 0 through 3

mod config;
mod error;
mod handler;
mod messenger;
mod registry;
mod report;

pub use config::{BroadcastMode, BusConfig, FailurePolicy};
pub use error::{BusError, Operation};
pub use handler::{HandlerError, HandlerResult, Listener, Responder, Signature};
pub use messenger::Messenger;
pub use registry::EventBus;
pub use report::{BroadcastReport, HandlerFailure};
