//! The channel registry.

use super::config::{BroadcastMode, BusConfig};
use super::error::{BusError, Operation};
use super::handler::{Handler, HandlerResult, Listener, Responder, Signature};
use super::messenger::Messenger;
use super::report::BroadcastReport;
use parking_lot::Mutex;
use std::any::Any;
use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::fmt;

/// One handler registration. `id` is unique per registry and tells
/// duplicate registrations of the same handle apart.
struct Registration<H> {
    id: u64,
    handler: H,
    failures: u32,
}

/// Type-erased list of registrations sharing one handle type.
trait Registrations: Send {
    fn len(&self) -> usize;
    fn as_any_mut(&mut self) -> &mut dyn Any;
    fn as_any(&self) -> &dyn Any;
}

impl<H: Handler> Registrations for Vec<Registration<H>> {
    fn len(&self) -> usize {
        Vec::len(self)
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

struct Channel {
    signature: Signature,
    registrations: Box<dyn Registrations>,
}

impl Channel {
    fn new<H: Handler>() -> Self {
        Self {
            signature: Signature::of::<H>(),
            registrations: Box::new(Vec::<Registration<H>>::new()),
        }
    }

    fn list<H: Handler>(&self) -> Option<&Vec<Registration<H>>> {
        self.registrations.as_any().downcast_ref()
    }

    fn list_mut<H: Handler>(&mut self) -> Option<&mut Vec<Registration<H>>> {
        self.registrations.as_any_mut().downcast_mut()
    }

    fn len(&self) -> usize {
        self.registrations.len()
    }
}

#[derive(Default)]
struct Registry {
    channels: HashMap<String, Channel>,
    next_id: u64,
}

fn mismatch(channel: &str, operation: Operation, expected: Signature, found: Signature) -> BusError {
    BusError::SignatureMismatch {
        channel: channel.to_string(),
        operation,
        expected: expected.name(),
        found: found.name(),
    }
}

/// Named, signature-locked publish/subscribe channels.
///
/// Every channel name maps to an ordered list of handlers that share one
/// signature (argument tuple plus void/value return). A channel exists while
/// it has at least one handler: the first registration creates it and fixes
/// its signature, removing the last handler deletes it.
///
/// Handlers run synchronously on the broadcasting thread, in registration
/// order. A failing handler is logged and reported but never stops delivery
/// to the handlers after it. The registry lock is not held while handlers
/// run, so handlers may add, remove or broadcast themselves; a broadcast
/// always delivers to the handlers registered when it started.
///
/// # Example
///
/// ```rust
/// use tickbus::bus::{EventBus, Listener};
///
/// let bus = EventBus::new();
/// let on_score = Listener::<(u32,)>::new(|points| {
///     println!("score +{points}");
///     Ok(())
/// });
///
/// bus.add_listener("score_changed", &on_score).unwrap();
/// let report = bus.broadcast("score_changed", (15_u32,)).unwrap();
/// assert_eq!(report.delivered, 1);
///
/// bus.remove_listener("score_changed", &on_score).unwrap();
/// assert!(!bus.contains("score_changed"));
/// ```
#[derive(Default)]
pub struct EventBus {
    registry: Mutex<Registry>,
    config: BusConfig,
}

impl EventBus {
    /// Create an empty bus with default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: BusConfig) -> Self {
        Self {
            registry: Mutex::default(),
            config,
        }
    }

    pub fn config(&self) -> &BusConfig {
        &self.config
    }

    /// Typed, positional view of this bus for argument tuple `A`.
    pub fn messenger<A: 'static>(&self) -> Messenger<'_, A> {
        Messenger::new(self)
    }

    /// Register a void handler on `name`.
    ///
    /// Fails with [`BusError::SignatureMismatch`] if the channel already
    /// holds handlers of another signature. Registering the same handle
    /// twice delivers to it twice.
    pub fn add_listener<A: 'static>(&self, name: &str, listener: &Listener<A>) -> Result<(), BusError> {
        self.add(name, listener)
    }

    /// Register a value-producing handler on `name`.
    pub fn add_responder<A: 'static, R: 'static>(
        &self,
        name: &str,
        responder: &Responder<A, R>,
    ) -> Result<(), BusError> {
        self.add(name, responder)
    }

    /// Remove one registration of `listener` from `name`.
    ///
    /// Returns whether a registration was removed. An unknown channel is
    /// not an error.
    pub fn remove_listener<A: 'static>(
        &self,
        name: &str,
        listener: &Listener<A>,
    ) -> Result<bool, BusError> {
        self.remove(name, listener)
    }

    /// Remove one registration of `responder` from `name`.
    pub fn remove_responder<A: 'static, R: 'static>(
        &self,
        name: &str,
        responder: &Responder<A, R>,
    ) -> Result<bool, BusError> {
        self.remove(name, responder)
    }

    /// Broadcast `args` on `name` using the configured default mode.
    ///
    /// The channel signature is taken from the type of `args`, so integer
    /// literals need a suffix (`(15_u32,)`) or a typed [`Messenger`].
    pub fn broadcast<A: 'static>(&self, name: &str, args: A) -> Result<BroadcastReport, BusError> {
        self.broadcast_with_mode(name, args, self.config.default_mode)
    }

    /// Invoke every listener on `name` with `args`, in registration order.
    pub fn broadcast_with_mode<A: 'static>(
        &self,
        name: &str,
        args: A,
        mode: BroadcastMode,
    ) -> Result<BroadcastReport, BusError> {
        let mut report = BroadcastReport::default();
        let Some(snapshot) = self.snapshot::<Listener<A>>(name, mode)? else {
            return Ok(report);
        };

        let mut outcomes = Vec::with_capacity(snapshot.len());
        for (position, (id, listener)) in snapshot.iter().enumerate() {
            let outcome = listener.call(&args);
            outcomes.push((*id, outcome.is_ok()));
            report.record(name, position, outcome);
        }

        report.removed = self.apply_failure_policy::<Listener<A>>(name, &outcomes);
        Ok(report)
    }

    /// Broadcast to responders using the configured default mode.
    pub fn broadcast_collect<A, R, C>(
        &self,
        name: &str,
        args: A,
        collector: C,
    ) -> Result<BroadcastReport, BusError>
    where
        A: 'static,
        R: 'static,
        C: FnMut(R) -> HandlerResult,
    {
        self.broadcast_collect_with_mode(name, args, collector, self.config.default_mode)
    }

    /// Invoke every responder on `name`, then pass each produced value to
    /// `collector`.
    ///
    /// All values are produced before the collector runs for the first time;
    /// both passes follow registration order. Collector errors are logged and
    /// reported without stopping the remaining values.
    pub fn broadcast_collect_with_mode<A, R, C>(
        &self,
        name: &str,
        args: A,
        mut collector: C,
        mode: BroadcastMode,
    ) -> Result<BroadcastReport, BusError>
    where
        A: 'static,
        R: 'static,
        C: FnMut(R) -> HandlerResult,
    {
        let mut report = BroadcastReport::default();
        let Some(snapshot) = self.snapshot::<Responder<A, R>>(name, mode)? else {
            return Ok(report);
        };

        let values: Vec<R> = snapshot
            .iter()
            .map(|(_, responder)| responder.call(&args))
            .collect();

        for (position, value) in values.into_iter().enumerate() {
            report.record(name, position, collector(value));
        }
        Ok(report)
    }

    /// Remove every channel.
    pub fn clear(&self) {
        let mut registry = self.registry.lock();
        let channels = registry.channels.len();
        registry.channels.clear();
        tracing::debug!(channels, "event registry cleared");
    }

    /// Whether a channel named `name` exists.
    pub fn contains(&self, name: &str) -> bool {
        self.registry.lock().channels.contains_key(name)
    }

    /// Number of registrations on `name`; 0 for unknown channels.
    pub fn listener_count(&self, name: &str) -> usize {
        self.registry
            .lock()
            .channels
            .get(name)
            .map_or(0, Channel::len)
    }

    /// Names of all channels, sorted.
    pub fn channel_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.registry.lock().channels.keys().cloned().collect();
        names.sort();
        names
    }

    /// Number of channels.
    pub fn len(&self) -> usize {
        self.registry.lock().channels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.registry.lock().channels.is_empty()
    }

    fn add<H: Handler>(&self, name: &str, handler: &H) -> Result<(), BusError> {
        let found = Signature::of::<H>();
        let mut registry = self.registry.lock();
        let id = registry.next_id;

        let channel = match registry.channels.entry(name.to_string()) {
            Entry::Occupied(entry) => entry.into_mut(),
            Entry::Vacant(entry) => {
                tracing::debug!(channel = name, signature = %found, "channel created");
                entry.insert(Channel::new::<H>())
            }
        };

        let expected = channel.signature;
        if expected != found {
            return Err(mismatch(name, Operation::AddListener, expected, found));
        }
        let Some(list) = channel.list_mut::<H>() else {
            return Err(mismatch(name, Operation::AddListener, expected, found));
        };
        list.push(Registration {
            id,
            handler: handler.clone(),
            failures: 0,
        });

        registry.next_id += 1;
        Ok(())
    }

    fn remove<H: Handler>(&self, name: &str, handler: &H) -> Result<bool, BusError> {
        let found = Signature::of::<H>();
        let mut registry = self.registry.lock();
        let Some(channel) = registry.channels.get_mut(name) else {
            return Ok(false);
        };

        let expected = channel.signature;
        if expected != found {
            return Err(mismatch(name, Operation::RemoveListener, expected, found));
        }
        let Some(list) = channel.list_mut::<H>() else {
            return Err(mismatch(name, Operation::RemoveListener, expected, found));
        };
        let Some(position) = list.iter().position(|r| r.handler.same(handler)) else {
            return Ok(false);
        };
        list.remove(position);

        if list.is_empty() {
            registry.channels.remove(name);
            tracing::debug!(channel = name, "channel removed");
        }
        Ok(true)
    }

    /// Copy the handlers of `name` out of the registry.
    ///
    /// `Ok(None)` means the channel is absent and `mode` allows that.
    fn snapshot<H: Handler>(
        &self,
        name: &str,
        mode: BroadcastMode,
    ) -> Result<Option<Vec<(u64, H)>>, BusError> {
        let found = Signature::of::<H>();
        let registry = self.registry.lock();
        let Some(channel) = registry.channels.get(name) else {
            return match mode {
                BroadcastMode::RequireListener => Err(BusError::MissingListener {
                    channel: name.to_string(),
                }),
                BroadcastMode::DontRequireListener => Ok(None),
            };
        };

        let expected = channel.signature;
        let Some(list) = channel.list::<H>().filter(|_| expected == found) else {
            return Err(mismatch(name, Operation::Broadcast, expected, found));
        };
        Ok(Some(
            list.iter()
                .map(|r| (r.id, r.handler.clone()))
                .collect(),
        ))
    }

    /// Update failure counters after a broadcast and drop handlers that
    /// crossed the configured threshold. Returns how many were dropped.
    fn apply_failure_policy<H: Handler>(&self, name: &str, outcomes: &[(u64, bool)]) -> usize {
        let Some(threshold) = self.config.failure_policy.threshold() else {
            return 0;
        };
        if outcomes.is_empty() {
            return 0;
        }

        let mut registry = self.registry.lock();
        // Handlers may have replaced or removed the channel mid-broadcast.
        let Some(list) = registry
            .channels
            .get_mut(name)
            .and_then(|channel| channel.list_mut::<H>())
        else {
            return 0;
        };

        let mut removed = 0;
        for &(id, succeeded) in outcomes {
            let Some(position) = list.iter().position(|r| r.id == id) else {
                continue;
            };
            let registration = &mut list[position];
            if succeeded {
                registration.failures = 0;
                continue;
            }
            registration.failures += 1;
            if registration.failures >= threshold {
                tracing::warn!(
                    channel = name,
                    failures = registration.failures,
                    "removing listener after repeated failures"
                );
                list.remove(position);
                removed += 1;
            }
        }

        if list.is_empty() {
            registry.channels.remove(name);
            tracing::debug!(channel = name, "channel removed");
        }
        removed
    }
}

impl fmt::Debug for EventBus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EventBus")
            .field("channels", &self.channel_names())
            .field("config", &self.config)
            .finish()
    }
}
