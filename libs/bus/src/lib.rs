//! Event substrate: services, listeners, connectors
//!
//! The platform is a DAG of keyed, stateful services. A `Connector` moves
//! bytes across the process boundary (file in, file out) and invokes
//! `on_message` on its service; a `Listener` is an in-process subscriber
//! receiving a service's emissions synchronously.
//!
//! Dispatch is single-threaded and recursive: a listener may call into
//! another service, and that call completes before control returns to the
//! emitting service. Services live in `Rc<RefCell<_>>` cells; listener
//! adapters hold a shared handle to their target service and are handed out
//! only by the target's constructor functions, so adapters can never outlive
//! the service they feed.

use std::cell::RefCell;
use std::io::BufRead;
use std::rc::Rc;

use types::errors::FeedError;

/// A service wrapped for shared single-threaded access.
pub type SharedService<S> = Rc<RefCell<S>>;

/// Wrap a service for wiring into the pipeline.
pub fn shared<S>(service: S) -> SharedService<S> {
    Rc::new(RefCell::new(service))
}

/// An in-process subscriber to a service's emissions.
///
/// Only `process_add` carries behavior in this pipeline; remove and update
/// events are accepted and ignored.
pub trait Listener<V> {
    fn process_add(&self, data: &V);

    fn process_remove(&self, _data: &V) {}

    fn process_update(&self, _data: &V) {}
}

/// The boundary between a service and an external byte stream.
///
/// Subscribe-only connectors keep the default `publish`; publish-only
/// connectors keep the default `subscribe`.
pub trait Connector<V> {
    fn publish(&mut self, _data: &V) -> Result<(), FeedError> {
        Ok(())
    }

    fn subscribe<R: BufRead>(&mut self, _input: R) -> Result<(), FeedError> {
        Ok(())
    }
}

/// A keyed store of current values with listener fan-out.
pub trait Service {
    type Key;
    type Value;

    /// Current value for a key, `None` if the key has never been seen.
    fn get_data(&self, key: &Self::Key) -> Option<&Self::Value>;

    /// Entry point invoked by an inbound connector.
    fn on_message(&mut self, data: Self::Value);

    /// Register a downstream listener.
    fn add_listener(&mut self, listener: Rc<dyn Listener<Self::Value>>);

    /// Every registered listener.
    fn listeners(&self) -> &ListenerSet<Self::Value>;
}

/// Ordered set of listeners a service fans out to.
pub struct ListenerSet<V> {
    listeners: Vec<Rc<dyn Listener<V>>>,
}

impl<V> ListenerSet<V> {
    pub fn new() -> Self {
        Self {
            listeners: Vec::new(),
        }
    }

    pub fn add(&mut self, listener: Rc<dyn Listener<V>>) {
        self.listeners.push(listener);
    }

    pub fn len(&self) -> usize {
        self.listeners.len()
    }

    pub fn is_empty(&self) -> bool {
        self.listeners.is_empty()
    }

    /// Deliver an add event to every listener, in registration order.
    pub fn notify_add(&self, data: &V) {
        for listener in &self.listeners {
            listener.process_add(data);
        }
    }
}

impl<V> Default for ListenerSet<V> {
    fn default() -> Self {
        Self::new()
    }
}
