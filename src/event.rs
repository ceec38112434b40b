//! Subscriber lists with per-subscriber fault isolation.
//!
//! Components announce state changes (hotkey activation, finished elements,
//! erased elements, mode transitions) through [`Signal`]s instead of ambient
//! callbacks. A subscriber that panics is caught and logged; delivery to the
//! remaining subscribers always continues and the emitting component is left
//! intact.

use std::panic::{self, AssertUnwindSafe};

type Subscriber<T> = Box<dyn FnMut(&T)>;

/// An ordered list of subscribers notified on every [`Signal::emit`].
pub struct Signal<T> {
    name: &'static str,
    subscribers: Vec<Subscriber<T>>,
}

impl<T> Signal<T> {
    /// Creates an empty signal. The name only appears in log messages.
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            subscribers: Vec::new(),
        }
    }

    /// Appends a subscriber. Subscribers are invoked in registration order.
    pub fn subscribe<F>(&mut self, subscriber: F)
    where
        F: FnMut(&T) + 'static,
    {
        self.subscribers.push(Box::new(subscriber));
    }

    /// Number of registered subscribers.
    pub fn subscriber_count(&self) -> usize {
        self.subscribers.len()
    }

    /// Delivers `value` to every subscriber.
    ///
    /// A panicking subscriber is caught and logged; it does not stop delivery
    /// to subscribers registered after it.
    pub fn emit(&mut self, value: &T) {
        for subscriber in &mut self.subscribers {
            let result = panic::catch_unwind(AssertUnwindSafe(|| subscriber(value)));
            if result.is_err() {
                log::error!(
                    "subscriber to '{}' panicked; continuing delivery to remaining subscribers",
                    self.name
                );
            }
        }
    }
}

impl<T> std::fmt::Debug for Signal<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Signal")
            .field("name", &self.name)
            .field("subscribers", &self.subscribers.len())
            .finish()
    }
}
