//! Subscribable signals.
//!
//! Listeners are stored in an arena and addressed by a [`SubscriptionId`]
//! so they can be removed without invalidating other subscriptions.

use slotmap::{new_key_type, SlotMap};

new_key_type! {
    /// Handle returned by `subscribe`, used to unsubscribe
    pub struct SubscriptionId;
}

type Listener<T> = Box<dyn FnMut(&T)>;

/// A list of callbacks invoked, in subscription order, on every emit
pub struct Signal<T> {
    listeners: SlotMap<SubscriptionId, Listener<T>>,
}

impl<T> Signal<T> {
    pub fn new() -> Self {
        Self {
            listeners: SlotMap::with_key(),
        }
    }

    pub fn subscribe<F>(&mut self, listener: F) -> SubscriptionId
    where
        F: FnMut(&T) + 'static,
    {
        self.listeners.insert(Box::new(listener))
    }

    /// Returns false if the subscription was already gone
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.listeners.remove(id).is_some()
    }

    pub fn emit(&mut self, value: &T) {
        for (_id, listener) in self.listeners.iter_mut() {
            listener(value);
        }
    }

    pub fn len(&self) -> usize {
        self.listeners.len()
    }

    pub fn is_empty(&self) -> bool {
        self.listeners.is_empty()
    }
}

impl<T> Default for Signal<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> std::fmt::Debug for Signal<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Signal")
            .field("listeners", &self.listeners.len())
            .finish()
    }
}
