//! Reactive state management

use std::sync::{Arc, PoisonError, RwLock};

type Listener = Box<dyn Fn() + Send + Sync>;

/// Handle returned by [`State::subscribe`], used to unsubscribe
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Subscription(u64);

#[derive(Default)]
struct Listeners {
    next_id: u64,
    entries: Vec<(Subscription, Listener)>,
}

/// Reactive state container - notifies subscribers when changed
///
/// Clones share the same value, which is how button callbacks reach the
/// state owned by their parent widget.
pub struct State<T: Clone + Send + Sync + 'static> {
    value: Arc<RwLock<T>>,
    listeners: Arc<RwLock<Listeners>>,
}

impl<T: Clone + Send + Sync + 'static> State<T> {
    pub fn new(initial: T) -> Self {
        Self {
            value: Arc::new(RwLock::new(initial)),
            listeners: Arc::new(RwLock::new(Listeners::default())),
        }
    }
    
    /// Get a copy of the current value
    pub fn get(&self) -> T {
        self.value.read().unwrap_or_else(PoisonError::into_inner).clone()
    }
    
    /// Read the current value without cloning it
    pub fn with<R>(&self, f: impl FnOnce(&T) -> R) -> R {
        let value = self.value.read().unwrap_or_else(PoisonError::into_inner);
        f(&value)
    }
    
    /// Set a new value and notify listeners
    pub fn set(&self, new_value: T) {
        {
            let mut value = self.value.write().unwrap_or_else(PoisonError::into_inner);
            *value = new_value;
        }
        self.notify();
    }
    
    /// Update value in place, notify listeners, and hand back whatever `f` returned
    pub fn update<R>(&self, f: impl FnOnce(&mut T) -> R) -> R {
        let result = {
            let mut value = self.value.write().unwrap_or_else(PoisonError::into_inner);
            f(&mut value)
        };
        self.notify();
        result
    }
    
    /// Subscribe to changes
    pub fn subscribe<F: Fn() + Send + Sync + 'static>(&self, callback: F) -> Subscription {
        let mut listeners = self.listeners.write().unwrap_or_else(PoisonError::into_inner);
        let subscription = Subscription(listeners.next_id);
        listeners.next_id += 1;
        listeners.entries.push((subscription, Box::new(callback)));
        subscription
    }
    
    /// Remove a listener. Unknown or already removed subscriptions are ignored.
    pub fn unsubscribe(&self, subscription: Subscription) {
        let mut listeners = self.listeners.write().unwrap_or_else(PoisonError::into_inner);
        listeners.entries.retain(|(id, _)| *id != subscription);
    }
    
    pub fn listener_count(&self) -> usize {
        self.listeners.read().unwrap_or_else(PoisonError::into_inner).entries.len()
    }
    
    fn notify(&self) {
        let listeners = self.listeners.read().unwrap_or_else(PoisonError::into_inner);
        for (_, listener) in &listeners.entries {
            listener();
        }
    }
}

impl<T: Clone + Send + Sync + 'static> Clone for State<T> {
    fn clone(&self) -> Self {
        Self {
            value: Arc::clone(&self.value),
            listeners: Arc::clone(&self.listeners),
        }
    }
}

impl<T: Clone + Send + Sync + std::fmt::Debug + 'static> std::fmt::Debug for State<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.with(|value| f.debug_tuple("State").field(value).finish())
    }
}
