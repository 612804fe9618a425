//! Notification channel
//!
//! A small named-event publish/subscribe component owned by each client.
//! Listeners run synchronously in registration order. A listener registered
//! with [`EventEmitter::once`] is removed before it runs, so it fires at most
//! once even if it emits the same event again.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use parking_lot::Mutex;
use qbase_domain::QuickBaseError;
use serde_json::Value;

/// Handle returned by `on` / `once`, used to remove the listener
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

type Callback<E> = Arc<dyn Fn(&E) + Send + Sync>;

struct Listener<E> {
    id: ListenerId,
    once: bool,
    callback: Callback<E>,
}

/// Named-event emitter
pub struct EventEmitter<E> {
    listeners: Mutex<HashMap<String, Vec<Listener<E>>>>,
    next_id: AtomicU64,
}

impl<E> Default for EventEmitter<E> {
    fn default() -> Self {
        Self { listeners: Mutex::new(HashMap::new()), next_id: AtomicU64::new(1) }
    }
}

impl<E> std::fmt::Debug for EventEmitter<E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let listeners = self.listeners.lock();
        let counts: HashMap<&str, usize> =
            listeners.iter().map(|(name, list)| (name.as_str(), list.len())).collect();
        f.debug_struct("EventEmitter").field("listeners", &counts).finish()
    }
}

impl<E> EventEmitter<E> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a listener for `name`.
    pub fn on<F>(&self, name: &str, callback: F) -> ListenerId
    where
        F: Fn(&E) + Send + Sync + 'static,
    {
        self.register(name, false, Arc::new(callback))
    }

    /// Register a listener that is removed after its first invocation.
    pub fn once<F>(&self, name: &str, callback: F) -> ListenerId
    where
        F: Fn(&E) + Send + Sync + 'static,
    {
        self.register(name, true, Arc::new(callback))
    }

    /// Remove one listener. Returns whether it was registered.
    pub fn off(&self, name: &str, id: ListenerId) -> bool {
        let mut listeners = self.listeners.lock();
        let Some(list) = listeners.get_mut(name) else {
            return false;
        };
        let before = list.len();
        list.retain(|listener| listener.id != id);
        let removed = list.len() != before;
        if list.is_empty() {
            listeners.remove(name);
        }
        removed
    }

    /// Remove every listener of `name`, or of all events when `None`.
    pub fn remove_all_listeners(&self, name: Option<&str>) {
        let mut listeners = self.listeners.lock();
        match name {
            Some(name) => {
                listeners.remove(name);
            }
            None => listeners.clear(),
        }
    }

    pub fn listener_count(&self, name: &str) -> usize {
        self.listeners.lock().get(name).map_or(0, Vec::len)
    }

    /// Invoke the listeners of `name` with `event`.
    ///
    /// Returns `true` when at least one listener ran. Listeners added or
    /// removed while emitting take effect from the next emit.
    pub fn emit(&self, name: &str, event: &E) -> bool {
        let snapshot: Vec<Callback<E>> = {
            let mut listeners = self.listeners.lock();
            let Some(list) = listeners.get_mut(name) else {
                return false;
            };
            let snapshot = list.iter().map(|listener| Arc::clone(&listener.callback)).collect();
            list.retain(|listener| !listener.once);
            if list.is_empty() {
                listeners.remove(name);
            }
            snapshot
        };

        for callback in &snapshot {
            callback(event);
        }
        !snapshot.is_empty()
    }

    fn register(&self, name: &str, once: bool, callback: Callback<E>) -> ListenerId {
        let id = ListenerId(self.next_id.fetch_add(1, Ordering::Relaxed));
        self.listeners.lock().entry(name.to_string()).or_default().push(Listener {
            id,
            once,
            callback,
        });
        id
    }
}

/// Lifecycle events published by the client
#[derive(Debug, Clone, PartialEq)]
pub enum ClientEvent {
    /// A request is about to be sent
    Request { action: &'static str, dbid: String },
    /// A call decoded successfully
    Success { action: &'static str },
    /// A call was rejected
    Failure { action: &'static str, error: QuickBaseError },
    /// The session ticket was stored or cleared
    TicketChanged { authenticated: bool },
    /// Application-defined payload sent through `QuickBaseClient::emit`
    Custom(Value),
}
