use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::Mutex;
use uuid::Uuid;

use crate::error::Result;

/// A change observed on the broadcast medium.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorageEvent {
    pub key: String,
    /// `None` when the key was removed.
    pub new_value: Option<String>,
}

pub type StorageListener = Arc<dyn Fn(&StorageEvent) + Send + Sync>;

/// A host-local key-value store that tells every other handle about writes.
///
/// Listeners registered through one handle never hear about writes made
/// through that same handle. Delivery is last-write-wins with no ordering
/// guarantee across keys.
pub trait BroadcastMedium: Send + Sync {
    fn write(&self, key: &str, value: &str) -> Result<()>;

    fn read(&self, key: &str) -> Result<Option<String>>;

    fn subscribe(&self, listener: StorageListener) -> Result<Subscription>;
}

/// Keeps a listener registered. Dropping it removes the listener.
pub struct Subscription {
    cancel: Option<Box<dyn FnOnce()>>,
}

impl Subscription {
    pub fn new(cancel: impl FnOnce() + 'static) -> Self {
        Self {
            cancel: Some(Box::new(cancel)),
        }
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(cancel) = self.cancel.take() {
            cancel();
        }
    }
}

impl std::fmt::Debug for Subscription {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Subscription")
            .field("active", &self.cancel.is_some())
            .finish()
    }
}

struct ListenerEntry {
    id: u64,
    origin: Uuid,
    listener: StorageListener,
}

#[derive(Default)]
struct StoreInner {
    values: HashMap<String, String>,
    listeners: Vec<ListenerEntry>,
    next_listener: u64,
}

/// In-process medium shared by the views of one process.
#[derive(Clone, Default)]
pub struct MemoryStore {
    inner: Arc<Mutex<StoreInner>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// A new participant on this store, with its own origin.
    pub fn handle(&self) -> MemoryMedium {
        MemoryMedium {
            store: self.clone(),
            origin: Uuid::new_v4(),
        }
    }
}

#[derive(Clone)]
pub struct MemoryMedium {
    store: MemoryStore,
    origin: Uuid,
}

impl BroadcastMedium for MemoryMedium {
    fn write(&self, key: &str, value: &str) -> Result<()> {
        let listeners: Vec<StorageListener> = {
            let mut inner = self.store.inner.lock();
            inner.values.insert(key.to_string(), value.to_string());
            inner
                .listeners
                .iter()
                .filter(|entry| entry.origin != self.origin)
                .map(|entry| Arc::clone(&entry.listener))
                .collect()
        };

        // Listeners run outside the lock so they may touch the store themselves.
        let event = StorageEvent {
            key: key.to_string(),
            new_value: Some(value.to_string()),
        };
        for listener in listeners {
            listener(&event);
        }
        Ok(())
    }

    fn read(&self, key: &str) -> Result<Option<String>> {
        Ok(self.store.inner.lock().values.get(key).cloned())
    }

    fn subscribe(&self, listener: StorageListener) -> Result<Subscription> {
        let id = {
            let mut inner = self.store.inner.lock();
            let id = inner.next_listener;
            inner.next_listener += 1;
            inner.listeners.push(ListenerEntry {
                id,
                origin: self.origin,
                listener,
            });
            id
        };

        let store = self.store.clone();
        Ok(Subscription::new(move || {
            store.inner.lock().listeners.retain(|entry| entry.id != id);
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn collector() -> (StorageListener, Arc<Mutex<Vec<StorageEvent>>>) {
        let events = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&events);
        let listener: StorageListener = Arc::new(move |event| sink.lock().push(event.clone()));
        (listener, events)
    }

    #[test]
    fn test_write_reaches_other_handles_only() {
        let store = MemoryStore::new();
        let writer = store.handle();
        let reader = store.handle();

        let (own_listener, own_events) = collector();
        let (other_listener, other_events) = collector();
        let _own = writer.subscribe(own_listener).unwrap();
        let _other = reader.subscribe(other_listener).unwrap();

        writer.write("deckState", "payload").unwrap();

        assert!(own_events.lock().is_empty());
        assert_eq!(
            *other_events.lock(),
            vec![StorageEvent {
                key: "deckState".to_string(),
                new_value: Some("payload".to_string()),
            }]
        );
    }

    #[test]
    fn test_read_sees_last_write() {
        let store = MemoryStore::new();
        let a = store.handle();
        let b = store.handle();

        assert_eq!(b.read("deckState").unwrap(), None);
        a.write("deckState", "one").unwrap();
        b.write("deckState", "two").unwrap();
        assert_eq!(a.read("deckState").unwrap().as_deref(), Some("two"));
    }

    #[test]
    fn test_dropping_subscription_removes_listener() {
        let store = MemoryStore::new();
        let writer = store.handle();
        let reader = store.handle();

        let (listener, events) = collector();
        let subscription = reader.subscribe(listener).unwrap();
        writer.write("deckState", "first").unwrap();
        drop(subscription);
        writer.write("deckState", "second").unwrap();

        assert_eq!(events.lock().len(), 1);
    }
}
