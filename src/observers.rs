//! Explicit publish/subscribe channel owned by a store.

use std::sync::{Arc, Mutex, MutexGuard};

type ObserverId = u64;

struct Observers<T: ?Sized> {
    entries: Vec<(ObserverId, Arc<dyn Fn(&T) + Send + Sync>)>,
    next_id: ObserverId,
}

/// List of listeners notified synchronously with a `&T`.
///
/// Clones share the same list. Notification snapshots the listeners first,
/// so a listener may subscribe, unsubscribe or trigger another notification
/// without deadlocking.
pub struct ObserverList<T: ?Sized> {
    inner: Arc<Mutex<Observers<T>>>,
}

impl<T: ?Sized + 'static> ObserverList<T> {
    pub fn new() -> Self {
        Self {
            inner: Arc::new(Mutex::new(Observers {
                entries: Vec::new(),
                next_id: 0,
            })),
        }
    }

    #[must_use = "dropping the subscription detaches the listener"]
    pub fn subscribe<F>(&self, listener: F) -> Subscription
    where
        F: Fn(&T) + Send + Sync + 'static,
    {
        let id = {
            let mut observers = lock(&self.inner);
            let id = observers.next_id;
            observers.next_id += 1;
            observers.entries.push((id, Arc::new(listener)));
            id
        };

        let weak = Arc::downgrade(&self.inner);
        Subscription {
            detach: Some(Box::new(move || {
                if let Some(inner) = weak.upgrade() {
                    lock(&inner).entries.retain(|(entry_id, _)| *entry_id != id);
                }
            })),
        }
    }

    pub fn notify(&self, value: &T) {
        let listeners: Vec<_> = lock(&self.inner).entries.iter().map(|(_, l)| l.clone()).collect();
        for listener in listeners {
            listener(value);
        }
    }

    pub fn len(&self) -> usize {
        lock(&self.inner).entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<T: ?Sized + 'static> Default for ObserverList<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: ?Sized> Clone for ObserverList<T> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

fn lock<T: ?Sized>(inner: &Mutex<Observers<T>>) -> MutexGuard<'_, Observers<T>> {
    inner.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

/// Keeps a listener attached until dropped.
pub struct Subscription {
    detach: Option<Box<dyn FnOnce() + Send + Sync>>,
}

impl Subscription {
    /// Detach the listener now instead of waiting for drop
    pub fn unsubscribe(mut self) {
        self.run_detach();
    }

    fn run_detach(&mut self) {
        if let Some(detach) = self.detach.take() {
            detach();
        }
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.run_detach();
    }
}
