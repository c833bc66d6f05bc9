use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, PoisonError, RwLock, Weak};

type Subscriber<S> = Arc<dyn Fn(&S) + Send + Sync>;

struct Subscribers<S> {
    next_id: AtomicUsize,
    entries: RwLock<Vec<(usize, Subscriber<S>)>>,
}

/// Committed state with change subscribers.
///
/// State is only ever replaced as a whole. Subscribers run after the new
/// value is in place and no lock is held, so they may read the store again.
pub struct Store<S> {
    state: Arc<RwLock<S>>,
    subscribers: Arc<Subscribers<S>>,
}

impl<S: Clone> Store<S> {
    /// Create a new store with the given initial state.
    pub fn new(initial: S) -> Self {
        Self {
            state: Arc::new(RwLock::new(initial)),
            subscribers: Arc::new(Subscribers {
                next_id: AtomicUsize::new(0),
                entries: RwLock::new(Vec::new()),
            }),
        }
    }

    /// Get a clone of the committed state.
    pub fn get(&self) -> S {
        self.read(S::clone)
    }

    /// Read the committed state without cloning it.
    pub fn read<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&S) -> R,
    {
        let state = self.state.read().unwrap_or_else(PoisonError::into_inner);
        f(&state)
    }

    /// Replace the committed state and notify subscribers.
    pub fn commit(&self, next: S) {
        *self.state.write().unwrap_or_else(PoisonError::into_inner) = next.clone();
        self.notify(&next);
    }

    /// Subscribe to committed changes.
    ///
    /// The callback stays registered until the returned [`Subscription`]
    /// is dropped.
    #[must_use = "dropping the subscription unsubscribes immediately"]
    pub fn subscribe<F>(&self, callback: F) -> Subscription
    where
        S: 'static,
        F: Fn(&S) + Send + Sync + 'static,
    {
        let id = self.subscribers.next_id.fetch_add(1, Ordering::SeqCst);
        self.subscribers
            .entries
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .push((id, Arc::new(callback)));

        let weak: Weak<Subscribers<S>> = Arc::downgrade(&self.subscribers);
        let subscribers: Weak<dyn Unsubscribe> = weak;
        Subscription { id, subscribers }
    }

    fn notify(&self, state: &S) {
        let subscribers: Vec<Subscriber<S>> = self
            .subscribers
            .entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .map(|(_, subscriber)| Arc::clone(subscriber))
            .collect();
        for subscriber in subscribers {
            subscriber(state);
        }
    }
}

impl<S> Clone for Store<S> {
    fn clone(&self) -> Self {
        Self {
            state: Arc::clone(&self.state),
            subscribers: Arc::clone(&self.subscribers),
        }
    }
}

trait Unsubscribe: Send + Sync {
    fn remove(&self, id: usize);
}

impl<S> Unsubscribe for Subscribers<S> {
    fn remove(&self, id: usize) {
        self.entries
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .retain(|(entry, _)| *entry != id);
    }
}

/// RAII guard for a store subscription.
pub struct Subscription {
    id: usize,
    subscribers: Weak<dyn Unsubscribe>,
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(subscribers) = self.subscribers.upgrade() {
            subscribers.remove(self.id);
        }
    }
}
