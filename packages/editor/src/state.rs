//! # Reactive State Cells
//!
//! An [`Atom`] holds one value owned by editor state management. Writes
//! replace the value wholesale and notify every observer synchronously, in
//! subscription order, on the writer's thread.
//!
//! Observers are registered with [`Atom::subscribe`] and stay registered for
//! as long as the returned [`Subscription`] is alive.

use crate::EditorError;
use parking_lot::{Mutex, RwLock};
use std::fmt;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, Weak};

type Observer<T> = Arc<dyn Fn(Arc<T>) + Send + Sync>;

struct AtomInner<T> {
    key: String,
    value: RwLock<Arc<T>>,
    observers: Mutex<Vec<(u64, Observer<T>)>>,
    next_observer_id: AtomicU64,
    read_only: AtomicBool,
}

/// Shared handle to a reactive cell
pub struct Atom<T> {
    inner: Arc<AtomInner<T>>,
}

impl<T> Clone for Atom<T> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for Atom<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Atom")
            .field("key", &self.inner.key)
            .field("value", &*self.inner.value.read())
            .finish()
    }
}

impl<T: Send + Sync + 'static> Atom<T> {
    pub fn new(key: impl Into<String>, value: T) -> Self {
        Self {
            inner: Arc::new(AtomInner {
                key: key.into(),
                value: RwLock::new(Arc::new(value)),
                observers: Mutex::new(Vec::new()),
                next_observer_id: AtomicU64::new(0),
                read_only: AtomicBool::new(false),
            }),
        }
    }

    pub fn key(&self) -> &str {
        &self.inner.key
    }

    /// Current value
    pub fn get(&self) -> Arc<T> {
        self.inner.value.read().clone()
    }

    /// Replace the value and notify observers
    pub fn set(&self, value: T) -> Result<(), EditorError> {
        if self.inner.read_only.load(Ordering::Acquire) {
            return Err(EditorError::ReadOnly {
                atom: self.inner.key.clone(),
            });
        }

        let value = Arc::new(value);
        *self.inner.value.write() = value.clone();

        // Observers may read or subscribe to this atom; don't hold the lock
        let observers: Vec<Observer<T>> = self
            .inner
            .observers
            .lock()
            .iter()
            .map(|(_, observer)| observer.clone())
            .collect();

        tracing::trace!(atom = %self.inner.key, observers = observers.len(), "atom updated");

        for observer in observers {
            observer(value.clone());
        }

        Ok(())
    }

    /// Reject further writes through [`Atom::set`]
    pub fn freeze(&self) {
        self.inner.read_only.store(true, Ordering::Release);
    }

    pub fn is_read_only(&self) -> bool {
        self.inner.read_only.load(Ordering::Acquire)
    }

    /// Register an observer; it is removed when the subscription drops
    pub fn subscribe(&self, observer: impl Fn(Arc<T>) + Send + Sync + 'static) -> Subscription {
        let id = self.inner.next_observer_id.fetch_add(1, Ordering::Relaxed);
        self.inner.observers.lock().push((id, Arc::new(observer)));

        let weak: Weak<AtomInner<T>> = Arc::downgrade(&self.inner);
        Subscription {
            unsubscribe: Some(Box::new(move || {
                if let Some(inner) = weak.upgrade() {
                    inner.observers.lock().retain(|(observer_id, _)| *observer_id != id);
                }
            })),
        }
    }

    pub fn observer_count(&self) -> usize {
        self.inner.observers.lock().len()
    }

    /// Read-only view of this atom
    pub fn reader(&self) -> AtomReader<T> {
        AtomReader { atom: self.clone() }
    }
}

/// Read-only handle to a reactive cell
pub struct AtomReader<T> {
    atom: Atom<T>,
}

impl<T> Clone for AtomReader<T> {
    fn clone(&self) -> Self {
        Self {
            atom: self.atom.clone(),
        }
    }
}

impl<T: Send + Sync + 'static> AtomReader<T> {
    pub fn key(&self) -> &str {
        self.atom.key()
    }

    pub fn get(&self) -> Arc<T> {
        self.atom.get()
    }

    pub fn subscribe(&self, observer: impl Fn(Arc<T>) + Send + Sync + 'static) -> Subscription {
        self.atom.subscribe(observer)
    }
}

/// Observer registration guard
pub struct Subscription {
    unsubscribe: Option<Box<dyn FnOnce() + Send + Sync>>,
}

impl Subscription {
    /// Remove the observer now
    pub fn unsubscribe(mut self) {
        if let Some(unsubscribe) = self.unsubscribe.take() {
            unsubscribe();
        }
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(unsubscribe) = self.unsubscribe.take() {
            unsubscribe();
        }
    }
}

impl fmt::Debug for Subscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscription")
            .field("active", &self.unsubscribe.is_some())
            .finish()
    }
}
