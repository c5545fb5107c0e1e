//! # Observables
//!
//! The change-notification primitives every store is built on.
//!
//! ```text
//! Publisher<T>    plain event stream: listeners only see values emitted
//!                 after they subscribed (router events)
//!
//! Observable<T>   a held value + a Publisher<T>: subscribing replays the
//!                 current value once, then every later change (store state)
//! ```
//!
//! Both hand out a [`Subscription`] per listener. Disposing the handle (or
//! dropping it) removes the listener from the registry, so a component that
//! owns its handles can never be called back after it is torn down.
//!
//! ## Delivery
//!
//! Delivery is synchronous and in subscription order. Listeners are
//! snapshotted before delivery, so a listener may subscribe or dispose while
//! being notified. A listener disposed mid-delivery is skipped.
//!
//! A listener must not mutate the observable that is currently notifying it.
//! Nothing guards against this; it would recurse into a nested delivery.

use std::cell::RefCell;
use std::collections::BTreeMap;
use std::rc::{Rc, Weak};

use log::debug;

type Listener<T> = Rc<dyn Fn(&T)>;

struct Registry<T> {
    next_id: u64,
    /// Keyed by a monotonically increasing id, so iteration order is
    /// subscription order.
    listeners: BTreeMap<u64, Listener<T>>,
}

/// Handle to one listener registration.
///
/// `dispose()` revokes the registration; calling it again is a no-op.
/// Dropping a handle that is still active revokes it as well.
#[must_use = "dropping a Subscription immediately unsubscribes the listener"]
pub struct Subscription {
    revoke: Option<Box<dyn FnOnce()>>,
}

impl Subscription {
    fn new(revoke: impl FnOnce() + 'static) -> Self {
        Self {
            revoke: Some(Box::new(revoke)),
        }
    }

    /// A handle that is not attached to anything.
    pub fn empty() -> Self {
        Self { revoke: None }
    }

    pub fn dispose(&mut self) {
        if let Some(revoke) = self.revoke.take() {
            revoke();
        }
    }

    pub fn is_active(&self) -> bool {
        self.revoke.is_some()
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.dispose();
    }
}

impl std::fmt::Debug for Subscription {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Subscription")
            .field("active", &self.is_active())
            .finish()
    }
}

/// Event stream without replay.
pub struct Publisher<T> {
    registry: Rc<RefCell<Registry<T>>>,
}

impl<T: 'static> Publisher<T> {
    pub fn new() -> Self {
        Self {
            registry: Rc::new(RefCell::new(Registry {
                next_id: 0,
                listeners: BTreeMap::new(),
            })),
        }
    }

    pub fn subscribe(&self, listener: impl Fn(&T) + 'static) -> Subscription {
        let id = {
            let mut registry = self.registry.borrow_mut();
            let id = registry.next_id;
            registry.next_id += 1;
            registry.listeners.insert(id, Rc::new(listener));
            id
        };
        debug!("Listener {} subscribed", id);

        let registry: Weak<RefCell<Registry<T>>> = Rc::downgrade(&self.registry);
        Subscription::new(move || {
            // The publisher may already be gone; nothing to revoke then.
            if let Some(registry) = registry.upgrade() {
                registry.borrow_mut().listeners.remove(&id);
                debug!("Listener {} disposed", id);
            }
        })
    }

    /// Deliver `value` to every listener, synchronously, in subscription order.
    pub fn emit(&self, value: &T) {
        let snapshot: Vec<(u64, Listener<T>)> = self
            .registry
            .borrow()
            .listeners
            .iter()
            .map(|(id, listener)| (*id, Rc::clone(listener)))
            .collect();

        for (id, listener) in snapshot {
            let still_registered = self.registry.borrow().listeners.contains_key(&id);
            if still_registered {
                listener(value);
            }
        }
    }

    pub fn listener_count(&self) -> usize {
        self.registry.borrow().listeners.len()
    }
}

impl<T: 'static> Default for Publisher<T> {
    fn default() -> Self {
        Self::new()
    }
}

/// A held value with replay-latest subscriptions.
pub struct Observable<T> {
    value: RefCell<T>,
    changes: Publisher<T>,
}

impl<T: Clone + 'static> Observable<T> {
    pub fn new(initial: T) -> Self {
        Self {
            value: RefCell::new(initial),
            changes: Publisher::new(),
        }
    }

    pub fn get(&self) -> T {
        self.value.borrow().clone()
    }

    /// Store `value` and notify every subscriber with it.
    pub fn set(&self, value: T) {
        self.replace(value);
        self.notify();
    }

    /// Store `value` without notifying. Returns the previous value.
    ///
    /// Pair with [`Observable::notify`] when side effects must run between
    /// the state change and the notification.
    pub fn replace(&self, value: T) -> T {
        self.value.replace(value)
    }

    /// Deliver the current value to every subscriber.
    pub fn notify(&self) {
        let current = self.get();
        self.changes.emit(&current);
    }

    /// Register `listener`. It is called once right away with the current
    /// value, then on every change.
    pub fn subscribe(&self, listener: impl Fn(&T) + 'static) -> Subscription {
        let current = self.get();
        listener(&current);
        self.changes.subscribe(listener)
    }

    pub fn listener_count(&self) -> usize {
        self.changes.listener_count()
    }
}

impl<T: Clone + Default + 'static> Default for Observable<T> {
    fn default() -> Self {
        Self::new(T::default())
    }
}
