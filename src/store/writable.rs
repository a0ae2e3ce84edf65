use std::cell::{Cell, RefCell};
use std::collections::VecDeque;
use std::fmt;
use std::rc::{Rc, Weak};

type Callback<T> = Rc<dyn Fn(&T)>;

struct Inner<T> {
    value: RefCell<T>,
    subscribers: RefCell<Vec<(u64, Callback<T>)>>,
    next_id: Cell<u64>,
    // Set while a notification round runs; writes made from a callback queue here.
    dispatching: Cell<bool>,
    pending: RefCell<VecDeque<T>>,
}

impl<T> Inner<T> {
    fn is_subscribed(&self, id: u64) -> bool {
        self.subscribers.borrow().iter().any(|(sub_id, _)| *sub_id == id)
    }
}

trait Unsubscribe {
    fn remove(&self, id: u64);
}

impl<T> Unsubscribe for Inner<T> {
    fn remove(&self, id: u64) {
        self.subscribers.borrow_mut().retain(|(sub_id, _)| *sub_id != id);
        log::trace!("subscriber {id} removed");
    }
}

/// A single observable value.
///
/// Cloning a `Writable` gives another handle to the same cell. Every
/// `set` notifies all subscribers, in registration order, even when the
/// value did not change.
pub struct Writable<T> {
    inner: Rc<Inner<T>>,
}

impl<T> Clone for Writable<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Rc::clone(&self.inner),
        }
    }
}

impl<T: Clone + 'static> Writable<T> {
    #[must_use]
    pub fn new(initial: T) -> Self {
        Self {
            inner: Rc::new(Inner {
                value: RefCell::new(initial),
                subscribers: RefCell::new(Vec::new()),
                next_id: Cell::new(0),
                dispatching: Cell::new(false),
                pending: RefCell::new(VecDeque::new()),
            }),
        }
    }

    #[must_use]
    pub fn get(&self) -> T {
        self.inner.value.borrow().clone()
    }

    /// Reads the value without cloning it. `f` must not write to this cell.
    pub fn with<R>(&self, f: impl FnOnce(&T) -> R) -> R {
        f(&self.inner.value.borrow())
    }

    pub fn set(&self, value: T) {
        self.inner.value.replace(value.clone());
        self.notify(value);
    }

    /// Edits a copy of the value and writes it back. `f` may read or write
    /// the cell; its result replaces whatever is there when it returns.
    pub fn update(&self, f: impl FnOnce(&mut T)) {
        let mut value = self.get();
        f(&mut value);
        self.set(value);
    }

    /// Registers `callback`, calls it once with the current value, and
    /// again after every write until the returned handle is unsubscribed.
    pub fn subscribe(&self, callback: impl Fn(&T) + 'static) -> Subscription {
        let id = self.inner.next_id.get();
        self.inner.next_id.set(id + 1);

        let callback: Callback<T> = Rc::new(callback);
        self.inner
            .subscribers
            .borrow_mut()
            .push((id, Rc::clone(&callback)));
        log::trace!("subscriber {id} added");

        let current = self.get();
        callback(&current);

        let cell: Weak<dyn Unsubscribe> = Rc::downgrade(&self.inner) as Weak<dyn Unsubscribe>;
        Subscription { id, cell }
    }

    #[must_use]
    pub fn subscriber_count(&self) -> usize {
        self.inner.subscribers.borrow().len()
    }

    fn notify(&self, value: T) {
        if self.inner.dispatching.get() {
            log::trace!("write during notification, queued");
            self.inner.pending.borrow_mut().push_back(value);
            return;
        }

        let _guard = DispatchGuard::enter(&self.inner);
        let mut next = Some(value);
        while let Some(value) = next {
            // Snapshot so callbacks may subscribe or unsubscribe freely.
            let round: Vec<(u64, Callback<T>)> = self.inner.subscribers.borrow().clone();
            for (id, callback) in round {
                if self.inner.is_subscribed(id) {
                    callback(&value);
                }
            }
            next = self.inner.pending.borrow_mut().pop_front();
        }
    }
}

impl<T: Clone + Default + 'static> Default for Writable<T> {
    fn default() -> Self {
        Self::new(T::default())
    }
}

impl<T: fmt::Debug> fmt::Debug for Writable<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut out = f.debug_struct("Writable");
        match self.inner.value.try_borrow() {
            Ok(value) => out.field("value", &*value),
            Err(_) => out.field("value", &"<borrowed>"),
        };
        out.field("subscribers", &self.inner.subscribers.borrow().len())
            .finish()
    }
}

// Ends a notification round. A callback that panics leaves queued writes
// behind; they are dropped so a later round cannot replay them.
struct DispatchGuard<'a, T> {
    inner: &'a Inner<T>,
}

impl<'a, T> DispatchGuard<'a, T> {
    fn enter(inner: &'a Inner<T>) -> Self {
        inner.dispatching.set(true);
        Self { inner }
    }
}

impl<T> Drop for DispatchGuard<'_, T> {
    fn drop(&mut self) {
        self.inner.pending.borrow_mut().clear();
        self.inner.dispatching.set(false);
    }
}

/// Handle returned by [`Writable::subscribe`].
///
/// Dropping it leaves the callback registered; call
/// [`Subscription::unsubscribe`] to remove it.
#[must_use = "dropping a Subscription keeps the callback registered forever"]
pub struct Subscription {
    id: u64,
    cell: Weak<dyn Unsubscribe>,
}

impl Subscription {
    pub fn unsubscribe(self) {
        if let Some(cell) = self.cell.upgrade() {
            cell.remove(self.id);
        }
    }
}

impl fmt::Debug for Subscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscription")
            .field("id", &self.id)
            .field("live", &(self.cell.strong_count() > 0))
            .finish()
    }
}
