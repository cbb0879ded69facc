//! Listener callbacks and their ordered registry.

use std::fmt;
use std::rc::Rc;

/// A callback invoked with the new state after every dispatch.
///
/// Listeners are compared by identity: two `Listener`s are equal only if
/// one is a clone of the other. Subscribe and unsubscribe with the same
/// value (or a clone of it).
pub struct Listener<S> {
    f: Rc<dyn Fn(&S) -> anyhow::Result<()>>,
}

impl<S> Listener<S> {
    pub fn new<F>(f: F) -> Self
    where
        F: Fn(&S) -> anyhow::Result<()> + 'static,
    {
        Self { f: Rc::new(f) }
    }

    /// Wrap a callback that cannot fail.
    pub fn infallible<F>(f: F) -> Self
    where
        F: Fn(&S) + 'static,
    {
        Self::new(move |state| {
            f(state);
            Ok(())
        })
    }

    pub(crate) fn call(&self, state: &S) -> anyhow::Result<()> {
        (self.f)(state)
    }
}

impl<S> Clone for Listener<S> {
    fn clone(&self) -> Self {
        Self {
            f: Rc::clone(&self.f),
        }
    }
}

impl<S> PartialEq for Listener<S> {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.f, &other.f)
    }
}

impl<S> Eq for Listener<S> {}

impl<S> fmt::Debug for Listener<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Listener")
            .field("addr", &Rc::as_ptr(&self.f).cast::<()>())
            .finish()
    }
}

/// Ordered list of listeners. Duplicates are allowed and each entry fires
/// on its own.
pub(crate) struct ListenerList<S> {
    entries: Vec<Listener<S>>,
}

impl<S> ListenerList<S> {
    pub(crate) fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    pub(crate) fn push(&mut self, listener: Listener<S>) {
        self.entries.push(listener);
    }

    /// Remove the first entry identical to `listener`.
    ///
    /// Returns whether anything was removed.
    pub(crate) fn remove_first(&mut self, listener: &Listener<S>) -> bool {
        match self.entries.iter().position(|entry| entry == listener) {
            Some(index) => {
                self.entries.remove(index);
                true
            }
            None => false,
        }
    }

    /// Copy of the current entries, safe to iterate while the list changes.
    pub(crate) fn snapshot(&self) -> Vec<Listener<S>> {
        self.entries.clone()
    }

    pub(crate) fn len(&self) -> usize {
        self.entries.len()
    }
}
