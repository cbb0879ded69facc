//! The state container.
//!
//! A [`Store`] owns one state value and one [`Update`]. Every change goes
//! through [`Store::dispatch`]:
//!
//! ```text
//! dispatch(action) ──→ update(state, &action) ──→ commit ──→ listeners
//! ```
//!
//! Everything is synchronous. A listener may dispatch again; the nested
//! dispatch runs its whole cycle before the outer notification loop
//! continues. A listener that dispatches unconditionally recurses without
//! bound, and avoiding that is up to the caller.

mod error;
mod listener;

pub use error::DispatchError;
pub use listener::Listener;

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use crate::config::StoreConfig;
use crate::update::Update;

use listener::ListenerList;

type CommitHook<S> = Box<dyn Fn(&S, &S)>;

/// Single-threaded state container.
///
/// `Store` is a handle: clones refer to the same state, update and
/// listeners.
pub struct Store<S, A> {
    inner: Rc<Shared<S, A>>,
}

struct Shared<S, A> {
    config: StoreConfig,
    state: RefCell<Rc<S>>,
    update: Update<S, A>,
    listeners: RefCell<ListenerList<S>>,
    on_commit: Option<CommitHook<S>>,
}

impl<S: Clone + 'static, A: 'static> Store<S, A> {
    /// Create a store with the default config.
    ///
    /// Passing an `Rc<S>` keeps its identity: [`Store::state`] returns a
    /// pointer-equal `Rc` until the first dispatch.
    pub fn new(initial: impl Into<Rc<S>>, update: impl Into<Update<S, A>>) -> Self {
        Self::builder(initial, update).build()
    }

    pub fn builder(
        initial: impl Into<Rc<S>>,
        update: impl Into<Update<S, A>>,
    ) -> StoreBuilder<S, A> {
        StoreBuilder {
            initial: initial.into(),
            update: update.into(),
            config: StoreConfig::default(),
            on_commit: None,
        }
    }

    /// The current state.
    pub fn state(&self) -> Rc<S> {
        Rc::clone(&self.inner.state.borrow())
    }

    /// Run the update on the current state, commit the result and notify
    /// listeners in subscription order.
    ///
    /// The new state is committed even when it equals the old one. If the
    /// update panics nothing is committed and no listener runs.
    ///
    /// The committed state stays in place while the update runs, so the
    /// update is fed a clone of it: each dispatch costs one `S::clone`,
    /// O(size of state). Keep large, rarely changing parts of `S` behind an
    /// `Rc` to make that clone cheap.
    ///
    /// # Errors
    /// Returns the first listener error. The state stays committed and the
    /// listeners after the failing one are not called.
    pub fn dispatch(&self, action: A) -> Result<(), DispatchError> {
        self.inner.dispatch(action)
    }

    /// A detached handle that dispatches into this store.
    pub fn dispatcher(&self) -> Dispatcher<S, A> {
        Dispatcher {
            inner: Rc::clone(&self.inner),
        }
    }

    /// Append `listener` to the notification list.
    ///
    /// The listener is not called with the current state. Subscribing the
    /// same listener twice makes it fire twice per dispatch.
    pub fn subscribe(&self, listener: &Listener<S>) {
        let mut listeners = self.inner.listeners.borrow_mut();
        listeners.push(listener.clone());
        tracing::debug!(
            store = %self.inner.config.name,
            listeners = listeners.len(),
            "Listener subscribed"
        );
    }

    /// Remove the first subscription of `listener`. Unknown listeners are
    /// ignored.
    pub fn unsubscribe(&self, listener: &Listener<S>) {
        let mut listeners = self.inner.listeners.borrow_mut();
        if listeners.remove_first(listener) {
            tracing::debug!(
                store = %self.inner.config.name,
                listeners = listeners.len(),
                "Listener unsubscribed"
            );
        } else {
            tracing::debug!(
                store = %self.inner.config.name,
                "Unsubscribe of unknown listener ignored"
            );
        }
    }

    pub fn listener_count(&self) -> usize {
        self.inner.listeners.borrow().len()
    }

    pub fn name(&self) -> &str {
        &self.inner.config.name
    }
}

impl<S: Clone + 'static, A: 'static> Shared<S, A> {
    fn dispatch(&self, action: A) -> Result<(), DispatchError> {
        // No borrow may be held across user code: the update, the hook and
        // the listeners are all allowed to call back into the store.
        let prev = Rc::clone(&self.state.borrow());
        let next = Rc::new(self.update.apply(S::clone(&prev), &action));
        *self.state.borrow_mut() = Rc::clone(&next);

        if let Some(hook) = &self.on_commit {
            hook(&prev, &next);
        }

        let listeners = self.listeners.borrow().snapshot();
        if self.config.trace_dispatch {
            tracing::trace!(
                store = %self.config.name,
                listeners = listeners.len(),
                "Dispatched action"
            );
        }

        for (position, listener) in listeners.iter().enumerate() {
            if let Err(source) = listener.call(&next) {
                tracing::warn!(
                    store = %self.config.name,
                    position,
                    error = %source,
                    "Listener failed, skipping remaining listeners"
                );
                return Err(DispatchError::Listener {
                    store: self.config.name.clone(),
                    position,
                    source,
                });
            }
        }
        Ok(())
    }
}

impl<S, A> Clone for Store<S, A> {
    fn clone(&self) -> Self {
        Self {
            inner: Rc::clone(&self.inner),
        }
    }
}

impl<S, A> fmt::Debug for Store<S, A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Store")
            .field("name", &self.inner.config.name)
            .field("listeners", &self.inner.listeners.borrow().len())
            .field("on_commit", &self.inner.on_commit.is_some())
            .finish_non_exhaustive()
    }
}

/// Builder for a [`Store`] with non-default config or a commit hook.
pub struct StoreBuilder<S, A> {
    initial: Rc<S>,
    update: Update<S, A>,
    config: StoreConfig,
    on_commit: Option<CommitHook<S>>,
}

impl<S: Clone + 'static, A: 'static> StoreBuilder<S, A> {
    pub fn config(mut self, config: StoreConfig) -> Self {
        self.config = config;
        self
    }

    /// Call `hook(prev, next)` after every commit, before listeners run.
    ///
    /// Meant for integrations that track writes to the state (a renderer
    /// marking itself dirty, for instance). It does not take part in
    /// listener ordering or error reporting.
    pub fn on_commit<F>(mut self, hook: F) -> Self
    where
        F: Fn(&S, &S) + 'static,
    {
        self.on_commit = Some(Box::new(hook));
        self
    }

    pub fn build(self) -> Store<S, A> {
        tracing::debug!(store = %self.config.name, "Store created");
        Store {
            inner: Rc::new(Shared {
                config: self.config,
                state: RefCell::new(self.initial),
                update: self.update,
                listeners: RefCell::new(ListenerList::new()),
                on_commit: self.on_commit,
            }),
        }
    }
}

/// Dispatch handle detached from the [`Store`] value.
///
/// Holds the store's shared cell, so it keeps working wherever it is
/// moved. A listener that captures a dispatcher for its own store keeps
/// the store alive until it is unsubscribed.
pub struct Dispatcher<S, A> {
    inner: Rc<Shared<S, A>>,
}

impl<S: Clone + 'static, A: 'static> Dispatcher<S, A> {
    /// Same as [`Store::dispatch`] on the originating store.
    pub fn dispatch(&self, action: A) -> Result<(), DispatchError> {
        self.inner.dispatch(action)
    }

    /// Turn the handle into a plain closure, e.g. for a UI callback.
    pub fn into_fn(self) -> impl Fn(A) -> Result<(), DispatchError> {
        move |action| self.dispatch(action)
    }
}

impl<S, A> Clone for Dispatcher<S, A> {
    fn clone(&self) -> Self {
        Self {
            inner: Rc::clone(&self.inner),
        }
    }
}

impl<S, A> fmt::Debug for Dispatcher<S, A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Dispatcher")
            .field("store", &self.inner.config.name)
            .finish()
    }
}
