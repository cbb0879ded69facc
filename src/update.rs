//! Pure transition functions and the combinators that compose them.
//!
//! An [`Update`] is a pure function `(state, &action) -> state`. Small
//! updates are composed into larger ones without the store knowing about
//! the composition:
//!
//! ```text
//! join:     u1 ──→ u2 ──→ u3          (same state, left to right)
//! combine:  { a: ua, b: ub }          (one update per field)
//! ```

use std::collections::BTreeMap;
use std::fmt;
use std::rc::Rc;

use crate::reducer::Reducer;

/// A pure transition function over state `S` driven by actions `A`.
///
/// State is threaded by value, so an update that does not care about an
/// action simply returns the state it was given. The action is borrowed so
/// that every update in a composition sees the same action.
pub struct Update<S, A> {
    f: Rc<dyn Fn(S, &A) -> S>,
}

impl<S, A> Update<S, A> {
    pub fn new<F>(f: F) -> Self
    where
        F: Fn(S, &A) -> S + 'static,
    {
        Self { f: Rc::new(f) }
    }

    /// Convert a function or an existing update into an `Update`.
    pub fn lift(update: impl Into<Self>) -> Self {
        update.into()
    }

    /// Apply this update to `state`.
    pub fn apply(&self, state: S, action: &A) -> S {
        (self.f)(state, action)
    }
}

impl<S: 'static, A: 'static> Update<S, A> {
    /// The update that returns its input state unchanged.
    pub fn identity() -> Self {
        Self::new(|state, _| state)
    }

    /// Lift a [`Reducer`] implementation into an update.
    pub fn of<R>() -> Self
    where
        R: Reducer<State = S, Action = A> + 'static,
    {
        Self::new(R::reduce)
    }

    /// Sequential composition: each update runs in order, receiving the
    /// state produced by the one before it.
    ///
    /// An empty list yields the identity update.
    pub fn join<I>(updates: I) -> Self
    where
        I: IntoIterator<Item = Update<S, A>>,
    {
        let updates: Vec<Update<S, A>> = updates.into_iter().collect();
        Self::new(move |state, action| {
            updates
                .iter()
                .fold(state, |state, update| update.apply(state, action))
        })
    }

    /// `self` followed by `next`.
    pub fn then(self, next: Update<S, A>) -> Self {
        Self::join([self, next])
    }
}

impl<K, V, A> Update<BTreeMap<K, V>, A>
where
    K: Ord + Clone + fmt::Debug + 'static,
    V: Default + 'static,
    A: 'static,
{
    /// Field-wise composition over a map-shaped record.
    ///
    /// Every key registered in `updates` is produced by its own update,
    /// fed the current value for that key (or `V::default()` if the key is
    /// missing). Keys with no registered update follow the mapping's
    /// [`Unmapped`] policy.
    pub fn combine(updates: UpdatesFor<K, V, A>) -> Self {
        let UpdatesFor { fields, unmapped } = updates;
        Self::new(move |mut state: BTreeMap<K, V>, action| {
            let mut next = BTreeMap::new();
            for (key, update) in &fields {
                let current = state.remove(key).unwrap_or_default();
                next.insert(key.clone(), update.apply(current, action));
            }
            match unmapped {
                Unmapped::Retain => next.extend(state),
                Unmapped::Drop => {
                    for key in state.keys() {
                        tracing::warn!(field = ?key, "combine dropped field with no update");
                    }
                }
            }
            next
        })
    }
}

impl<S, A> Clone for Update<S, A> {
    fn clone(&self) -> Self {
        Self {
            f: Rc::clone(&self.f),
        }
    }
}

impl<S, A> fmt::Debug for Update<S, A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Update").finish_non_exhaustive()
    }
}

impl<S, A, F> From<F> for Update<S, A>
where
    F: Fn(S, &A) -> S + 'static,
{
    fn from(f: F) -> Self {
        Self::new(f)
    }
}

/// What [`Update::combine`] does with record fields that have no update.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Unmapped {
    /// Leave the field out of the next state. A warning is logged per
    /// dropped field.
    #[default]
    Drop,
    /// Copy the field into the next state unchanged.
    Retain,
}

/// Mapping from field name to the update for that field's value.
pub struct UpdatesFor<K, V, A> {
    fields: BTreeMap<K, Update<V, A>>,
    unmapped: Unmapped,
}

impl<K: Ord, V, A> UpdatesFor<K, V, A> {
    pub fn new() -> Self {
        Self {
            fields: BTreeMap::new(),
            unmapped: Unmapped::default(),
        }
    }

    /// Register the update for `key`, replacing any earlier one.
    pub fn field(mut self, key: K, update: impl Into<Update<V, A>>) -> Self {
        self.fields.insert(key, update.into());
        self
    }

    pub fn unmapped(mut self, policy: Unmapped) -> Self {
        self.unmapped = policy;
        self
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl<K: Ord, V, A> Default for UpdatesFor<K, V, A> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V, A> FromIterator<(K, Update<V, A>)> for UpdatesFor<K, V, A>
where
    K: Ord,
{
    fn from_iter<I: IntoIterator<Item = (K, Update<V, A>)>>(iter: I) -> Self {
        Self {
            fields: iter.into_iter().collect(),
            unmapped: Unmapped::default(),
        }
    }
}

/// Field-wise composition over a struct-shaped record.
///
/// ```
/// use tessera::{combine, Update};
///
/// enum Action {
///     Increment,
///     Decrement,
/// }
///
/// struct Counters {
///     up: i32,
///     down: i32,
/// }
///
/// fn increment(n: i32, action: &Action) -> i32 {
///     match action {
///         Action::Increment => n + 1,
///         Action::Decrement => n,
///     }
/// }
///
/// fn decrement(n: i32, action: &Action) -> i32 {
///     match action {
///         Action::Increment => n,
///         Action::Decrement => n - 1,
///     }
/// }
///
/// let update: Update<Counters, Action> = combine!(Counters {
///     up: increment,
///     down: decrement,
/// });
///
/// let next = update.apply(Counters { up: 0, down: 3 }, &Action::Decrement);
/// assert_eq!((next.up, next.down), (0, 2));
/// ```
///
/// The expansion is a struct literal, so every field of the struct must
/// be given an update; a missing field is a compile error. The record may
/// be named by a path (`shapes::Counters`) but not with generic arguments;
/// alias a generic record with `type` first.
///
/// All update expressions are evaluated before any field name is bound,
/// so an expression may refer to a local variable that shares its name
/// with another field.
#[macro_export]
macro_rules! combine {
    ($($record:ident)::+ { $($field:ident : $update:expr),+ $(,)? }) => {{
        let ($($field,)+) = ($($crate::Update::lift($update),)+);
        $crate::Update::new(move |state: $($record)::+, action| $($record)::+ {
            $( $field: $field.apply(state.$field, action), )+
        })
    }};
}
