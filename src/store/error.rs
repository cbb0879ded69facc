//! Errors surfaced by [`Store::dispatch`](crate::Store::dispatch).

use thiserror::Error;

/// Errors that can occur while dispatching an action.
///
/// The transition itself cannot fail; by the time one of these is
/// returned the new state has already been committed.
#[derive(Debug, Error)]
pub enum DispatchError {
    /// A listener returned an error. Listeners after it were not notified.
    #[error("Listener #{position} of store '{store}' failed: {source}")]
    Listener {
        store: String,
        position: usize,
        #[source]
        source: anyhow::Error,
    },
}

impl DispatchError {
    /// Zero-based position of the failing listener in subscription order.
    pub fn position(&self) -> usize {
        match self {
            DispatchError::Listener { position, .. } => *position,
        }
    }
}
