//! Unidirectional state container.
//!
//! State lives in a [`Store`] and only changes when an action is
//! dispatched through a pure [`Update`]. Listeners are told about every
//! new state, in the order they subscribed.
//!
//! ```text
//! Action ──→ Update ──→ State ──→ Listeners
//!    ↑                               │
//!    └───────────────────────────────┘
//! ```
//!
//! Updates compose: [`Update::join`] runs several updates over the same
//! state, [`Update::combine`] and [`combine!`] build a record's update
//! from one update per field.

pub mod config;
pub mod logging;
pub mod reducer;
pub mod store;
pub mod update;

pub use config::{ConfigError, StoreConfig};
pub use reducer::Reducer;
pub use store::{DispatchError, Dispatcher, Listener, Store, StoreBuilder};
pub use update::{Unmapped, Update, UpdatesFor};
