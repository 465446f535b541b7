//! Local state stores.
//!
//! - [`DurableStore`] / [`Persisted`]: typed values on a durable medium
//! - [`KnownThreadIndex`]: every ThreadId this client has seen
//! - [`SessionMap`]: UI session → thread binding and display metadata
//! - [`ActivePointer`]: transient focus pointers

mod active;
mod durable;
mod known_threads;
mod sessions;

pub use active::ActivePointer;
pub use durable::{DurableStore, Persisted};
pub use known_threads::{KnownThreadIndex, KNOWN_THREADS_KEY};
pub use sessions::{SessionMap, Sessions, UI_SESSIONS_KEY};
