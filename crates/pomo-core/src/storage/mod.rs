//! Key-value persistence.
//!
//! Values are JSON documents addressed by key. The daemon persists
//! `completedPomodoros`; the panel persists `todos`. Each key lives in its
//! own file so the two processes never rewrite each other's data.

pub mod errors;
pub mod keys;
pub mod store;

pub use errors::StorageError;
pub use keys::{COMPLETED_POMODOROS_KEY, TODOS_KEY, load, save, seed_defaults};
pub use store::{FileStore, KeyValueStore, MemoryStore};
