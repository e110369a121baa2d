//! pomo-core: Core library for the pomo Pomodoro timer
//!
//! This library holds the business logic shared by the background daemon
//! and the CLI panel. It has no async runtime dependency.
//!
//! # Main Entry Points
//!
//! - [`timer`] - Timer state machine and the owning `TimerService`
//! - [`todos`] - Ordered todo list persisted on every mutation
//! - [`storage`] - Key-value persistence for counters and todos
//! - [`config`] - Configuration management
//! - [`notify`] - Best-effort desktop notifications

pub mod config;
pub mod errors;
pub mod events;
pub mod logging;
pub mod notify;
pub mod storage;
pub mod timer;
pub mod todos;

// Re-export commonly used types at crate root for convenience
pub use config::{Config, PomoConfig};
pub use errors::PomoError;
pub use notify::{BackgroundNotifier, DesktopNotifier, Notifier};
pub use storage::{FileStore, KeyValueStore, MemoryStore, StorageError};
pub use timer::{TimerEvent, TimerPhase, TimerService, TimerSnapshot};
pub use todos::{TodoError, TodoItem, TodoList};

// Re-export logging initialization
pub use logging::init_logging;
