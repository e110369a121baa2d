//! Single-owner timer task.
//!
//! The `TimerService` lives inside one tokio task. Connections talk to it
//! through a `TimerHandle` (command channel with oneshot replies) and read
//! snapshots from a broadcast channel. All mutations are serialized through
//! the task, so ticks, commands and the midnight sweep never race.

mod worker;

pub use worker::{TimerCommand, TimerHandle, spawn_timer_worker};
