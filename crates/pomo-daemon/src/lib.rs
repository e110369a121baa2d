//! pomo-daemon: background timer process for pomo.
//!
//! Owns the canonical timer state, advances it once per second while
//! running, and serves panels over a Unix socket using a JSONL protocol.
//! Snapshots are pushed to every subscribed panel after each tick and
//! phase transition.

pub mod client;
pub mod errors;
pub mod protocol;
pub mod server;
pub mod timer;
pub mod types;

pub use client::DaemonClient;
pub use errors::DaemonError;
pub use protocol::messages::{ClientMessage, DaemonMessage};
pub use server::run_server;
pub use timer::{TimerHandle, spawn_timer_worker};
pub use types::DaemonConfig;
