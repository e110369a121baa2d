use pomo_core::TimerSnapshot;
use serde::{Deserialize, Serialize};

/// Messages sent from panels (clients) to the daemon.
///
/// Every request carries an `id` that the daemon echoes back in its
/// response so a client can match replies while pushes are interleaved.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type")]
pub enum ClientMessage {
    /// Begin or resume the countdown. A no-op if already running.
    #[serde(rename = "startTimer")]
    StartTimer { id: String },

    /// Pause the countdown, keeping the remaining time.
    #[serde(rename = "stopTimer")]
    StopTimer { id: String },

    /// Request the current snapshot.
    #[serde(rename = "getTimerState")]
    GetTimerState { id: String },

    /// Receive a `timerUpdate` push after every state change.
    #[serde(rename = "subscribe")]
    Subscribe { id: String },

    #[serde(rename = "ping")]
    Ping { id: String },

    /// Stop the daemon process.
    #[serde(rename = "shutdown")]
    Shutdown { id: String },
}

impl ClientMessage {
    pub fn id(&self) -> &str {
        match self {
            ClientMessage::StartTimer { id }
            | ClientMessage::StopTimer { id }
            | ClientMessage::GetTimerState { id }
            | ClientMessage::Subscribe { id }
            | ClientMessage::Ping { id }
            | ClientMessage::Shutdown { id } => id,
        }
    }
}

/// Messages sent from the daemon to panels.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type")]
pub enum DaemonMessage {
    /// Acknowledgement for start, stop, subscribe, ping and shutdown.
    #[serde(rename = "ack")]
    Ack { id: String, success: bool },

    /// Response to `getTimerState`.
    #[serde(rename = "timerState")]
    TimerState {
        id: String,
        #[serde(flatten)]
        snapshot: TimerSnapshot,
    },

    /// Unsolicited push after a tick, start, stop, phase change or counter reset.
    #[serde(rename = "timerUpdate")]
    TimerUpdate {
        #[serde(flatten)]
        snapshot: TimerSnapshot,
    },

    #[serde(rename = "error")]
    Error {
        id: String,
        code: String,
        message: String,
    },
}
