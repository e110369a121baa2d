//! Configuration type definitions for pomo.
//!
//! These types are serialized/deserialized from TOML config files.
//!
//! # Example Configuration
//!
//! ```toml
//! [timer]
//! work_minutes = 25
//! break_minutes = 5
//!
//! [notifications]
//! enabled = true
//! ```

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Runtime configuration for pomo.
///
/// Holds paths derived from environment variables and system defaults,
/// not from config files.
#[derive(Debug, Clone)]
pub struct Config {
    /// Base directory for all pomo data (default: ~/.pomo, or $POMO_HOME)
    pub pomo_dir: PathBuf,
}

/// Main configuration loaded from the TOML config file.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct PomoConfig {
    /// Phase durations
    #[serde(default)]
    pub timer: TimerConfig,

    /// Desktop notification settings
    #[serde(default)]
    pub notifications: NotificationConfig,

    /// Daemon connection settings
    #[serde(default)]
    pub daemon: DaemonSettings,
}

/// Timer phase durations.
///
/// Unset values fall back to the classic 25/5 split.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct TimerConfig {
    /// Length of the work phase in minutes. Default: 25.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub work_minutes: Option<u64>,

    /// Length of the break phase in minutes. Default: 5.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub break_minutes: Option<u64>,
}

/// Desktop notification settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NotificationConfig {
    /// Fire a notification on every phase transition.
    #[serde(default = "super::defaults::default_notifications_enabled")]
    pub enabled: bool,
}

/// Daemon connection settings.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct DaemonSettings {
    /// Override for the Unix socket path. Default: `<pomo_dir>/daemon.sock`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub socket_path: Option<PathBuf>,
}
