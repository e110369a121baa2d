//! Default implementations for configuration types.
//!
//! This module contains all `Default` implementations and helper functions
//! for providing default values in serde deserialization.

use crate::config::types::{Config, NotificationConfig, PomoConfig, TimerConfig};
use std::path::PathBuf;

/// Default work phase length in minutes.
pub const DEFAULT_WORK_MINUTES: u64 = 25;

/// Default break phase length in minutes.
pub const DEFAULT_BREAK_MINUTES: u64 = 5;

/// Environment variable that relocates the pomo directory.
pub const POMO_HOME_ENV: &str = "POMO_HOME";

/// Returns whether notifications are enabled by default (true).
///
/// Used by serde `#[serde(default = "...")]` attribute.
pub fn default_notifications_enabled() -> bool {
    true
}

impl Default for NotificationConfig {
    fn default() -> Self {
        Self {
            enabled: default_notifications_enabled(),
        }
    }
}

impl TimerConfig {
    /// Work phase length in seconds.
    pub fn work_duration_secs(&self) -> i64 {
        minutes_to_secs(self.work_minutes.unwrap_or(DEFAULT_WORK_MINUTES))
    }

    /// Break phase length in seconds.
    pub fn break_duration_secs(&self) -> i64 {
        minutes_to_secs(self.break_minutes.unwrap_or(DEFAULT_BREAK_MINUTES))
    }
}

fn minutes_to_secs(minutes: u64) -> i64 {
    i64::try_from(minutes.saturating_mul(60)).unwrap_or(i64::MAX)
}

impl PomoConfig {
    /// Resolve the daemon socket path, honoring the config override.
    pub fn socket_path(&self, paths: &Config) -> PathBuf {
        self.daemon
            .socket_path
            .clone()
            .unwrap_or_else(|| paths.socket_path())
    }
}

impl Default for Config {
    fn default() -> Self {
        if let Ok(dir) = std::env::var(POMO_HOME_ENV)
            && !dir.is_empty()
        {
            return Self {
                pomo_dir: PathBuf::from(dir),
            };
        }

        let pomo_dir = match dirs::home_dir() {
            Some(home) => home.join(".pomo"),
            None => {
                eprintln!(
                    "Warning: Could not find home directory. Set HOME or {} environment variable. \
                    Using fallback directory.",
                    POMO_HOME_ENV
                );
                std::env::temp_dir().join(".pomo")
            }
        };

        Self { pomo_dir }
    }
}

impl Config {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a config rooted at an explicit directory.
    pub fn with_dir(pomo_dir: impl Into<PathBuf>) -> Self {
        Self {
            pomo_dir: pomo_dir.into(),
        }
    }

    /// Directory holding one JSON file per persisted key.
    pub fn data_dir(&self) -> PathBuf {
        self.pomo_dir.join("data")
    }

    pub fn socket_path(&self) -> PathBuf {
        self.pomo_dir.join("daemon.sock")
    }

    pub fn config_path(&self) -> PathBuf {
        self.pomo_dir.join("config.toml")
    }
}
