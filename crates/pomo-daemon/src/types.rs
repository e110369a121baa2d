use std::path::PathBuf;
use std::time::Duration;

use pomo_core::config::{Config, PomoConfig};
use pomo_core::timer::PhaseDurations;

/// Daemon runtime settings.
#[derive(Debug, Clone)]
pub struct DaemonConfig {
    /// Unix socket the server listens on.
    pub socket_path: PathBuf,
    /// Directory for persisted keys.
    pub data_dir: PathBuf,
    /// Work and break lengths.
    pub durations: PhaseDurations,
    /// Fire desktop notifications on phase transitions.
    pub notifications_enabled: bool,
    /// Period of the countdown tick while running.
    pub tick_interval_ms: u64,
    /// Period of the midnight reset check.
    pub midnight_check_secs: u64,
    /// Snapshots buffered per subscriber before the oldest are skipped.
    pub broadcast_capacity: usize,
}

impl DaemonConfig {
    pub fn from_config(paths: &Config, config: &PomoConfig) -> Self {
        Self {
            socket_path: config.socket_path(paths),
            data_dir: paths.data_dir(),
            durations: PhaseDurations::from(&config.timer),
            notifications_enabled: config.notifications.enabled,
            ..Self::default()
        }
    }

    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_interval_ms.max(1))
    }

    pub fn midnight_check_interval(&self) -> Duration {
        Duration::from_secs(self.midnight_check_secs.max(1))
    }
}

impl Default for DaemonConfig {
    fn default() -> Self {
        let paths = Config::default();
        Self {
            socket_path: paths.socket_path(),
            data_dir: paths.data_dir(),
            durations: PhaseDurations::default(),
            notifications_enabled: true,
            tick_interval_ms: 1000,
            midnight_check_secs: 60,
            broadcast_capacity: 64,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pomo_core::config::TimerConfig;

    #[test]
    fn test_from_config() {
        let paths = Config::with_dir("/tmp/pomo-daemon-test");
        let config = PomoConfig {
            timer: TimerConfig {
                work_minutes: Some(30),
                break_minutes: None,
            },
            ..Default::default()
        };

        let daemon_config = DaemonConfig::from_config(&paths, &config);
        assert_eq!(
            daemon_config.socket_path,
            PathBuf::from("/tmp/pomo-daemon-test/daemon.sock")
        );
        assert_eq!(
            daemon_config.data_dir,
            PathBuf::from("/tmp/pomo-daemon-test/data")
        );
        assert_eq!(daemon_config.durations.work_secs, 1800);
        assert_eq!(daemon_config.durations.break_secs, 300);
        assert!(daemon_config.notifications_enabled);
        assert_eq!(daemon_config.tick_interval(), Duration::from_secs(1));
        assert_eq!(daemon_config.midnight_check_interval(), Duration::from_secs(60));
    }
}
