//! Configuration loading and merging logic.
//!
//! Loads the user config file and merges it over the built-in defaults.
//! A missing file is not an error; a malformed one is.

use crate::config::types::{Config, DaemonSettings, NotificationConfig, PomoConfig, TimerConfig};
use crate::config::validation::validate_config;
use crate::errors::ConfigError;
use std::fs;
use std::path::Path;

/// Load configuration from the hierarchy of config files.
///
/// Loads and merges configuration from:
/// 1. Default values
/// 2. User config (`<pomo_dir>/config.toml`)
///
/// # Errors
///
/// Returns an error if the file cannot be parsed or validation fails.
/// A missing config file is not an error.
pub fn load_hierarchy(paths: &Config) -> Result<PomoConfig, ConfigError> {
    let mut config = PomoConfig::default();

    if let Some(user_config) = load_config_file(&paths.config_path())? {
        config = merge_configs(config, user_config);
    }

    validate_config(&config)?;

    Ok(config)
}

/// Load a configuration file from the given path.
///
/// Returns `Ok(None)` when the file does not exist.
pub fn load_config_file(path: &Path) -> Result<Option<PomoConfig>, ConfigError> {
    let content = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
        Err(e) => return Err(ConfigError::IoError { source: e }),
    };

    let config: PomoConfig =
        toml::from_str(&content).map_err(|e| ConfigError::ConfigParseError {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;

    tracing::debug!(
        event = "core.config.file_loaded",
        path = %path.display(),
    );

    Ok(Some(config))
}

/// Merge two configurations, with override_config taking precedence.
///
/// Optional fields are replaced only when the override sets them.
pub fn merge_configs(base: PomoConfig, override_config: PomoConfig) -> PomoConfig {
    PomoConfig {
        timer: TimerConfig {
            work_minutes: override_config
                .timer
                .work_minutes
                .or(base.timer.work_minutes),
            break_minutes: override_config
                .timer
                .break_minutes
                .or(base.timer.break_minutes),
        },
        // No way to tell an explicit `true` from the default, so the override wins
        notifications: NotificationConfig {
            enabled: override_config.notifications.enabled,
        },
        daemon: DaemonSettings {
            socket_path: override_config
                .daemon
                .socket_path
                .or(base.daemon.socket_path),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_missing_file_yields_defaults() {
        let temp_dir = tempfile::tempdir().unwrap();
        let paths = Config::with_dir(temp_dir.path());

        let config = load_hierarchy(&paths).unwrap();
        assert_eq!(config, PomoConfig::default());
        assert_eq!(config.timer.work_duration_secs(), 1500);
    }

    #[test]
    fn test_user_file_overrides_defaults() {
        let temp_dir = tempfile::tempdir().unwrap();
        let paths = Config::with_dir(temp_dir.path());
        fs::write(
            paths.config_path(),
            r#"
[timer]
work_minutes = 50

[notifications]
enabled = false
"#,
        )
        .unwrap();

        let config = load_hierarchy(&paths).unwrap();
        assert_eq!(config.timer.work_duration_secs(), 3000);
        assert_eq!(config.timer.break_duration_secs(), 300);
        assert!(!config.notifications.enabled);
    }

    #[test]
    fn test_invalid_toml_is_parse_error() {
        let temp_dir = tempfile::tempdir().unwrap();
        let paths = Config::with_dir(temp_dir.path());
        fs::write(paths.config_path(), "invalid toml [[[").unwrap();

        let err = load_hierarchy(&paths).unwrap_err();
        assert!(matches!(err, ConfigError::ConfigParseError { .. }));
    }

    #[test]
    fn test_zero_duration_fails_validation() {
        let temp_dir = tempfile::tempdir().unwrap();
        let paths = Config::with_dir(temp_dir.path());
        fs::write(paths.config_path(), "[timer]\nbreak_minutes = 0\n").unwrap();

        let err = load_hierarchy(&paths).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidConfiguration { .. }));
    }

    #[test]
    fn test_merge_keeps_base_when_override_unset() {
        let base = PomoConfig {
            timer: TimerConfig {
                work_minutes: Some(40),
                break_minutes: Some(8),
            },
            daemon: DaemonSettings {
                socket_path: Some(PathBuf::from("/tmp/a.sock")),
            },
            ..Default::default()
        };
        let override_config = PomoConfig {
            timer: TimerConfig {
                work_minutes: None,
                break_minutes: Some(3),
            },
            ..Default::default()
        };

        let merged = merge_configs(base, override_config);
        assert_eq!(merged.timer.work_minutes, Some(40));
        assert_eq!(merged.timer.break_minutes, Some(3));
        assert_eq!(merged.daemon.socket_path, Some(PathBuf::from("/tmp/a.sock")));
    }
}
