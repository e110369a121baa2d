//! Configuration validation logic.

use crate::config::types::PomoConfig;
use crate::errors::ConfigError;

/// Validate a PomoConfig, returning an error if any values are invalid.
///
/// # Validation Rules
///
/// - `timer.work_minutes`, if set, must be greater than 0
/// - `timer.break_minutes`, if set, must be greater than 0
pub fn validate_config(config: &PomoConfig) -> Result<(), ConfigError> {
    if config.timer.work_minutes == Some(0) {
        return Err(ConfigError::InvalidConfiguration {
            message: "timer.work_minutes must be greater than 0".to_string(),
        });
    }

    if config.timer.break_minutes == Some(0) {
        return Err(ConfigError::InvalidConfiguration {
            message: "timer.break_minutes must be greater than 0".to_string(),
        });
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::types::TimerConfig;

    #[test]
    fn test_default_config_is_valid() {
        assert!(validate_config(&PomoConfig::default()).is_ok());
    }

    #[test]
    fn test_zero_work_minutes_rejected() {
        let config = PomoConfig {
            timer: TimerConfig {
                work_minutes: Some(0),
                break_minutes: None,
            },
            ..Default::default()
        };
        let err = validate_config(&config).unwrap_err();
        assert!(err.to_string().contains("work_minutes"));
    }

    #[test]
    fn test_zero_break_minutes_rejected() {
        let config = PomoConfig {
            timer: TimerConfig {
                work_minutes: Some(25),
                break_minutes: Some(0),
            },
            ..Default::default()
        };
        let err = validate_config(&config).unwrap_err();
        assert!(err.to_string().contains("break_minutes"));
    }
}
