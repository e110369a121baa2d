//! # Configuration System
//!
//! TOML configuration for pomo.
//!
//! ## Configuration Hierarchy
//!
//! Configuration is loaded in the following order (later sources override earlier ones):
//! 1. **Hardcoded defaults** - 25 minute work phase, 5 minute break, notifications on
//! 2. **User config** - `~/.pomo/config.toml` (`$POMO_HOME/config.toml` when set)
//! 3. **CLI arguments** - Command-line flags (highest priority)
//!
//! ## Usage Example
//!
//! ```toml
//! # ~/.pomo/config.toml
//! [timer]
//! work_minutes = 50
//! break_minutes = 10
//!
//! [notifications]
//! enabled = false
//!
//! [daemon]
//! socket_path = "/tmp/pomo.sock"
//! ```
//!
//! ## Loading Configuration
//!
//! ```rust,no_run
//! use pomo_core::config::{Config, PomoConfig};
//!
//! fn example() -> Result<(), Box<dyn std::error::Error>> {
//!     let paths = Config::new();
//!     let config = PomoConfig::load_hierarchy(&paths)?;
//!     let work = config.timer.work_duration_secs();
//!     Ok(())
//! }
//! ```

pub mod defaults;
pub mod loading;
pub mod types;
pub mod validation;

// Public API exports
pub use types::{Config, DaemonSettings, NotificationConfig, PomoConfig, TimerConfig};
pub use validation::validate_config;

impl PomoConfig {
    /// Load configuration from the hierarchy of config files.
    ///
    /// See [`loading::load_hierarchy`] for details.
    pub fn load_hierarchy(paths: &Config) -> Result<Self, crate::errors::ConfigError> {
        loading::load_hierarchy(paths)
    }

    /// Validate the configuration.
    ///
    /// See [`validation::validate_config`] for details.
    pub fn validate(&self) -> Result<(), crate::errors::ConfigError> {
        validation::validate_config(self)
    }
}
