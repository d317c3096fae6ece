//! Configuration module for Supplyboard.
//!
//! Handles the settings file, environment variable expansion and defaults.

mod settings;

pub use settings::{
    expand_env_vars, DashboardSettings, DataSettings, LoggingSettings, ServerSettings, Settings,
    SettingsError,
};
