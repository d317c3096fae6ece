//! TOML-based configuration for Supplyboard.
//!
//! Supports a config file (supplyboard.toml) with environment variable expansion.
//!
//! Example configuration:
//! ```toml
//! [data]
//! path = "${DATA_DIR}/supply_chain_data.csv"
//!
//! [dashboard]
//! default_page = "quality-control"
//!
//! [server]
//! host = "0.0.0.0"
//! port = 8501
//!
//! [logging]
//! filter = "supplyboard=debug"
//! ```

use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use crate::page::PageId;

/// Error type for settings.
#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("Config file not found: {0}")]
    FileNotFound(PathBuf),

    #[error("Failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),

    #[error("Failed to parse config file: {0}")]
    ParseError(#[from] toml::de::Error),

    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

/// Root configuration structure.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct Settings {
    /// Input dataset.
    pub data: DataSettings,

    /// Dashboard defaults.
    pub dashboard: DashboardSettings,

    /// HTTP server (only used with the `ui` feature).
    pub server: ServerSettings,

    /// Log filter.
    pub logging: LoggingSettings,
}

/// Input dataset settings.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct DataSettings {
    /// Path to the CSV file (supports ${ENV_VAR} expansion).
    pub path: String,
}

impl Default for DataSettings {
    fn default() -> Self {
        Self {
            path: "supply_chain_data.csv".to_string(),
        }
    }
}

impl DataSettings {
    /// Get the data path with environment variables expanded.
    pub fn resolved_path(&self) -> Result<PathBuf, SettingsError> {
        expand_env_vars(&self.path).map(PathBuf::from)
    }
}

/// Dashboard defaults.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct DashboardSettings {
    /// Page shown when none is requested (title, slug or variant name).
    pub default_page: Option<String>,
}

impl DashboardSettings {
    /// The configured start page, `Overview` when unset.
    pub fn start_page(&self) -> Result<PageId, SettingsError> {
        match &self.default_page {
            Some(name) => name
                .parse()
                .map_err(|_| SettingsError::InvalidConfig(format!("unknown default_page '{name}'"))),
            None => Ok(PageId::default()),
        }
    }
}

/// HTTP server settings.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8501,
        }
    }
}

/// Logging settings.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct LoggingSettings {
    /// `tracing_subscriber::EnvFilter` directive, overridden by `RUST_LOG`.
    pub filter: String,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            filter: "info".to_string(),
        }
    }
}

impl Settings {
    /// Load settings from a TOML file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, SettingsError> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(SettingsError::FileNotFound(path.to_path_buf()));
        }

        let content = fs::read_to_string(path)?;
        let settings: Settings = toml::from_str(&content)?;
        Ok(settings)
    }

    /// Load settings from the default config file locations.
    ///
    /// Searches in order:
    /// 1. Environment variable `SUPPLYBOARD_CONFIG`
    /// 2. `./supplyboard.toml`
    /// 3. `~/.config/supplyboard/config.toml`
    pub fn load() -> Result<Self, SettingsError> {
        if let Ok(path) = env::var("SUPPLYBOARD_CONFIG") {
            return Self::from_file(&path);
        }

        let local_config = PathBuf::from("supplyboard.toml");
        if local_config.exists() {
            return Self::from_file(&local_config);
        }

        if let Some(config_dir) = dirs::config_dir() {
            let user_config = config_dir.join("supplyboard").join("config.toml");
            if user_config.exists() {
                return Self::from_file(&user_config);
            }
        }

        Ok(Settings::default())
    }
}

/// Expand environment variables in a string.
///
/// Supports `${VAR}` and `$VAR` syntax.
pub fn expand_env_vars(s: &str) -> Result<String, SettingsError> {
    let mut result = String::with_capacity(s.len());
    let mut chars = s.chars().peekable();

    while let Some(c) = chars.next() {
        if c != '$' {
            result.push(c);
            continue;
        }

        let braced = chars.next_if_eq(&'{').is_some();
        let mut var_name = String::new();
        if braced {
            for ch in chars.by_ref() {
                if ch == '}' {
                    break;
                }
                var_name.push(ch);
            }
        } else {
            while let Some(ch) = chars.next_if(|ch| ch.is_alphanumeric() || *ch == '_') {
                var_name.push(ch);
            }
            if var_name.is_empty() {
                // A lone $ stays as is.
                result.push('$');
                continue;
            }
        }

        let value =
            env::var(&var_name).map_err(|_| SettingsError::MissingEnvVar(var_name.clone()))?;
        result.push_str(&value);
    }

    Ok(result)
}
