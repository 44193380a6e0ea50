//! Client configuration.
//!
//! Settings are plain JSON so the browser build can keep them in localStorage
//! and the native front-end can read them from a file.

use serde::{Deserialize, Serialize};

use crate::constants::{CONFIG_STORAGE_KEY, DEFAULT_ENDPOINT, DEFAULT_UPLOAD_FIELD};
use crate::preference::KeyValueStore;

/// Log level setting for the client.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    /// Show only errors
    Error,
    /// Show errors and warnings
    Warn,
    /// Show errors, warnings, and info messages
    #[default]
    Info,
    /// Show debug-level logging
    Debug,
    /// Show all log messages including trace
    Trace,
}

impl LogLevel {
    /// Parse a level name, case-insensitively.
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "error" => Some(LogLevel::Error),
            "warn" => Some(LogLevel::Warn),
            "info" => Some(LogLevel::Info),
            "debug" => Some(LogLevel::Debug),
            "trace" => Some(LogLevel::Trace),
            _ => None,
        }
    }

    /// Convert to log crate's LevelFilter.
    pub fn to_level_filter(&self) -> log::LevelFilter {
        match self {
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }

    /// Convert to a concrete log::Level (for loggers that need one).
    pub fn to_level(&self) -> log::Level {
        match self {
            LogLevel::Error => log::Level::Error,
            LogLevel::Warn => log::Level::Warn,
            LogLevel::Info => log::Level::Info,
            LogLevel::Debug => log::Level::Debug,
            LogLevel::Trace => log::Level::Trace,
        }
    }
}

/// Current configuration format version.
/// Increment this when making breaking changes to the config format.
pub const CONFIG_VERSION: u32 = 1;

/// Settings shared by the browser and native front-ends.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Version of the configuration format
    pub version: u32,

    /// URL (or path, in the browser) of the prediction endpoint
    #[serde(default = "default_endpoint")]
    pub endpoint: String,

    /// Multipart field carrying the image
    #[serde(default = "default_upload_field")]
    pub upload_field: String,

    /// Log verbosity level
    #[serde(default)]
    pub log_level: LogLevel,
}

fn default_endpoint() -> String {
    DEFAULT_ENDPOINT.to_string()
}

fn default_upload_field() -> String {
    DEFAULT_UPLOAD_FIELD.to_string()
}

impl ClientConfig {
    /// Create a configuration with default values.
    pub fn new() -> Self {
        Self {
            version: CONFIG_VERSION,
            endpoint: default_endpoint(),
            upload_field: default_upload_field(),
            log_level: LogLevel::default(),
        }
    }

    /// Deserialize configuration from JSON.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;

        if config.version > CONFIG_VERSION {
            return Err(ConfigError::VersionTooNew {
                file_version: config.version,
                supported_version: CONFIG_VERSION,
            });
        }

        Ok(config)
    }

    /// Load configuration from a JSON file.
    pub fn load_from_path(path: &std::path::Path) -> Result<Self, ConfigError> {
        let json = std::fs::read_to_string(path)?;
        let config = Self::from_json(&json)?;
        log::info!("Loaded configuration from {:?}", path);
        Ok(config)
    }

    /// Try to load configuration from a key-value store.
    /// Returns None if nothing is stored or it can't be parsed.
    pub fn load_from_store(store: &dyn KeyValueStore) -> Option<Self> {
        match store.get(CONFIG_STORAGE_KEY) {
            Ok(Some(json)) => match Self::from_json(&json) {
                Ok(config) => {
                    log::info!("Loaded configuration from storage");
                    Some(config)
                }
                Err(e) => {
                    log::warn!("Failed to parse stored configuration: {}", e);
                    None
                }
            },
            Ok(None) => {
                log::debug!("No configuration found in storage");
                None
            }
            Err(e) => {
                log::warn!("Failed to read configuration from storage: {}", e);
                None
            }
        }
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Errors that can occur when loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// JSON parsing error
    #[error("Failed to parse configuration: {0}")]
    ParseError(#[from] serde_json::Error),

    /// Configuration version is newer than supported
    #[error(
        "Configuration file version {file_version} is newer than supported version {supported_version}"
    )]
    VersionTooNew {
        file_version: u32,
        supported_version: u32,
    },

    /// I/O error when reading a config file
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),
}
