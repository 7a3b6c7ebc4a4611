//! Runtime configuration (`runtime.toml`).
//!
//! Sources, detection policy, log level and the digital lines to create.
//! Every section is optional; an empty file yields the defaults.
//!
//! # Usage
//!
//! ```rust,no_run
//! use sbc_common::config::{ConfigLoader, RuntimeConfig, ConfigError};
//! use std::path::Path;
//!
//! fn main() -> Result<(), ConfigError> {
//!     let config = RuntimeConfig::load(Path::new("runtime.toml"))?;
//!     config.validate()?;
//!     println!("{} line(s) configured", config.lines.len());
//!     Ok(())
//! }
//! ```

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::consts::{DEFAULT_CPU_INFO_PATH, DEFAULT_DEVICE_MODEL_PATH, DEFAULT_MEM_INFO_PATH};
use crate::io::config::DigitalConfig;

/// Configuration load or validation failure.
#[derive(Debug, Clone, Error)]
pub enum ConfigError {
    /// The file does not exist.
    #[error("configuration file not found")]
    FileNotFound,

    /// The file is unreadable or not valid TOML for this schema.
    #[error("invalid configuration: {0}")]
    ParseError(String),

    /// Parsed, but the values are inconsistent.
    #[error("configuration rejected: {0}")]
    ValidationError(String),
}

/// `log_level` values, written lowercase in TOML.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Trace,
    Debug,
    #[default]
    Info,
    Warn,
    Error,
}

impl From<LogLevel> for tracing::Level {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Trace => tracing::Level::TRACE,
            LogLevel::Debug => tracing::Level::DEBUG,
            LogLevel::Info => tracing::Level::INFO,
            LogLevel::Warn => tracing::Level::WARN,
            LogLevel::Error => tracing::Level::ERROR,
        }
    }
}

/// Common configuration fields shared across all SBC applications.
///
/// # TOML Example
///
/// ```toml
/// [shared]
/// log_level = "debug"
/// service_name = "sbc-hal"
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SharedConfig {
    /// Logging verbosity level.
    #[serde(default)]
    pub log_level: LogLevel,

    /// Name reported in logs.
    pub service_name: String,
}

impl SharedConfig {
    /// # Errors
    /// `ConfigError::ValidationError` for an empty `service_name`.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.service_name.is_empty() {
            return Err(ConfigError::ValidationError("empty service_name".into()));
        }
        Ok(())
    }
}

impl Default for SharedConfig {
    fn default() -> Self {
        Self {
            log_level: LogLevel::default(),
            service_name: crate::consts::HAL_SERVICE_NAME.to_string(),
        }
    }
}

/// OS text sources used for board identification.
///
/// Every path can be overridden, which is how tests feed fixture files.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BoardSources {
    /// CPU information file (`Revision` line).
    pub cpu_info: PathBuf,
    /// Device-tree model file.
    pub device_model: PathBuf,
    /// Memory information file (`MemTotal:` line).
    pub mem_info: PathBuf,
}

impl Default for BoardSources {
    fn default() -> Self {
        Self {
            cpu_info: PathBuf::from(DEFAULT_CPU_INFO_PATH),
            device_model: PathBuf::from(DEFAULT_DEVICE_MODEL_PATH),
            mem_info: PathBuf::from(DEFAULT_MEM_INFO_PATH),
        }
    }
}

/// Which detection channel is consulted first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum DetectionPrecedence {
    /// CPU revision code first, device-tree model as fallback.
    #[default]
    CodeFirst,
    /// Device-tree model first, CPU revision code as fallback.
    NameFirst,
}

/// `[detection]` section.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct DetectionConfig {
    /// Channel precedence policy.
    pub precedence: DetectionPrecedence,
}

/// Complete runtime configuration file.
///
/// # TOML Example
///
/// ```toml
/// [shared]
/// service_name = "sbc-hal"
///
/// [sources]
/// cpu_info = "/proc/cpuinfo"
///
/// [detection]
/// precedence = "code_first"
///
/// [[lines]]
/// id = "led"
/// line = 17
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RuntimeConfig {
    /// Shared service settings.
    #[serde(default)]
    pub shared: SharedConfig,
    /// Board identification sources.
    #[serde(default)]
    pub sources: BoardSources,
    /// Detection policy.
    #[serde(default)]
    pub detection: DetectionConfig,
    /// Digital lines to create at startup.
    #[serde(default)]
    pub lines: Vec<DigitalConfig>,
}

impl RuntimeConfig {
    /// Check the whole file after parsing.
    ///
    /// # Errors
    ///
    /// `ConfigError::ValidationError` when:
    /// - the shared section is invalid
    /// - a line id is empty or used twice
    /// - a line number is out of the BCM range
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.shared.validate()?;

        let mut ids = HashSet::new();
        for line in &self.lines {
            line.validate()?;
            if !ids.insert(line.id.as_str()) {
                return Err(ConfigError::ValidationError(format!(
                    "duplicate line id '{}'",
                    line.id
                )));
            }
        }
        Ok(())
    }
}

/// TOML loading for any deserializable configuration type.
///
/// A missing file is `ConfigError::FileNotFound`; any other read failure
/// and any TOML or schema error is `ConfigError::ParseError`.
pub trait ConfigLoader: Sized + DeserializeOwned {
    fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = match std::fs::read_to_string(path) {
            Ok(text) => text,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(ConfigError::FileNotFound);
            }
            Err(e) => return Err(ConfigError::ParseError(format!("{}: {e}", path.display()))),
        };
        toml::from_str(&text).map_err(|e| ConfigError::ParseError(e.to_string()))
    }
}

impl<T: DeserializeOwned> ConfigLoader for T {}
