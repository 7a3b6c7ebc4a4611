//! Digital line configuration (`[[lines]]` in the runtime TOML).

use serde::{Deserialize, Serialize};

use super::state::DigitalState;
use crate::config::ConfigError;
use crate::consts::MAX_BCM_LINE;

/// Configuration for one digital line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DigitalConfig {
    /// Registry key. Must be unique per registry.
    pub id: String,
    /// Human readable name. Defaults to the id.
    #[serde(default)]
    pub name: String,
    /// BCM (chip-level) line number.
    pub line: u8,
    /// State applied when the line is created.
    #[serde(default)]
    pub initial_state: Option<DigitalState>,
    /// State applied when the line is shut down.
    #[serde(default)]
    pub shutdown_state: Option<DigitalState>,
    /// Input debounce in microseconds (0 = none). Informational for providers.
    #[serde(default)]
    pub debounce_us: u32,
}

impl DigitalConfig {
    pub fn new(id: impl Into<String>, line: u8) -> Self {
        let id = id.into();
        Self {
            name: id.clone(),
            id,
            line,
            initial_state: None,
            shutdown_state: None,
            debounce_us: 0,
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn with_initial_state(mut self, state: DigitalState) -> Self {
        self.initial_state = Some(state);
        self
    }

    pub fn with_shutdown_state(mut self, state: DigitalState) -> Self {
        self.shutdown_state = Some(state);
        self
    }

    /// Name shown in logs: `name` if set, else `id`.
    pub fn display_name(&self) -> &str {
        if self.name.is_empty() { &self.id } else { &self.name }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.id.trim().is_empty() {
            return Err(ConfigError::ValidationError(
                "line id cannot be empty".to_string(),
            ));
        }
        if self.line > MAX_BCM_LINE {
            return Err(ConfigError::ValidationError(format!(
                "line '{}': BCM {} exceeds maximum {}",
                self.id, self.line, MAX_BCM_LINE
            )));
        }
        Ok(())
    }
}

/// What a provider hands back for a successfully claimed line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineHandle {
    /// Id of the provider that owns the line.
    pub provider_id: String,
    /// BCM line number.
    pub line: u8,
    /// State read back from the hardware at creation.
    pub initial_state: DigitalState,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_name_falls_back_to_id() {
        let mut config = DigitalConfig::new("led", 17);
        assert_eq!(config.display_name(), "led");
        config.name.clear();
        assert_eq!(config.display_name(), "led");
        let config = config.with_name("Status LED");
        assert_eq!(config.display_name(), "Status LED");
    }

    #[test]
    fn validate_rejects_out_of_range_line() {
        let config = DigitalConfig::new("x", MAX_BCM_LINE + 1);
        assert!(matches!(
            config.validate(),
            Err(ConfigError::ValidationError(_))
        ));
        assert!(DigitalConfig::new("x", MAX_BCM_LINE).validate().is_ok());
    }

    #[test]
    fn validate_rejects_blank_id() {
        assert!(DigitalConfig::new("  ", 4).validate().is_err());
    }
}
