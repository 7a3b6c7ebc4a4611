//! Digital provider trait and error types.
//!
//! This module defines:
//! - `DigitalProvider` trait - Interface for pluggable line providers
//! - `LineSink` trait - Receiver side of a provider's change notifications
//! - `ProviderError` enum - Error types for line creation
//! - `ProviderFactory` type alias - Factory function type

use std::sync::Arc;
use thiserror::Error;

use crate::board::catalog::BoardDescriptor;
use crate::io::config::{DigitalConfig, LineHandle};
use crate::io::state::DigitalState;

/// Error types for provider operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProviderError {
    /// Line is already claimed.
    #[error("BCM line {line} is busy (claimed by '{owner}')")]
    Busy { line: u8, owner: String },

    /// Line does not exist on this board.
    #[error("BCM line {line} is out of range for provider '{provider}'")]
    OutOfRange { line: u8, provider: String },

    /// The provider cannot drive this line or is not available.
    #[error("Unsupported: {0}")]
    Unsupported(String),

    /// Hardware or OS access failed.
    #[error("Provider I/O error: {0}")]
    Io(String),
}

static_assertions::assert_obj_safe!(DigitalProvider, LineSink);

/// Factory function type for creating provider instances for a board.
pub type ProviderFactory = fn(&'static BoardDescriptor) -> Arc<dyn DigitalProvider>;

/// Receiver of raw state transitions pushed by a provider.
///
/// The HAL's digital line type implements this; providers only ever hold
/// a `Weak` reference to it.
pub trait LineSink: Send + Sync {
    /// Registry id of the line.
    fn id(&self) -> &str;

    /// BCM line number.
    fn line(&self) -> u8;

    /// Push a new raw state. Dispatches to consumers if the state changed.
    fn apply_state(&self, state: DigitalState);
}

/// Trait defining the interface for digital line providers.
///
/// A provider claims physical lines and reports their transitions
/// (simulation, pigpio, gpiochip character device, etc.).
///
/// # Lifecycle
///
/// 1. `create_line()` - Claim a line; must fail rather than return a
///    half-initialized handle
/// 2. `attach()` - Receive the sink that transitions are pushed into
/// 3. `release_line()` - Give the line back on shutdown
pub trait DigitalProvider: Send + Sync {
    /// Provider's unique identifier (e.g., "simulation").
    fn id(&self) -> &str;

    /// Human readable provider name.
    fn name(&self) -> &str;

    /// Claim a line for `config`.
    ///
    /// # Errors
    /// `ProviderError::Busy`, `OutOfRange` or `Unsupported` when the line
    /// cannot be produced.
    fn create_line(&self, config: &DigitalConfig) -> Result<LineHandle, ProviderError>;

    /// Release a previously claimed line. Unknown lines are ignored.
    fn release_line(&self, line: u8);

    /// Connect the sink that receives transitions for a created line.
    ///
    /// Default: no-op (providers without change detection).
    fn attach(&self, _sink: Arc<dyn LineSink>) {}

    /// Drive an output line. Default: unsupported.
    fn write(&self, line: u8, _state: DigitalState) -> Result<(), ProviderError> {
        Err(ProviderError::Unsupported(format!(
            "provider '{}' cannot drive BCM {line}",
            self.id()
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct ReadOnlyProvider;

    impl DigitalProvider for ReadOnlyProvider {
        fn id(&self) -> &str {
            "read-only"
        }

        fn name(&self) -> &str {
            "Read-only test provider"
        }

        fn create_line(&self, config: &DigitalConfig) -> Result<LineHandle, ProviderError> {
            Ok(LineHandle {
                provider_id: self.id().to_string(),
                line: config.line,
                initial_state: DigitalState::Low,
            })
        }

        fn release_line(&self, _line: u8) {}
    }

    #[test]
    fn test_provider_error_display() {
        let err = ProviderError::Busy {
            line: 17,
            owner: "led".to_string(),
        };
        assert!(err.to_string().contains("17"));
        assert!(err.to_string().contains("led"));

        let err = ProviderError::OutOfRange {
            line: 60,
            provider: "simulation".to_string(),
        };
        assert!(err.to_string().contains("simulation"));
    }

    #[test]
    fn test_default_write_is_unsupported() {
        let provider = ReadOnlyProvider;
        let result = provider.write(4, DigitalState::High);
        assert!(matches!(result, Err(ProviderError::Unsupported(_))));
    }

    #[test]
    fn test_create_line_reports_provider() {
        let handle = ReadOnlyProvider
            .create_line(&DigitalConfig::new("in", 5))
            .unwrap();
        assert_eq!(handle.provider_id, "read-only");
        assert_eq!(handle.line, 5);
    }
}
