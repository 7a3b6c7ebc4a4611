//! Provider registry.
//!
//! Maps provider names to [`ProviderFactory`] functions. Constructed at
//! startup, populated via `register()` and consulted when the HAL creates
//! the provider for the detected board. No global state.

use std::collections::HashMap;
use std::sync::Arc;

use sbc_common::board::catalog::BoardDescriptor;
use sbc_common::provider::{DigitalProvider, ProviderError, ProviderFactory};

use crate::providers::{SIMULATION_PROVIDER_ID, SimulationProvider};

/// Registry of available digital providers.
pub struct ProviderRegistry {
    factories: HashMap<&'static str, ProviderFactory>,
}

impl ProviderRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self {
            factories: HashMap::new(),
        }
    }

    /// Registry with every provider shipped in this crate.
    pub fn with_builtin() -> Self {
        let mut registry = Self::new();
        registry.register(SIMULATION_PROVIDER_ID, SimulationProvider::factory);
        registry
    }

    /// Register a provider factory.
    ///
    /// # Panics
    /// Panics if a provider with the same name is already registered.
    pub fn register(&mut self, name: &'static str, factory: ProviderFactory) {
        if self.factories.contains_key(name) {
            panic!("Provider '{name}' is already registered");
        }
        self.factories.insert(name, factory);
    }

    pub fn get_factory(&self, name: &str) -> Option<ProviderFactory> {
        self.factories.get(name).copied()
    }

    /// Create a provider instance for `board`.
    ///
    /// # Errors
    /// `ProviderError::Unsupported` if no provider with that name is registered.
    pub fn create_provider(
        &self,
        name: &str,
        board: &'static BoardDescriptor,
    ) -> Result<Arc<dyn DigitalProvider>, ProviderError> {
        let factory = self
            .get_factory(name)
            .ok_or_else(|| ProviderError::Unsupported(format!("unknown provider '{name}'")))?;
        Ok(factory(board))
    }

    /// Registered provider names, sorted.
    pub fn list_providers(&self) -> Vec<&'static str> {
        let mut names: Vec<&'static str> = self.factories.keys().copied().collect();
        names.sort_unstable();
        names
    }
}

impl Default for ProviderRegistry {
    fn default() -> Self {
        Self::with_builtin()
    }
}
