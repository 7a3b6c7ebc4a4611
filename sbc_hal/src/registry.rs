//! Registry of live digital lines.
//!
//! Creation either returns a fully wired line (claimed at the provider,
//! initial state applied, sink attached) or an error with nothing left
//! behind. Shutdown removes the entry first, then shuts the line and
//! releases it at its provider.
//!
//! The registry keeps each provider with live lines alive, so a line is
//! always released at the provider that claimed it, even after the
//! caller dropped its own handle.

use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard};
use thiserror::Error;
use tracing::{info, warn};

use sbc_common::config::ConfigError;
use sbc_common::io::config::DigitalConfig;
use sbc_common::provider::{DigitalProvider, LineSink, ProviderError};

use crate::digital::DigitalIo;

/// Registry errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
    /// A line with this id already exists.
    #[error("line id '{0}' is already registered")]
    DuplicateId(String),

    /// No line with this id.
    #[error("line id '{0}' not found")]
    NotFound(String),

    /// The line configuration is invalid.
    #[error("invalid line configuration: {0}")]
    InvalidConfig(String),

    /// The provider refused the line.
    #[error(transparent)]
    Provider(#[from] ProviderError),
}

impl From<ConfigError> for RegistryError {
    fn from(e: ConfigError) -> Self {
        Self::InvalidConfig(e.to_string())
    }
}

/// Live digital lines keyed by id.
#[derive(Default)]
pub struct IoRegistry {
    lines: RwLock<HashMap<String, Arc<DigitalIo>>>,
    /// Providers with at least one registered line, keyed by provider id.
    providers: RwLock<HashMap<String, Arc<dyn DigitalProvider>>>,
}

impl fmt::Debug for IoRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut providers: Vec<String> = self.held_providers().keys().cloned().collect();
        providers.sort_unstable();
        f.debug_struct("IoRegistry")
            .field("lines", &self.ids())
            .field("providers", &providers)
            .finish()
    }
}

impl IoRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Claim a line at `provider` and register it.
    ///
    /// # Errors
    /// - `RegistryError::InvalidConfig` for an invalid `config`
    /// - `RegistryError::DuplicateId` if the id is taken
    /// - `RegistryError::InvalidConfig` if another provider instance with
    ///   the same provider id still owns lines here
    /// - `RegistryError::Provider` if the provider refuses the line or the
    ///   initial state cannot be applied
    pub fn create(
        &self,
        provider: &Arc<dyn DigitalProvider>,
        config: DigitalConfig,
    ) -> Result<Arc<DigitalIo>, RegistryError> {
        config.validate()?;

        let mut lines = self.lines.write().unwrap_or_else(PoisonError::into_inner);
        if lines.contains_key(&config.id) {
            return Err(RegistryError::DuplicateId(config.id));
        }
        let mut providers = self.providers.write().unwrap_or_else(PoisonError::into_inner);
        if let Some(held) = providers.get(provider.id()) {
            if !Arc::ptr_eq(held, provider) {
                return Err(RegistryError::InvalidConfig(format!(
                    "another '{}' provider instance owns lines in this registry",
                    provider.id()
                )));
            }
        }

        let handle = provider.create_line(&config)?;
        if let Some(state) = config.initial_state {
            if let Err(e) = provider.write(handle.line, state) {
                provider.release_line(handle.line);
                return Err(e.into());
            }
        }

        let io = Arc::new(DigitalIo::new(config, &handle, Arc::downgrade(provider)));
        provider.attach(Arc::clone(&io) as Arc<dyn LineSink>);
        lines.insert(io.id().to_string(), Arc::clone(&io));
        providers
            .entry(io.provider_id().to_string())
            .or_insert_with(|| Arc::clone(provider));

        info!(
            "Created line '{}' (BCM {}) on provider '{}', state {}",
            io.id(),
            io.line(),
            io.provider_id(),
            io.state()
        );
        Ok(io)
    }

    pub fn get(&self, id: &str) -> Option<Arc<DigitalIo>> {
        self.read().get(id).cloned()
    }

    pub fn contains(&self, id: &str) -> bool {
        self.read().contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.read().is_empty()
    }

    /// Registered ids, sorted.
    pub fn ids(&self) -> Vec<String> {
        let mut ids: Vec<String> = self.read().keys().cloned().collect();
        ids.sort_unstable();
        ids
    }

    /// Remove, shut down and release one line.
    pub fn shutdown(&self, id: &str) -> Result<(), RegistryError> {
        let io = self
            .lines
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(id)
            .ok_or_else(|| RegistryError::NotFound(id.to_string()))?;
        self.teardown(&io);
        self.prune_providers();
        Ok(())
    }

    /// Shut down every line owned by `provider_id`. Returns how many.
    pub fn shutdown_provider(&self, provider_id: &str) -> usize {
        let removed: Vec<Arc<DigitalIo>> = {
            let mut lines = self.lines.write().unwrap_or_else(PoisonError::into_inner);
            let ids: Vec<String> = lines
                .values()
                .filter(|io| io.provider_id() == provider_id)
                .map(|io| io.id().to_string())
                .collect();
            ids.iter().filter_map(|id| lines.remove(id)).collect()
        };

        for io in &removed {
            self.teardown(io);
        }
        self.prune_providers();
        info!(
            "Provider '{}' teardown: {} line(s) shut down",
            provider_id,
            removed.len()
        );
        removed.len()
    }

    /// Shut down every line. Returns how many.
    pub fn shutdown_all(&self) -> usize {
        let removed: Vec<Arc<DigitalIo>> = self
            .lines
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .drain()
            .map(|(_, io)| io)
            .collect();

        for io in &removed {
            self.teardown(io);
        }
        self.prune_providers();
        removed.len()
    }

    fn teardown(&self, io: &DigitalIo) {
        io.shutdown();
        let provider = self.held_providers().get(io.provider_id()).cloned();
        match provider {
            Some(provider) => provider.release_line(io.line()),
            None => warn!(
                "Provider '{}' not held, BCM {} not released",
                io.provider_id(),
                io.line()
            ),
        }
    }

    /// Drop providers that no registered line refers to any more.
    fn prune_providers(&self) {
        let lines = self.read();
        self.providers
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .retain(|id, _| lines.values().any(|io| io.provider_id() == id));
    }

    fn read(&self) -> RwLockReadGuard<'_, HashMap<String, Arc<DigitalIo>>> {
        self.lines.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn held_providers(&self) -> RwLockReadGuard<'_, HashMap<String, Arc<dyn DigitalProvider>>> {
        self.providers.read().unwrap_or_else(PoisonError::into_inner)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::providers::SimulationProvider;
    use sbc_common::board::catalog::MODEL_4_B;
    use sbc_common::io::state::DigitalState;

    fn simulation() -> Arc<dyn DigitalProvider> {
        SimulationProvider::factory(&MODEL_4_B)
    }

    #[test]
    fn create_and_lookup() {
        let provider = simulation();
        let registry = IoRegistry::new();
        let io = registry
            .create(&provider, DigitalConfig::new("led", 17))
            .unwrap();

        assert_eq!(io.state(), DigitalState::Low);
        assert!(registry.contains("led"));
        assert_eq!(registry.len(), 1);
        assert_eq!(registry.ids(), vec!["led".to_string()]);
        assert!(Arc::ptr_eq(&io, &registry.get("led").unwrap()));
    }

    #[test]
    fn duplicate_id_rejected() {
        let provider = simulation();
        let registry = IoRegistry::new();
        registry.create(&provider, DigitalConfig::new("led", 17)).unwrap();

        let err = registry
            .create(&provider, DigitalConfig::new("led", 18))
            .unwrap_err();
        assert_eq!(err, RegistryError::DuplicateId("led".to_string()));
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn provider_errors_leave_nothing_behind() {
        let provider = simulation();
        let registry = IoRegistry::new();
        registry.create(&provider, DigitalConfig::new("led", 17)).unwrap();

        let err = registry
            .create(&provider, DigitalConfig::new("other", 17))
            .unwrap_err();
        assert!(matches!(err, RegistryError::Provider(ProviderError::Busy { .. })));

        let err = registry
            .create(&provider, DigitalConfig::new("far", 40))
            .unwrap_err();
        assert!(matches!(
            err,
            RegistryError::Provider(ProviderError::OutOfRange { .. })
        ));
        assert_eq!(registry.ids(), vec!["led".to_string()]);
    }

    #[test]
    fn invalid_config_rejected() {
        let registry = IoRegistry::new();
        let err = registry
            .create(&simulation(), DigitalConfig::new(" ", 4))
            .unwrap_err();
        assert!(matches!(err, RegistryError::InvalidConfig(_)));
    }

    #[test]
    fn initial_state_applied() {
        let provider = simulation();
        let registry = IoRegistry::new();
        let io = registry
            .create(
                &provider,
                DigitalConfig::new("relay", 22).with_initial_state(DigitalState::High),
            )
            .unwrap();
        assert!(io.is_on());
    }

    #[test]
    fn shutdown_releases_line() {
        let provider = simulation();
        let registry = IoRegistry::new();
        let io = registry.create(&provider, DigitalConfig::new("led", 17)).unwrap();

        registry.shutdown("led").unwrap();
        assert!(io.is_shutdown());
        assert!(!registry.contains("led"));
        assert!(registry.create(&provider, DigitalConfig::new("led", 17)).is_ok());

        assert_eq!(
            registry.shutdown("missing").unwrap_err(),
            RegistryError::NotFound("missing".to_string())
        );
    }

    #[test]
    fn registry_keeps_provider_alive_for_its_lines() {
        let provider = simulation();
        let weak = Arc::downgrade(&provider);
        let registry = IoRegistry::new();
        let io = registry.create(&provider, DigitalConfig::new("led", 17)).unwrap();
        drop(provider);

        assert!(weak.upgrade().is_some());
        io.write(DigitalState::High).unwrap();
        assert!(io.is_on());

        assert_eq!(registry.shutdown_all(), 1);
        assert!(weak.upgrade().is_none());
    }

    #[test]
    fn second_instance_with_same_id_rejected() {
        let registry = IoRegistry::new();
        registry.create(&simulation(), DigitalConfig::new("a", 5)).unwrap();

        let err = registry
            .create(&simulation(), DigitalConfig::new("b", 6))
            .unwrap_err();
        assert!(matches!(err, RegistryError::InvalidConfig(_)));

        registry.shutdown("a").unwrap();
        assert!(registry.create(&simulation(), DigitalConfig::new("b", 6)).is_ok());
    }

    #[test]
    fn shutdown_all_empties_registry() {
        let provider = simulation();
        let registry = IoRegistry::new();
        registry.create(&provider, DigitalConfig::new("a", 5)).unwrap();
        registry.create(&provider, DigitalConfig::new("b", 6)).unwrap();

        assert_eq!(registry.shutdown_all(), 2);
        assert!(registry.is_empty());
    }
}
