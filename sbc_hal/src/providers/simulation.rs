//! Simulation provider.
//!
//! Claims lines from the board's header without touching hardware. Levels
//! are held in memory; [`SimulationProvider::drive`] plays the role of an
//! interrupt thread by pushing a transition into the attached line.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, Weak};
use tracing::{debug, info};

use sbc_common::board::catalog::BoardDescriptor;
use sbc_common::consts::FALLBACK_BCM_LINES;
use sbc_common::io::config::{DigitalConfig, LineHandle};
use sbc_common::io::state::DigitalState;
use sbc_common::provider::{DigitalProvider, LineSink, ProviderError};

/// Registry name of the simulation provider.
pub const SIMULATION_PROVIDER_ID: &str = "simulation";

#[derive(Default)]
struct SimLines {
    /// line → owner id
    claimed: HashMap<u8, String>,
    levels: HashMap<u8, DigitalState>,
    sinks: HashMap<u8, Weak<dyn LineSink>>,
}

/// In-memory digital provider.
pub struct SimulationProvider {
    board: &'static BoardDescriptor,
    valid_lines: Vec<u8>,
    lines: Mutex<SimLines>,
}

impl SimulationProvider {
    /// Valid lines come from the board's header; an unknown board (or one
    /// without header data) gets BCM 0..=27.
    pub fn for_board(board: &'static BoardDescriptor) -> Self {
        let mut valid_lines = board.digital_lines();
        if valid_lines.is_empty() {
            valid_lines = FALLBACK_BCM_LINES.collect();
        }
        info!(
            "Simulation provider for {} ({} lines)",
            board,
            valid_lines.len()
        );
        Self {
            board,
            valid_lines,
            lines: Mutex::new(SimLines::default()),
        }
    }

    /// [`ProviderFactory`](sbc_common::provider::ProviderFactory) entry.
    pub fn factory(board: &'static BoardDescriptor) -> Arc<dyn DigitalProvider> {
        Arc::new(Self::for_board(board))
    }

    pub fn board(&self) -> &'static BoardDescriptor {
        self.board
    }

    pub fn valid_lines(&self) -> &[u8] {
        &self.valid_lines
    }

    /// Current simulated level of a claimed line.
    pub fn level(&self, line: u8) -> Option<DigitalState> {
        let lines = self.lock();
        lines
            .claimed
            .contains_key(&line)
            .then(|| lines.levels.get(&line).copied().unwrap_or_default())
    }

    pub fn is_claimed(&self, line: u8) -> bool {
        self.lock().claimed.contains_key(&line)
    }

    /// Set the level of a claimed line and notify its sink.
    ///
    /// The sink is called without any provider lock held.
    pub fn drive(&self, line: u8, state: DigitalState) -> Result<(), ProviderError> {
        let sink = {
            let mut lines = self.lock();
            if !lines.claimed.contains_key(&line) {
                return Err(ProviderError::Unsupported(format!(
                    "BCM {line} is not claimed on provider '{SIMULATION_PROVIDER_ID}'"
                )));
            }
            lines.levels.insert(line, state);
            lines.sinks.get(&line).and_then(Weak::upgrade)
        };

        debug!("Simulated BCM {} -> {}", line, state);
        if let Some(sink) = sink {
            sink.apply_state(state);
        }
        Ok(())
    }

    fn lock(&self) -> MutexGuard<'_, SimLines> {
        self.lines.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl DigitalProvider for SimulationProvider {
    fn id(&self) -> &str {
        SIMULATION_PROVIDER_ID
    }

    fn name(&self) -> &str {
        "Simulated digital I/O"
    }

    fn create_line(&self, config: &DigitalConfig) -> Result<LineHandle, ProviderError> {
        if !self.valid_lines.contains(&config.line) {
            return Err(ProviderError::OutOfRange {
                line: config.line,
                provider: SIMULATION_PROVIDER_ID.to_string(),
            });
        }

        let mut lines = self.lock();
        if let Some(owner) = lines.claimed.get(&config.line) {
            return Err(ProviderError::Busy {
                line: config.line,
                owner: owner.clone(),
            });
        }
        lines.claimed.insert(config.line, config.id.clone());
        let initial_state = *lines.levels.entry(config.line).or_insert(DigitalState::Low);

        debug!("Claimed BCM {} for '{}'", config.line, config.id);
        Ok(LineHandle {
            provider_id: SIMULATION_PROVIDER_ID.to_string(),
            line: config.line,
            initial_state,
        })
    }

    fn release_line(&self, line: u8) {
        let mut lines = self.lock();
        if let Some(owner) = lines.claimed.remove(&line) {
            lines.sinks.remove(&line);
            debug!("Released BCM {} from '{}'", line, owner);
        }
    }

    fn attach(&self, sink: Arc<dyn LineSink>) {
        let line = sink.line();
        self.lock().sinks.insert(line, Arc::downgrade(&sink));
    }

    fn write(&self, line: u8, state: DigitalState) -> Result<(), ProviderError> {
        self.drive(line, state)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sbc_common::board::catalog::{MODEL_1_B, MODEL_5_B, PICO, UNKNOWN};

    #[test]
    fn header_40_lines() {
        let provider = SimulationProvider::for_board(&MODEL_5_B);
        assert_eq!(provider.valid_lines(), (0..=27).collect::<Vec<u8>>().as_slice());
    }

    #[test]
    fn unknown_board_gets_fallback_lines() {
        let provider = SimulationProvider::for_board(&UNKNOWN);
        assert_eq!(provider.valid_lines().len(), 28);
        let provider = SimulationProvider::for_board(&PICO);
        assert_eq!(provider.valid_lines().len(), 28);
    }

    #[test]
    fn type_1_header_has_no_bcm_27() {
        let provider = SimulationProvider::for_board(&MODEL_1_B);
        let err = provider
            .create_line(&DigitalConfig::new("x", 27))
            .unwrap_err();
        assert!(matches!(err, ProviderError::OutOfRange { line: 27, .. }));
        assert!(provider.create_line(&DigitalConfig::new("y", 21)).is_ok());
    }

    #[test]
    fn busy_line() {
        let provider = SimulationProvider::for_board(&MODEL_5_B);
        provider.create_line(&DigitalConfig::new("led", 17)).unwrap();
        let err = provider
            .create_line(&DigitalConfig::new("other", 17))
            .unwrap_err();
        assert_eq!(
            err,
            ProviderError::Busy {
                line: 17,
                owner: "led".to_string()
            }
        );

        provider.release_line(17);
        assert!(!provider.is_claimed(17));
        assert!(provider.create_line(&DigitalConfig::new("other", 17)).is_ok());
    }

    #[test]
    fn drive_requires_claim() {
        let provider = SimulationProvider::for_board(&MODEL_5_B);
        assert!(provider.drive(4, DigitalState::High).is_err());

        provider.create_line(&DigitalConfig::new("in", 4)).unwrap();
        assert_eq!(provider.level(4), Some(DigitalState::Low));
        provider.drive(4, DigitalState::High).unwrap();
        assert_eq!(provider.level(4), Some(DigitalState::High));
        assert_eq!(provider.level(5), None);
    }
}
