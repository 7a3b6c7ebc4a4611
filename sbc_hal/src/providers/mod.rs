//! Digital provider implementations.
//!
//! - [`simulation`] - In-memory provider driven by tests and `--simulate`

pub mod simulation;

pub use simulation::{SIMULATION_PROVIDER_ID, SimulationProvider};
