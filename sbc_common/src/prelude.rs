//! Prelude module for common re-exports.
//!
//! ```rust
//! use sbc_common::prelude::*;
//! ```

// ─── Logging ────────────────────────────────────────────────────────
pub use crate::config::LogLevel;

// ─── Configuration ──────────────────────────────────────────────────
pub use crate::config::{
    BoardSources, ConfigError, ConfigLoader, DetectionConfig, DetectionPrecedence,
    RuntimeConfig, SharedConfig,
};

// ─── Board Catalog ──────────────────────────────────────────────────
pub use crate::board::capabilities::BoardCapabilities;
pub use crate::board::catalog::{
    BoardDescriptor, Catalog, CatalogError, ReleaseDate, UNKNOWN, lookup_by_code,
    lookup_by_name,
};
pub use crate::board::definition::{BoardType, Cpu, InstructionSet, PiModel, Soc};
pub use crate::board::header::{HeaderLayout, HeaderPin, HeaderVersion};

// ─── Digital I/O ────────────────────────────────────────────────────
pub use crate::io::config::{DigitalConfig, LineHandle};
pub use crate::io::state::{DigitalState, DigitalStateChangeEvent};

// ─── Providers ──────────────────────────────────────────────────────
pub use crate::provider::{DigitalProvider, LineSink, ProviderError, ProviderFactory};
