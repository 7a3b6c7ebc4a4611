//! SBC Board Info
//!
//! Identifies the board the process runs on and exposes the result,
//! together with host facts, through a process-wide runtime context.
//!
//! # Module Structure
//!
//! - [`reader`] - Collectors for the OS text sources
//! - [`resolver`] - Source + catalog → resolved identity
//! - [`context`] - Lazily detected, reinitializable runtime facts
//! - [`command`] - External command execution with timeout
//! - [`reading`] - Live readings (temperature, voltage, uptime)
//!
//! # Usage
//!
//! ```rust,no_run
//! let facts = sbc_boardinfo::current();
//! println!("{} (64-bit: {})", facts.descriptor(), facts.is_64bit());
//! ```

use std::sync::{Arc, LazyLock};

pub mod command;
pub mod context;
pub mod reader;
pub mod reading;
pub mod resolver;

pub use context::{OperatingSystem, RuntimeContext, RuntimeFacts, RuntimeInfo};
pub use resolver::{BoardResolver, DetectionChannel, ResolvedBoardIdentity};

static GLOBAL: LazyLock<RuntimeContext> = LazyLock::new(RuntimeContext::default);

/// The process-wide context, reading the default OS sources.
pub fn context() -> &'static RuntimeContext {
    &GLOBAL
}

/// Process-wide facts, detected on first use.
pub fn current() -> Arc<RuntimeFacts> {
    GLOBAL.current()
}

/// Detect again and replace the process-wide facts.
pub fn reinitialize() -> Arc<RuntimeFacts> {
    GLOBAL.reinitialize()
}
