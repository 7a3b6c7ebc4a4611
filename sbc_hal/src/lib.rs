//! # SBC HAL Library
//!
//! Digital I/O lines on top of pluggable providers.
//!
//! # Module Structure
//!
//! - [`digital`] - `DigitalIo`: state, listeners, bindings, dispatch
//! - [`registry`] - `IoRegistry`: create / look up / shut down lines
//! - [`provider_registry`] - Provider factory registration
//! - [`providers`] - Provider implementations
//!
//! # Architecture
//!
//! ```text
//! ┌───────────────────────────────────────────────────────────────┐
//! │                          sbc_hal                              │
//! │  ┌──────────────┐   create   ┌──────────────┐                 │
//! │  │  IoRegistry  │──────────► │  Provider    │ (trait object)  │
//! │  └──────┬───────┘            └──────┬───────┘                 │
//! │         │ owns                      │ apply_state (LineSink)  │
//! │         ▼                           ▼                         │
//! │  ┌──────────────┐  dispatch  ┌──────────────────────────┐     │
//! │  │  DigitalIo   │──────────► │ listeners → bindings     │     │
//! │  └──────────────┘            └──────────────────────────┘     │
//! └───────────────────────────────────────────────────────────────┘
//! ```

pub mod digital;
pub mod provider_registry;
pub mod providers;
pub mod registry;

pub use crate::digital::{
    BindingError, ConsumerFailure, ConsumerKind, DigitalBinding, DigitalIo,
    DigitalStateChangeListener, DispatchReport, FailureKind, Lifecycle,
};
pub use crate::provider_registry::ProviderRegistry;
pub use crate::registry::{IoRegistry, RegistryError};
