//! Raspberry Pi board catalog.
//!
//! - [`definition`] - Board types, form factors, SoCs, CPUs, pin classes
//! - [`header`] - Header pin layouts
//! - [`catalog`] - Static board descriptors and lookups
//! - [`capabilities`] - Capability flags derived from a descriptor

pub mod capabilities;
pub mod catalog;
pub mod definition;
pub mod header;
