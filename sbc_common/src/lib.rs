//! SBC Common Library
//!
//! This crate provides the board catalog, shared digital I/O types, the
//! provider contract and configuration loading for all SBC workspace crates.
//!
//! # Module Structure
//!
//! - [`board`] - Board catalog: descriptors, header layouts, lookups
//! - [`io`] - Digital line state, change events and line configuration
//! - [`provider`] - Digital provider trait and errors
//! - [`config`] - Configuration loading traits and types
//! - [`consts`] - Default paths and limits
//! - [`prelude`] - Common re-exports for convenience
//!
//! # Usage
//!
//! ```rust
//! use sbc_common::board::catalog::lookup_by_code;
//!
//! let board = lookup_by_code("d04170").unwrap();
//! assert_eq!(board.id, "MODEL_5_B");
//! ```

pub mod board;
pub mod config;
pub mod consts;
pub mod io;
pub mod prelude;
pub mod provider;
