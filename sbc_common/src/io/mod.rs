//! Digital I/O shared types.
//!
//! Shared between the board-info and HAL crates: line state, change events
//! and the per-line configuration parsed from the runtime TOML.

pub mod config;
pub mod state;
