//! `tablebook-board`
//!
//! **Responsibility:** the boundary the presentation layer talks to.
//!
//! This crate provides:
//! - `ReservationBoard`: submit / cancel / clear intents and the three queries
//! - `BoardConfig`: environment-driven configuration
//!
//! Rendering, form wiring and confirmation dialogs stay with the caller.

pub mod board;
pub mod config;

pub use board::ReservationBoard;
pub use config::{BoardConfig, ConfigError};
