//! Probe configuration and constants.
//!
//! This module provides:
//! - Configuration constants (deadlines, redirect limit, trace labels)
//! - CLI option types and parsing

mod constants;
mod types;

// Re-export all constants
pub use constants::*;
pub use types::{LogFormat, LogLevel, Opt};
