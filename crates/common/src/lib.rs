//! Shared types for boxfall: start-up configuration and colour values.
//!
//! # Invariants
//! - A `BoxConfig` that passed `validate` has a non-zero surface size and a
//!   finite fall rate.

mod config;
mod types;

pub use config::{BoxConfig, ConfigError};
pub use types::ClearColor;
