//! Infrastructure layer: configuration, logging, and pipeline wiring.

pub mod config;
pub mod logging;
pub mod setup;

pub use config::{ConfigError, ConfigLoader};
