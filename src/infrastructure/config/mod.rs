//! Configuration loading (figment hierarchical merge).

pub mod loader;

pub use loader::{ConfigError, ConfigLoader};
