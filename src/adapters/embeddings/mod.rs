//! Embedding provider adapters.

pub mod workers_ai;

pub use workers_ai::{WorkersAiEmbedder, WorkersAiEmbedderConfig};
