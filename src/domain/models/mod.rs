//! Domain models for the grimoire pipeline.

pub mod chunk;
pub mod config;
pub mod document;
pub mod point;
pub mod query;

pub use chunk::{Chunk, ChunkerConfig};
pub use config::{
    Config, IndexConfig, LoggingConfig, RetrievalConfig, ServerConfig, WorkersAiConfig,
};
pub use document::{DocumentInput, IngestReceipt, MAX_TAGS};
pub use point::{IndexStats, Point, PointPayload, ScoredMatch, VectorSchema};
pub use query::{ChatOutcome, QueryFilters, RetrievedContext, SourceRef};
