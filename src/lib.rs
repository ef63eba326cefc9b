//! Grimoire: retrieval-augmented question answering.
//!
//! Documents are split into overlapping chunks, embedded into dense
//! vectors, and stored in a remote vector index; queries retrieve the
//! closest chunks and ground a language-model answer in them.
//!
//! # Architecture
//!
//! This crate follows Hexagonal Architecture principles:
//!
//! - **Domain Layer** (`domain`): models, port traits, and the error taxonomy
//! - **Service Layer** (`services`): chunking, ingestion, retrieval, synthesis
//! - **Adapters** (`adapters`): Workers AI and Qdrant REST implementations
//! - **Infrastructure** (`infrastructure`): configuration, logging, wiring
//! - **Server** (`server`): the thin axum HTTP surface
//! - **CLI Layer** (`cli`): command-line interface

pub mod adapters;
pub mod cli;
pub mod domain;
pub mod infrastructure;
pub mod server;
pub mod services;

// Re-export commonly used types for convenience
pub use domain::errors::{PipelineError, PipelineResult};
pub use domain::models::{
    ChatOutcome, Chunk, ChunkerConfig, Config, DocumentInput, IndexStats, IngestReceipt, Point,
    PointPayload, QueryFilters, RetrievedContext, ScoredMatch, SourceRef, VectorSchema,
};
pub use domain::ports::{CompletionProvider, EmbeddingProvider, VectorIndex};
pub use infrastructure::config::{ConfigError, ConfigLoader};
pub use services::{Chunker, Pipeline};
