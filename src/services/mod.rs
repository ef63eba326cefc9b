//! Service layer: pipeline orchestration over the domain ports.

pub mod answer;
pub mod chunker;
pub mod ingestion;
pub mod pipeline;
pub mod retrieval;

pub use answer::AnswerService;
pub use chunker::Chunker;
pub use ingestion::IngestionService;
pub use pipeline::Pipeline;
pub use retrieval::{RetrievalService, CONTEXT_SEPARATOR, NO_CONTEXT_SENTINEL};
