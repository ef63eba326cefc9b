//! Port trait definitions (Hexagonal Architecture)
//!
//! This module defines async trait interfaces that infrastructure adapters
//! must implement:
//! - `EmbeddingProvider`: text to fixed-dimension vector
//! - `CompletionProvider`: prompt to answer text
//! - `VectorIndex`: schema-adaptive vector storage and similarity search
//!
//! These traits define the contracts that allow the pipeline to be
//! independent of specific backends.

pub mod completion;
pub mod embedding;
pub mod vector_index;

pub use completion::CompletionProvider;
pub use embedding::EmbeddingProvider;
pub use vector_index::VectorIndex;
