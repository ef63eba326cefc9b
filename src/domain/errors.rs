//! Domain errors for the grimoire pipeline.

use thiserror::Error;

/// Pipeline-level errors, one variant per failing stage.
///
/// Every stage boundary converts its collaborator's failure into the
/// matching variant here; no raw transport or serialization error crosses
/// from one stage into another unconverted.
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Unauthorized: missing or mismatched admin token")]
    Unauthorized,

    #[error("Embedding failed: {0}")]
    EmbeddingFailed(String),

    #[error("Embedding dimension mismatch: expected {expected}, got {actual}")]
    BadDimension { expected: usize, actual: usize },

    #[error("Vector store write failed with status {status}: {body}")]
    StoreWriteFailed { status: u16, body: String },

    #[error("Vector store read failed: {0}")]
    StoreReadFailed(String),

    #[error("Answer synthesis failed: {0}")]
    SynthesisFailed(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

pub type PipelineResult<T> = Result<T, PipelineError>;

impl PipelineError {
    /// Stable machine-readable tag for wire envelopes and logs.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Validation(_) => "validation",
            Self::Unauthorized => "unauthorized",
            Self::EmbeddingFailed(_) => "embedding_failed",
            Self::BadDimension { .. } => "bad_dimension",
            Self::StoreWriteFailed { .. } => "store_write_failed",
            Self::StoreReadFailed(_) => "store_read_failed",
            Self::SynthesisFailed(_) => "synthesis_failed",
            Self::Config(_) => "config",
            Self::Internal(_) => "internal",
        }
    }

    /// True when the caller can fix the request (4xx-equivalent).
    pub fn is_caller_error(&self) -> bool {
        matches!(self, Self::Validation(_) | Self::Unauthorized)
    }
}

impl From<serde_json::Error> for PipelineError {
    fn from(err: serde_json::Error) -> Self {
        PipelineError::Internal(format!("serialization error: {err}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kind_tags_are_stable() {
        assert_eq!(PipelineError::Validation("x".into()).kind(), "validation");
        assert_eq!(
            PipelineError::BadDimension { expected: 768, actual: 512 }.kind(),
            "bad_dimension"
        );
        assert_eq!(
            PipelineError::StoreWriteFailed { status: 502, body: String::new() }.kind(),
            "store_write_failed"
        );
    }

    #[test]
    fn caller_errors_are_distinguished_from_backend_outages() {
        assert!(PipelineError::Validation("x".into()).is_caller_error());
        assert!(PipelineError::Unauthorized.is_caller_error());
        assert!(!PipelineError::EmbeddingFailed("x".into()).is_caller_error());
        assert!(!PipelineError::SynthesisFailed("x".into()).is_caller_error());
    }
}
