//! Sliding-window text chunker.
//!
//! Splits a document into overlapping fixed-size character windows. The
//! whole sequence is materialized before returning; inputs are bounded
//! document sizes, so no streaming is needed.

use crate::domain::errors::{PipelineError, PipelineResult};
use crate::domain::models::{Chunk, ChunkerConfig};

/// Deterministic character-window chunker.
///
/// Every chunk except possibly the last spans exactly `window_size`
/// characters, and consecutive chunks overlap by `overlap_size`. Offsets
/// count characters; slicing never lands inside a UTF-8 code point.
pub struct Chunker {
    config: ChunkerConfig,
}

impl Chunker {
    /// Create a chunker with default configuration (800/120).
    pub fn new() -> Self {
        Self {
            config: ChunkerConfig::default(),
        }
    }

    /// Create a chunker with custom configuration.
    ///
    /// Rejects `overlap_size >= window_size` up front; that configuration
    /// would stall the window advance.
    pub fn with_config(config: ChunkerConfig) -> PipelineResult<Self> {
        config.validate().map_err(PipelineError::Config)?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &ChunkerConfig {
        &self.config
    }

    /// Split `text` into overlapping windows.
    ///
    /// Empty input yields an empty Vec; callers treat that as a
    /// validation error rather than a silent no-op.
    pub fn chunk(&self, text: &str) -> Vec<Chunk> {
        // Byte offset of every character start, so windows can be counted
        // in characters but sliced on valid byte boundaries.
        let starts: Vec<usize> = text.char_indices().map(|(i, _)| i).collect();
        let total = starts.len();
        if total == 0 {
            return Vec::new();
        }

        let mut chunks = Vec::new();
        let mut pos = 0usize;
        let mut ordinal = 0usize;

        loop {
            let end = (pos + self.config.window_size).min(total);
            let byte_start = starts[pos];
            let byte_end = if end == total { text.len() } else { starts[end] };

            chunks.push(Chunk {
                text: text[byte_start..byte_end].to_string(),
                ordinal,
                source_offset: pos,
            });

            if end == total {
                break;
            }

            // Validation guarantees overlap < window, so this always moves
            // forward; the clamp guards the offset, not the loop.
            pos = end.saturating_sub(self.config.overlap_size);
            ordinal += 1;
        }

        chunks
    }
}

impl Default for Chunker {
    fn default() -> Self {
        Self::new()
    }
}
