//! Chunking domain models.
//!
//! Documents are split into overlapping fixed-size character windows before
//! embedding. Window sizes count characters, not bytes, so a window never
//! splits a UTF-8 code point.

use serde::{Deserialize, Serialize};

/// Configuration for the sliding-window chunker.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct ChunkerConfig {
    /// Size of each window in characters
    #[serde(default = "default_window_size")]
    pub window_size: usize,

    /// Overlap between consecutive windows in characters
    #[serde(default = "default_overlap_size")]
    pub overlap_size: usize,
}

const fn default_window_size() -> usize {
    800
}

const fn default_overlap_size() -> usize {
    120
}

impl Default for ChunkerConfig {
    fn default() -> Self {
        Self {
            window_size: default_window_size(),
            overlap_size: default_overlap_size(),
        }
    }
}

impl ChunkerConfig {
    /// Validate the chunking configuration.
    ///
    /// An overlap at or above the window size would stall the window
    /// advance, so it is rejected here rather than guarded per call.
    pub fn validate(&self) -> Result<(), String> {
        if self.window_size == 0 {
            return Err("window_size must be greater than 0".to_string());
        }

        if self.overlap_size >= self.window_size {
            return Err(format!(
                "overlap_size ({}) must be less than window_size ({})",
                self.overlap_size, self.window_size
            ));
        }

        Ok(())
    }

    /// Distance the window start advances between chunks.
    pub fn stride(&self) -> usize {
        self.window_size - self.overlap_size
    }
}

/// A window of a source document, the unit of embedding and indexing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Chunk {
    /// The text content of this window
    pub text: String,

    /// Position of this chunk within the document (0-based)
    pub ordinal: usize,

    /// Character offset of the window start in the original document
    pub source_offset: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_defaults() {
        let config = ChunkerConfig::default();
        assert_eq!(config.window_size, 800);
        assert_eq!(config.overlap_size, 120);
        assert_eq!(config.stride(), 680);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_zero_window_rejected() {
        let config = ChunkerConfig {
            window_size: 0,
            overlap_size: 0,
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_overlap_at_or_above_window_rejected() {
        let equal = ChunkerConfig {
            window_size: 100,
            overlap_size: 100,
        };
        assert!(equal.validate().is_err());

        let above = ChunkerConfig {
            window_size: 100,
            overlap_size: 150,
        };
        assert!(above.validate().is_err());
    }

    #[test]
    fn test_zero_overlap_is_valid() {
        let config = ChunkerConfig {
            window_size: 100,
            overlap_size: 0,
        };
        assert!(config.validate().is_ok());
        assert_eq!(config.stride(), 100);
    }
}
