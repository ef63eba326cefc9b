//! Ingestion request and receipt models.

use serde::{Deserialize, Serialize};

/// Cap on stored tags per document; extras are dropped at normalization.
pub const MAX_TAGS: usize = 20;

/// A document submitted for ingestion.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DocumentInput {
    pub title: Option<String>,
    pub text: String,
    pub url: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
}

impl DocumentInput {
    /// Effective title: trimmed, falling back to a fixed default.
    pub fn effective_title(&self) -> String {
        match self.title.as_deref().map(str::trim) {
            Some(t) if !t.is_empty() => t.to_string(),
            _ => "Untitled".to_string(),
        }
    }

    /// Effective URL: trimmed, empty collapsed to `None`.
    pub fn effective_url(&self) -> Option<String> {
        self.url
            .as_deref()
            .map(str::trim)
            .filter(|u| !u.is_empty())
            .map(ToString::to_string)
    }

    /// Normalized tags: trimmed, empties dropped, capped at [`MAX_TAGS`].
    pub fn normalized_tags(&self) -> Vec<String> {
        self.tags
            .iter()
            .map(|t| t.trim())
            .filter(|t| !t.is_empty())
            .take(MAX_TAGS)
            .map(ToString::to_string)
            .collect()
    }
}

/// Result of a successful ingestion.
#[derive(Debug, Clone, Serialize)]
pub struct IngestReceipt {
    /// Number of points written to the index
    pub inserted: usize,

    /// Schema mode the write used ("single" or "named")
    pub mode: String,

    /// Vector slot used, for named schemas
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vector_name: Option<String>,
}
