//! Vector index point models.
//!
//! A [`Point`] is the logical unit written to the vector index: an opaque
//! id, an embedding vector, and the payload metadata the query side reads
//! back. The index's vector layout is captured by [`VectorSchema`], a
//! tagged union so every consumer branches exhaustively instead of
//! string-flag checking.

use serde::{Deserialize, Serialize};

/// Metadata stored alongside each vector and returned with every match.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PointPayload {
    /// Document title
    #[serde(default)]
    pub title: String,

    /// Source URL, when the document has one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,

    /// Free-form tags for filtered retrieval
    #[serde(default)]
    pub tags: Vec<String>,

    /// Original chunk text
    #[serde(default)]
    pub text: String,

    /// Ingestion timestamp, RFC 3339
    #[serde(default)]
    pub created_at: String,

    /// Ingestion timestamp, epoch milliseconds (range-filterable)
    #[serde(default)]
    pub created_at_ts: i64,
}

/// A logical point: id, embedding vector, payload.
///
/// Created at ingestion time and owned by the vector store afterwards.
/// Re-ingesting a document creates new points with new ids.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Point {
    pub id: String,
    pub vector: Vec<f32>,
    pub payload: PointPayload,
}

/// Vector layout of a target collection.
///
/// Collections either hold one implicit vector per point (`Single`) or a
/// mapping of independently-queryable named vectors (`Named`). The index
/// adapter is the only component permitted to branch on this.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VectorSchema {
    /// One unnamed vector slot per point
    Single,

    /// Named sub-vectors; `selected` is the slot used for reads and writes
    Named {
        /// All names the collection declares, in its own declared order
        names: Vec<String>,
        /// The deterministically chosen (or configured) slot
        selected: String,
    },
}

impl VectorSchema {
    /// Wire-friendly mode token.
    pub fn mode(&self) -> &'static str {
        match self {
            Self::Single => "single",
            Self::Named { .. } => "named",
        }
    }

    /// The selected vector name, for named schemas.
    pub fn vector_name(&self) -> Option<&str> {
        match self {
            Self::Single => None,
            Self::Named { selected, .. } => Some(selected.as_str()),
        }
    }
}

/// A ranked search result from the vector index.
///
/// Scores follow the backend's ordering; higher is better for the
/// cosine-similarity scoring used here.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoredMatch {
    pub id: String,
    pub score: f32,
    #[serde(default)]
    pub payload: PointPayload,
}

/// Collection statistics, read from the index's declared configuration.
#[derive(Debug, Clone, Serialize)]
pub struct IndexStats {
    pub points_count: u64,
    pub mode: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vector_name: Option<String>,
}
