//! Wire-shape translation between logical points/filters and the Qdrant
//! REST representation.
//!
//! Everything here is pure and total: no network, no branching beyond the
//! exhaustive schema match.

use std::collections::HashMap;

use serde::Serialize;
use serde_json::Value;

use crate::domain::models::{Point, PointPayload, QueryFilters, VectorSchema};

/// Backend-specific point representation for upserts.
#[derive(Debug, Serialize)]
pub struct WirePoint<'a> {
    pub id: &'a str,
    #[serde(flatten)]
    pub vector: WireVector<'a>,
    pub payload: &'a PointPayload,
}

/// The two vector layouts a collection can require.
#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum WireVector<'a> {
    Single { vector: &'a [f32] },
    Named { vectors: HashMap<&'a str, &'a [f32]> },
}

/// Shape a logical point for the given schema.
pub fn to_wire<'a>(point: &'a Point, schema: &'a VectorSchema) -> WirePoint<'a> {
    let vector = match schema {
        VectorSchema::Single => WireVector::Single {
            vector: &point.vector,
        },
        VectorSchema::Named { selected, .. } => WireVector::Named {
            vectors: HashMap::from([(selected.as_str(), point.vector.as_slice())]),
        },
    };

    WirePoint {
        id: &point.id,
        vector,
        payload: &point.payload,
    }
}

/// Shape the query vector for the given schema.
///
/// Named collections require the vector name alongside the vector.
pub fn query_vector(vector: &[f32], schema: &VectorSchema) -> Value {
    match schema {
        VectorSchema::Single => serde_json::json!(vector),
        VectorSchema::Named { selected, .. } => serde_json::json!({
            "name": selected,
            "vector": vector,
        }),
    }
}

/// Translate logical filters into a Qdrant filter clause.
///
/// All predicates are ANDed (a `must` conjunction); returns `None` when
/// there is nothing to filter on.
pub fn to_filter(filters: &QueryFilters) -> Option<Value> {
    if filters.is_empty() {
        return None;
    }

    let mut must = Vec::new();
    if !filters.tags.is_empty() {
        must.push(serde_json::json!({
            "key": "tags",
            "match": { "any": filters.tags },
        }));
    }
    if let Some(gte) = filters.since_ts {
        must.push(serde_json::json!({
            "key": "created_at_ts",
            "range": { "gte": gte },
        }));
    }

    Some(serde_json::json!({ "must": must }))
}
