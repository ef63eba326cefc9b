//! `grimoire smoke`: verify the index write path end to end.
//!
//! Writes a single zero-vector point with a throwaway payload. Exercises
//! schema resolution and the upsert wire format without spending an
//! embedding call.

use anyhow::{Context, Result};
use chrono::{SecondsFormat, Utc};
use uuid::Uuid;

use crate::domain::models::{Config, Point, PointPayload};
use crate::infrastructure::setup::build_pipeline;

pub async fn execute(config: Config, json: bool) -> Result<()> {
    let pipeline = build_pipeline(&config)?;
    let index = pipeline.index();

    let now = Utc::now();
    let point = Point {
        id: Uuid::new_v4().to_string(),
        vector: vec![0.0; config.workers_ai.embedding_dimension],
        payload: PointPayload {
            title: "smoke".to_string(),
            url: None,
            tags: vec!["smoke".to_string()],
            text: "smoke".to_string(),
            created_at: now.to_rfc3339_opts(SecondsFormat::Millis, true),
            created_at_ts: now.timestamp_millis(),
        },
    };

    let schema = index.describe_schema().await;
    let inserted = index
        .upsert(std::slice::from_ref(&point), &schema)
        .await
        .context("smoke upsert failed")?;

    if json {
        println!(
            "{}",
            serde_json::json!({ "ok": true, "inserted": inserted, "mode": schema.mode() })
        );
    } else {
        println!("Wrote {} smoke point ({} mode)", inserted, schema.mode());
    }

    Ok(())
}
