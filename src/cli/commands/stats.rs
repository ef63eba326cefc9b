//! `grimoire stats`: collection statistics.

use anyhow::{Context, Result};

use crate::domain::models::Config;
use crate::infrastructure::setup::build_pipeline;

pub async fn execute(config: Config, json: bool) -> Result<()> {
    let pipeline = build_pipeline(&config)?;
    let stats = pipeline.stats().await.context("failed to read stats")?;

    if json {
        println!("{}", serde_json::to_string_pretty(&stats)?);
    } else {
        println!("Collection: {}", config.index.collection);
        println!("Points:     {}", stats.points_count);
        println!("Mode:       {}", stats.mode);
        if let Some(name) = &stats.vector_name {
            println!("Vector:     {name}");
        }
    }

    Ok(())
}
