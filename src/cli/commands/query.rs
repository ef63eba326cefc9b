//! `grimoire query`: ask a question against the indexed documents.

use anyhow::{Context, Result};
use chrono::Utc;
use clap::Args;

use crate::cli::output::{create_spinner, format_sources_table};
use crate::domain::models::{Config, QueryFilters};
use crate::infrastructure::setup::build_pipeline;

#[derive(Debug, Args)]
pub struct QueryArgs {
    /// The question to ask
    pub message: String,

    /// Only consider documents carrying this tag (repeatable)
    #[arg(long = "tag")]
    pub tags: Vec<String>,

    /// Only consider documents ingested within the last N days
    #[arg(long)]
    pub since_days: Option<f64>,
}

pub async fn execute(args: QueryArgs, config: Config, json: bool) -> Result<()> {
    let filters = QueryFilters {
        tags: args
            .tags
            .iter()
            .map(|t| t.trim())
            .filter(|t| !t.is_empty())
            .map(ToString::to_string)
            .collect(),
        since_ts: args
            .since_days
            .filter(|d| d.is_finite() && *d > 0.0)
            .map(|days| Utc::now().timestamp_millis() - (days * 86_400_000.0) as i64),
    };

    let pipeline = build_pipeline(&config)?;

    let spinner = (!json).then(|| create_spinner("Retrieving and answering..."));
    let result = pipeline.ask(&args.message, &filters).await;
    if let Some(spinner) = spinner {
        spinner.finish_and_clear();
    }

    let outcome = result.context("query failed")?;

    if json {
        println!("{}", serde_json::to_string_pretty(&outcome)?);
    } else {
        println!("{}\n", outcome.answer);
        if outcome.sources.is_empty() {
            println!("No sources matched.");
        } else {
            println!("Sources:");
            println!("{}", format_sources_table(&outcome.sources));
        }
    }

    Ok(())
}
