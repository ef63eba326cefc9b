//! `grimoire ingest`: ingest one document from a file or stdin.

use std::io::Read;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;

use crate::cli::output::create_spinner;
use crate::domain::models::{Config, DocumentInput};
use crate::infrastructure::setup::build_pipeline;

#[derive(Debug, Args)]
pub struct IngestArgs {
    /// Read the document from this file instead of stdin
    #[arg(long)]
    pub file: Option<PathBuf>,

    /// Document title
    #[arg(long)]
    pub title: Option<String>,

    /// Source URL recorded with each chunk
    #[arg(long)]
    pub url: Option<String>,

    /// Tag for filtered retrieval (repeatable)
    #[arg(long = "tag")]
    pub tags: Vec<String>,
}

pub async fn execute(args: IngestArgs, config: Config, json: bool) -> Result<()> {
    let text = match &args.file {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?,
        None => {
            let mut buf = String::new();
            std::io::stdin()
                .read_to_string(&mut buf)
                .context("failed to read stdin")?;
            buf
        }
    };

    let title = args.title.clone().or_else(|| {
        args.file
            .as_ref()
            .and_then(|p| p.file_stem())
            .map(|s| s.to_string_lossy().into_owned())
    });

    let doc = DocumentInput {
        title,
        text,
        url: args.url,
        tags: args.tags,
    };

    let pipeline = build_pipeline(&config)?;

    let spinner = (!json).then(|| create_spinner("Chunking, embedding, and upserting..."));
    let result = pipeline.ingest(&doc).await;
    if let Some(spinner) = spinner {
        spinner.finish_and_clear();
    }

    let receipt = result.context("ingestion failed")?;

    if json {
        println!("{}", serde_json::to_string_pretty(&receipt)?);
    } else {
        println!(
            "Inserted {} chunk{} ({} mode{})",
            receipt.inserted,
            if receipt.inserted == 1 { "" } else { "s" },
            receipt.mode,
            receipt
                .vector_name
                .as_deref()
                .map(|n| format!(", vector \"{n}\""))
                .unwrap_or_default()
        );
    }

    Ok(())
}
