//! Command-line interface.

pub mod commands;
pub mod output;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Retrieval-augmented question answering over a vector index.
#[derive(Debug, Parser)]
#[command(name = "grimoire", version, about)]
pub struct Cli {
    /// Path to a config file (defaults to .grimoire/config.yaml)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Emit machine-readable JSON instead of tables
    #[arg(long, global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Run the HTTP API server
    Serve(commands::serve::ServeArgs),

    /// Ingest a document from a file or stdin
    Ingest(commands::ingest::IngestArgs),

    /// Ask a question against the indexed documents
    Query(commands::query::QueryArgs),

    /// Show collection statistics
    Stats,

    /// Write one throwaway point to verify the index write path
    Smoke,
}

/// Print an error and exit non-zero, honoring `--json`.
pub fn handle_error(err: anyhow::Error, json: bool) {
    if json {
        eprintln!(
            "{}",
            serde_json::json!({ "error": true, "detail": format!("{err:#}") })
        );
    } else {
        eprintln!("Error: {err:#}");
    }
    std::process::exit(1);
}
