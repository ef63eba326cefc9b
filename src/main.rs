//! Grimoire CLI entry point.

use clap::Parser;

use grimoire::cli::{Cli, Commands};
use grimoire::infrastructure::logging;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let config = match cli.config.as_ref() {
        Some(path) => grimoire::ConfigLoader::load_from_file(path),
        None => grimoire::ConfigLoader::load(),
    };
    let config = match config {
        Ok(config) => config,
        Err(err) => {
            grimoire::cli::handle_error(err, cli.json);
            return;
        }
    };

    logging::init(&config.logging);

    let result = match cli.command {
        Commands::Serve(args) => grimoire::cli::commands::serve::execute(args, config).await,
        Commands::Ingest(args) => {
            grimoire::cli::commands::ingest::execute(args, config, cli.json).await
        }
        Commands::Query(args) => {
            grimoire::cli::commands::query::execute(args, config, cli.json).await
        }
        Commands::Stats => grimoire::cli::commands::stats::execute(config, cli.json).await,
        Commands::Smoke => grimoire::cli::commands::smoke::execute(config, cli.json).await,
    };

    if let Err(err) = result {
        grimoire::cli::handle_error(err, cli.json);
    }
}
