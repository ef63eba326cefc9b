//! `grimoire serve`: run the HTTP API.

use anyhow::Result;
use clap::Args;

use crate::domain::models::Config;
use crate::infrastructure::setup::build_pipeline;
use crate::server;

#[derive(Debug, Args)]
pub struct ServeArgs {
    /// Override the configured bind port
    #[arg(long)]
    pub port: Option<u16>,

    /// Override the configured bind host
    #[arg(long)]
    pub host: Option<String>,
}

pub async fn execute(args: ServeArgs, mut config: Config) -> Result<()> {
    if let Some(port) = args.port {
        config.server.port = port;
    }
    if let Some(host) = args.host {
        config.server.host = host;
    }

    let pipeline = build_pipeline(&config)?;
    server::serve(&config, pipeline).await
}
