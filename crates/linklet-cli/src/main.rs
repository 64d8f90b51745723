mod cli;
mod commands;

use crate::cli::{Cli, Command};
use clap::Parser;
use linklet_registry::{LinkRegistry, RandomGenerator};
use linklet_store::JsonFileStore;
use linklet_telemetry::{LogClient, RemoteSink};
use std::sync::Arc;
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();

    let args = Cli::parse();

    let store = JsonFileStore::open(&args.data_file)?;
    let mut registry = LinkRegistry::new(store, RandomGenerator::new()).await?;

    if let (Some(endpoint), Some(token)) = (&args.log_endpoint, &args.log_token) {
        info!(endpoint = %endpoint, "remote log collector enabled");
        let sink = RemoteSink::new(LogClient::new(endpoint.as_str(), token.as_str()));
        registry = registry.with_sink(Arc::new(sink));
    }

    match args.command {
        Command::Shorten {
            url,
            validity,
            code,
        } => commands::shorten(&registry, &args.base_url, url, validity, code).await,
        Command::Visit { id } => commands::visit(&registry, id).await,
        Command::List => commands::list(&registry, &args.base_url).await,
        Command::Stats => commands::stats(&registry, &args.base_url).await,
    }
}
