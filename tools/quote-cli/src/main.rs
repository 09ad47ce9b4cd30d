//! # Rental Quote CLI
//!
//! Command-line interface for pricing rentals against a listing snapshot.

mod commands;
mod logging;
mod source;

use anyhow::{Context, Result};
use clap::Parser;
use commands::{Cli, CliHandler};
use quote_engine::QuoteConfig;
use source::JsonFileSource;
use tracing::debug;

#[tokio::main]
async fn main() -> Result<()> {
    // Parse CLI arguments
    let cli = Cli::parse();

    logging::initialize_logging(&cli.log_level, &cli.log_format)?;

    let config = match &cli.config {
        Some(path) => QuoteConfig::from_file(path)
            .with_context(|| format!("Failed to load config from {}", path.display()))?,
        None => QuoteConfig::from_env().context("Failed to load config from environment")?,
    };
    debug!(?config, "Loaded quote configuration");

    let handler = CliHandler::new(Box::new(JsonFileSource::new(&cli.listings)), config);
    handler.handle_command(cli.command).await?;

    Ok(())
}
