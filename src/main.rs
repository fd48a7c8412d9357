//! keiba-mcp: netkeiba race, horse, and jockey data as MCP tools.

mod cli;
mod config;
mod mcp;
mod scraper;

use clap::Parser;
use rmcp::{ServiceExt, transport::stdio};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::cli::{Cli, Commands};
use crate::config::AppConfig;
use crate::mcp::McpServer;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Logs go to stderr; stdout belongs to the MCP transport.
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "keiba_mcp=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Serve => run_server().await,
        Commands::Shutuba { race_id } => cli::run_shutuba(race_id).await,
        Commands::Result { race_id } => cli::run_result(race_id).await,
        Commands::Horse { horse_id } => cli::run_horse(horse_id).await,
        Commands::Jockey { jockey_id } => cli::run_jockey(jockey_id).await,
    }
}

/// Run the MCP server over stdio.
async fn run_server() -> anyhow::Result<()> {
    let config = AppConfig::load()?;
    tracing::info!("Starting MCP server on stdio");

    let service = McpServer::new(config)?
        .serve(stdio())
        .await
        .inspect_err(|e| tracing::error!("Serve error: {e:?}"))?;

    service.waiting().await?;

    Ok(())
}
