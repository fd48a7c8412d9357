//! CLI commands for keiba-mcp.
//!
//! `serve` runs the MCP server; the other subcommands fetch and print
//! one record, which is handy for checking a parser against the live
//! site without an MCP client in the loop.

use clap::{Parser, Subcommand};

use crate::config::AppConfig;
use crate::scraper::parsers::{
    HorseParser, JockeyParser, RaceResultParser, ShutubaParser, shutuba,
};
use crate::scraper::{self, Browser, HttpClient};

#[derive(Parser)]
#[command(name = "keiba-mcp")]
#[command(version, about = "Structured netkeiba race data over MCP", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Serve the MCP tools over stdio
    Serve,

    /// Fetch one entry list and print it as JSON
    Shutuba {
        /// 12-digit race ID
        race_id: String,
    },

    /// Fetch one race result and print it as JSON
    Result {
        /// 12-digit race ID
        race_id: String,
    },

    /// Fetch one horse profile and print it as JSON
    Horse {
        /// 10-character horse ID
        horse_id: String,
    },

    /// Fetch one jockey profile and print it as JSON
    Jockey {
        /// 5-digit jockey ID
        jockey_id: String,
    },
}

/// Fetch and print an entry list.
pub async fn run_shutuba(race_id: String) -> anyhow::Result<()> {
    let config = AppConfig::load()?;

    let browser = Browser::launch(&config.render).await?;
    let url = scraper::shutuba_url(&race_id);
    let fetched = browser.fetch_rendered(&url, shutuba::READY_SELECTOR).await;
    browser.close().await?;

    let record = ShutubaParser::parse(&fetched?)?;
    println!("{}", serde_json::to_string_pretty(&record)?);
    Ok(())
}

/// Fetch and print a race result.
pub async fn run_result(race_id: String) -> anyhow::Result<()> {
    let config = AppConfig::load()?;
    let client = HttpClient::new(&config.fetch)?;

    let html = client.get(&scraper::race_result_url(&race_id)).await?;
    let record = RaceResultParser::parse(&html)?;
    println!("{}", serde_json::to_string_pretty(&record)?);
    Ok(())
}

/// Fetch and print a horse profile.
pub async fn run_horse(horse_id: String) -> anyhow::Result<()> {
    let config = AppConfig::load()?;
    let client = HttpClient::new(&config.fetch)?;

    let html = client.get(&scraper::horse_url(&horse_id)).await?;
    let record = HorseParser::parse(&html)?;
    println!("{}", serde_json::to_string_pretty(&record)?);
    Ok(())
}

/// Fetch and print a jockey profile.
pub async fn run_jockey(jockey_id: String) -> anyhow::Result<()> {
    let config = AppConfig::load()?;
    let client = HttpClient::new(&config.fetch)?;

    let html = client.get(&scraper::jockey_url(&jockey_id)).await?;
    let record = JockeyParser::parse(&html)?;
    println!("{}", serde_json::to_string_pretty(&record)?);
    Ok(())
}
