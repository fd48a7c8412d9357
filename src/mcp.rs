//! MCP tool surface: each tool fetches one document, parses it, and
//! returns the record as JSON.

use futures::future;
use rmcp::{
    ServerHandler,
    handler::server::{tool::ToolRouter, wrapper::Parameters},
    model::{ErrorData as McpError, ServerCapabilities, ServerInfo},
    tool, tool_handler, tool_router,
};
use schemars::JsonSchema;
use serde::Deserialize;
use std::sync::Arc;

use crate::config::AppConfig;
use crate::scraper::parsers::{
    HorseParser, JockeyParser, RaceResultParser, ShutubaParser, shutuba,
};
use crate::scraper::{self, Browser, HttpClient};

#[derive(Clone)]
pub struct McpServer {
    client: Arc<HttpClient>,
    config: AppConfig,
    tool_router: ToolRouter<Self>,
}

#[tool_router]
impl McpServer {
    pub fn new(config: AppConfig) -> anyhow::Result<Self> {
        Ok(Self {
            client: Arc::new(HttpClient::new(&config.fetch)?),
            config,
            tool_router: Self::tool_router(),
        })
    }

    #[tool(
        name = "get_shutuba",
        description = "Fetch the entry list (shutuba) for a JRA race from race.netkeiba.com. Returns race header fields and one entry per starter in post-position order, each with frame, number, horse, sex/age, impost weight, jockey, horse weight, odds, and popularity."
    )]
    pub async fn get_shutuba(
        &self,
        Parameters(params): Parameters<RaceIdParams>,
    ) -> Result<String, McpError> {
        let browser = Browser::launch(&self.config.render)
            .await
            .inspect_err(|e| tracing::error!("Browser launch failed: {e:?}"))
            .map_err(|e| {
                McpError::internal_error(format!("Failed to launch browser: {e}"), None)
            })?;

        let url = scraper::shutuba_url(&params.race_id);
        let fetched = browser.fetch_rendered(&url, shutuba::READY_SELECTOR).await;
        let _ = browser.close().await;

        let html = fetched
            .inspect_err(|e| tracing::error!("Failed to fetch entry list: {e}"))
            .map_err(|e| {
                McpError::internal_error(format!("Failed to fetch entry list: {e}"), None)
            })?;

        let record = ShutubaParser::parse(&html).map_err(|e| {
            McpError::internal_error(format!("Failed to parse entry list: {e}"), None)
        })?;
        to_json(&record)
    }

    #[tool(
        name = "get_race_result",
        description = "Fetch the result of a JRA race from db.netkeiba.com. Returns race header fields and one item per row in finish order, including non-finishers (中止/除外/取消 keep their raw rank text)."
    )]
    pub async fn get_race_result(
        &self,
        Parameters(params): Parameters<RaceIdParams>,
    ) -> Result<String, McpError> {
        let url = scraper::race_result_url(&params.race_id);
        let html = self
            .client
            .get(&url)
            .await
            .inspect_err(|e| tracing::error!("Failed to fetch race result: {e}"))
            .map_err(|e| {
                McpError::internal_error(format!("Failed to fetch race result: {e}"), None)
            })?;

        let record = RaceResultParser::parse(&html).map_err(|e| {
            McpError::internal_error(format!("Failed to parse race result: {e}"), None)
        })?;
        to_json(&record)
    }

    #[tool(
        name = "get_horse_profile",
        description = "Fetch a horse profile from db.netkeiba.com: name, birth, connections, earnings, career record, two-generation pedigree, and full race history (most recent first)."
    )]
    pub async fn get_horse_profile(
        &self,
        Parameters(params): Parameters<HorseIdParams>,
    ) -> Result<String, McpError> {
        let url = scraper::horse_url(&params.horse_id);
        let html = self
            .client
            .get(&url)
            .await
            .inspect_err(|e| tracing::error!("Failed to fetch horse profile: {e}"))
            .map_err(|e| {
                McpError::internal_error(format!("Failed to fetch horse profile: {e}"), None)
            })?;

        let record = HorseParser::parse(&html).map_err(|e| {
            McpError::internal_error(format!("Failed to parse horse profile: {e}"), None)
        })?;
        to_json(&record)
    }

    #[tool(
        name = "get_horse_profiles",
        description = "Fetch several horse profiles at once. Returns a JSON array in the same order as the requested IDs."
    )]
    pub async fn get_horse_profiles(
        &self,
        Parameters(params): Parameters<HorseIdsParams>,
    ) -> Result<String, McpError> {
        let fetches = params.horse_ids.iter().map(|horse_id| {
            let client = self.client.clone();
            let url = scraper::horse_url(horse_id);
            async move { client.get(&url).await }
        });

        // join_all keeps results in input order regardless of completion
        // order.
        let pages = future::join_all(fetches).await;

        let mut profiles = Vec::with_capacity(pages.len());
        for page in pages {
            let html = page
                .inspect_err(|e| tracing::error!("Failed to fetch horse profile: {e}"))
                .map_err(|e| {
                    McpError::internal_error(format!("Failed to fetch horse profile: {e}"), None)
                })?;
            profiles.push(HorseParser::parse(&html).map_err(|e| {
                McpError::internal_error(format!("Failed to parse horse profile: {e}"), None)
            })?);
        }
        to_json(&profiles)
    }

    #[tool(
        name = "get_jockey_profile",
        description = "Fetch a jockey profile from db.netkeiba.com: name, physique, debut year, win counts, and prize money, all as displayed on the page."
    )]
    pub async fn get_jockey_profile(
        &self,
        Parameters(params): Parameters<JockeyIdParams>,
    ) -> Result<String, McpError> {
        let url = scraper::jockey_url(&params.jockey_id);
        let html = self
            .client
            .get(&url)
            .await
            .inspect_err(|e| tracing::error!("Failed to fetch jockey profile: {e}"))
            .map_err(|e| {
                McpError::internal_error(format!("Failed to fetch jockey profile: {e}"), None)
            })?;

        let record = JockeyParser::parse(&html).map_err(|e| {
            McpError::internal_error(format!("Failed to parse jockey profile: {e}"), None)
        })?;
        to_json(&record)
    }
}

#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct RaceIdParams {
    /// 12-digit race ID, e.g. "202509020611".
    pub race_id: String,
}

#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct HorseIdParams {
    /// 10-character horse ID, e.g. "2022104617".
    pub horse_id: String,
}

#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct HorseIdsParams {
    /// Horse IDs; the response array follows this order.
    pub horse_ids: Vec<String>,
}

#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct JockeyIdParams {
    /// 5-digit jockey ID, e.g. "01115".
    pub jockey_id: String,
}

fn to_json<T: serde::Serialize>(value: &T) -> Result<String, McpError> {
    serde_json::to_string_pretty(value)
        .map_err(|e| McpError::internal_error(format!("Failed to serialize record: {e}"), None))
}

#[tool_handler]
impl ServerHandler for McpServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            instructions: Some(include_str!("./instructions.md").to_string()),
            ..Default::default()
        }
    }
}
