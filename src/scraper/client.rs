//! Plain HTTP fetches for db.netkeiba.com pages.

use anyhow::{Context, Result};
use std::time::Duration;
use tokio::sync::Mutex;
use tokio::time::Instant;

use crate::config::FetchConfig;

/// HTTP client that keeps a minimum interval between outbound requests.
pub struct HttpClient {
    client: reqwest::Client,
    min_interval: Duration,
    last_request: Mutex<Option<Instant>>,
}

impl HttpClient {
    pub fn new(config: &FetchConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(config.user_agent.clone())
            .build()
            .context("failed to build HTTP client")?;

        Ok(Self {
            client,
            min_interval: Duration::from_millis(config.min_interval_ms),
            last_request: Mutex::new(None),
        })
    }

    /// Fetch a page body. Non-success statuses are errors; there are no
    /// retries here.
    pub async fn get(&self, url: &str) -> Result<String> {
        self.pace().await;
        tracing::debug!("GET {}", url);

        let response = self
            .client
            .get(url)
            .send()
            .await
            .with_context(|| format!("request to {} failed", url))?;
        let response = response
            .error_for_status()
            .with_context(|| format!("request to {} returned an error status", url))?;

        Ok(response.text().await?)
    }

    /// Hold until `min_interval` has passed since the previous request.
    /// The lock is held across the sleep so concurrent fetches queue.
    async fn pace(&self) {
        let mut last = self.last_request.lock().await;
        if let Some(prev) = *last {
            let elapsed = prev.elapsed();
            if elapsed < self.min_interval {
                tokio::time::sleep(self.min_interval - elapsed).await;
            }
        }
        *last = Some(Instant::now());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_config(min_interval_ms: u64) -> FetchConfig {
        FetchConfig {
            timeout_secs: 5,
            user_agent: "keiba-mcp-test".to_string(),
            min_interval_ms,
        }
    }

    #[tokio::test]
    async fn test_pace_enforces_minimum_interval() {
        let client = HttpClient::new(&test_config(50)).unwrap();

        let start = Instant::now();
        client.pace().await;
        client.pace().await;
        client.pace().await;

        // Two gaps of at least 50ms each after the free first call.
        assert!(start.elapsed() >= Duration::from_millis(100));
    }

    #[tokio::test]
    async fn test_first_request_is_not_delayed() {
        let client = HttpClient::new(&test_config(1_000)).unwrap();

        let start = Instant::now();
        client.pace().await;
        assert!(start.elapsed() < Duration::from_millis(500));
    }
}
