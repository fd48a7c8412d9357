//! Browser automation using chromiumoxide.
//!
//! The shutuba page assembles its entry table in JavaScript, so the raw
//! server response never contains it; the page has to be rendered and
//! snapshotted once the table exists.

use anyhow::Result;
use chromiumoxide::browser::{Browser as ChromeBrowser, BrowserConfig};
use chromiumoxide::page::Page;
use futures::StreamExt;
use std::time::Duration;

use crate::config::RenderConfig;

/// Browser wrapper for rendered-page fetches.
pub struct Browser {
    browser: ChromeBrowser,
    handle: tokio::task::JoinHandle<()>,
    wait_timeout: Duration,
    poll_interval: Duration,
}

impl Browser {
    /// Launch a new headless browser instance.
    pub async fn launch(config: &RenderConfig) -> Result<Self> {
        let chrome_path = config
            .chrome_path
            .clone()
            .unwrap_or_else(|| default_chrome_path().to_string());

        let browser_config = BrowserConfig::builder()
            .chrome_executable(chrome_path)
            .no_sandbox()
            .arg("--headless=new")
            .arg("--disable-gpu")
            .arg("--disable-dev-shm-usage")
            .arg("--no-first-run")
            .arg("--no-default-browser-check")
            .arg("--disable-extensions")
            .arg("--disable-background-networking")
            .arg("--mute-audio")
            .window_size(1920, 1080)
            .build()
            .map_err(|e| anyhow::anyhow!("Failed to build browser config: {}", e))?;

        let (browser, mut handler) = ChromeBrowser::launch(browser_config)
            .await
            .map_err(|e| anyhow::anyhow!("Failed to launch browser: {}", e))?;

        // The handler stream must keep draining for the browser to work.
        let handle = tokio::spawn(async move {
            loop {
                match handler.next().await {
                    Some(Ok(_)) => continue,
                    Some(Err(_)) => continue,
                    None => break,
                }
            }
        });

        Ok(Self {
            browser,
            handle,
            wait_timeout: Duration::from_secs(config.wait_timeout_secs),
            poll_interval: Duration::from_millis(config.poll_interval_ms),
        })
    }

    /// Fetch `url` and return the DOM snapshot once `ready_selector`
    /// matches something on the page.
    pub async fn fetch_rendered(&self, url: &str, ready_selector: &str) -> Result<String> {
        let page = self
            .browser
            .new_page(url)
            .await
            .map_err(|e| anyhow::anyhow!("Failed to create new page: {}", e))?;

        self.wait_for(&page, ready_selector).await?;

        let html = page
            .content()
            .await
            .map_err(|e| anyhow::anyhow!("Failed to get page content: {}", e))?;

        let _ = page.close().await;

        Ok(html)
    }

    /// Poll until `selector` is present, bounded by the configured wait
    /// timeout.
    async fn wait_for(&self, page: &Page, selector: &str) -> Result<()> {
        let deadline = tokio::time::Instant::now() + self.wait_timeout;
        loop {
            if page.find_element(selector).await.is_ok() {
                return Ok(());
            }
            if tokio::time::Instant::now() >= deadline {
                anyhow::bail!(
                    "timed out after {:?} waiting for {}",
                    self.wait_timeout,
                    selector
                );
            }
            tokio::time::sleep(self.poll_interval).await;
        }
    }

    /// Close the browser.
    pub async fn close(mut self) -> Result<()> {
        let _ = self.browser.close().await;
        self.handle.abort();
        Ok(())
    }
}

fn default_chrome_path() -> &'static str {
    if cfg!(target_os = "macos") {
        "/Applications/Google Chrome.app/Contents/MacOS/Google Chrome"
    } else if cfg!(target_os = "windows") {
        "C:\\Program Files\\Google\\Chrome\\Application\\chrome.exe"
    } else {
        "google-chrome"
    }
}
