//! HTTP client for the provider's server listing page

use crate::servers::scrape::{extract_hostnames, parse_selector};
use crate::servers::HostnameSource;
use crate::{defaults, AppError, Config, Result};
use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;

/// Fetches the listing page and scrapes hostnames out of it
pub struct ListingClient {
    client: Client,
    url: String,
    selector: String,
}

impl ListingClient {
    /// Create a client for `url`, extracting elements matching `selector`
    pub fn new(url: &str, selector: &str, timeout: Duration) -> Result<Self> {
        // Reject a bad selector before any request goes out
        parse_selector(selector)?;
        url::Url::parse(url)?;

        // The provider serves an error page to unknown user agents
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(defaults::DEFAULT_USER_AGENT)
            .build()
            .map_err(|e| AppError::internal(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            url: url.to_string(),
            selector: selector.to_string(),
        })
    }

    pub fn from_config(config: &Config) -> Result<Self> {
        Self::new(&config.source_url, &config.selector, config.fetch_timeout())
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    /// Download the raw listing page
    pub async fn fetch_page(&self) -> Result<String> {
        let response = self
            .client
            .get(&self.url)
            .send()
            .await?
            .error_for_status()
            .map_err(|e| AppError::http_request(format!("{} returned an error status: {}", self.url, e)))?;

        Ok(response.text().await?)
    }
}

#[async_trait]
impl HostnameSource for ListingClient {
    async fn fetch_hostnames(&self) -> Result<Vec<String>> {
        let body = self.fetch_page().await?;
        let selector = parse_selector(&self.selector)?;
        Ok(extract_hostnames(&body, &selector))
    }
}
