// src/cvpr/client.rs
use reqwest::header;

use crate::cvpr::config::ClientConfig;
use crate::pipeline::PageSource;
use crate::utils::error::FetchError;

/// Fetches the accepted-papers listing over HTTP.
pub struct CvprClient {
    client: reqwest::Client,
    config: ClientConfig,
}

impl CvprClient {
    /// Creates a reqwest client configured with the browser-like User-Agent
    /// and request timeout from `config`.
    pub fn new(config: ClientConfig) -> Result<Self, FetchError> {
        let client = reqwest::Client::builder()
            .user_agent(config.user_agent.as_str())
            .timeout(config.timeout)
            .build()?; // Propagate client build error if any

        Ok(Self { client, config })
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Downloads the listing page for `year`. Not retried.
    pub async fn download_page(&self, year: u32) -> Result<String, FetchError> {
        let url = self.config.page_url(year);
        tracing::info!("Downloading accepted papers from: {}", url);
        tracing::debug!("Using User-Agent: {}", self.config.user_agent);

        let response = self
            .client
            .get(&url)
            .header(header::ACCEPT, "text/html,application/xhtml+xml,*/*;q=0.8")
            .send()
            .await?; // Propagates reqwest::Error as FetchError::Network

        let status = response.status();
        if !status.is_success() {
            tracing::error!("HTTP error status: {} for URL: {}", status, url);
            if status == reqwest::StatusCode::NOT_FOUND {
                return Err(FetchError::PageNotFound(url));
            }
            return Err(FetchError::Http(status));
        }

        let body = response.text().await?;
        tracing::debug!("Successfully downloaded {} bytes from {}", body.len(), url);

        Ok(body)
    }
}

impl PageSource for CvprClient {
    async fn fetch_page(&self, year: u32) -> Result<String, FetchError> {
        self.download_page(year).await
    }

    fn describe(&self, year: u32) -> String {
        self.config.page_url(year)
    }
}
