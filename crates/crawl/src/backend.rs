use std::time::Duration;

use async_trait::async_trait;
use secrecy::{ExposeSecret, SecretString};
use serde_json::{json, Value};
use thiserror::Error;

use fieldbook_core::config::CrawlConfig;

#[derive(Debug, Error)]
pub enum CrawlError {
    #[error("timeout: {0}")]
    Timeout(String),
    #[error("connection error: {0}")]
    Connection(String),
    #[error("crawl service returned status {status}: {body}")]
    Status { status: u16, body: String },
}

/// Raw access to the crawl service. Implementations return the service's
/// JSON payload verbatim; shape probing happens in the normalizer.
#[async_trait]
pub trait CrawlBackend: Send + Sync {
    async fn search(&self, query: &str, limit: usize) -> Result<Value, CrawlError>;
    async fn scrape(&self, url: &str) -> Result<Value, CrawlError>;
}

/// HTTP client for the Firecrawl v1 API.
pub struct FirecrawlBackend {
    client: reqwest::Client,
    base_url: String,
    api_key: SecretString,
}

impl FirecrawlBackend {
    pub fn new(config: &CrawlConfig, api_key: SecretString) -> Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;
        Ok(Self { client, base_url: config.base_url.trim_end_matches('/').to_string(), api_key })
    }

    async fn post(&self, path: &str, body: Value) -> Result<Value, CrawlError> {
        let response = self
            .client
            .post(format!("{}{path}", self.base_url))
            .bearer_auth(self.api_key.expose_secret())
            .json(&body)
            .send()
            .await
            .map_err(classify)?;

        let status = response.status().as_u16();
        let body = response.text().await.map_err(classify)?;
        if !(200..300).contains(&status) {
            return Err(CrawlError::Status { status, body });
        }
        serde_json::from_str(&body)
            .map_err(|err| CrawlError::Connection(format!("malformed response body: {err}")))
    }
}

#[async_trait]
impl CrawlBackend for FirecrawlBackend {
    async fn search(&self, query: &str, limit: usize) -> Result<Value, CrawlError> {
        self.post("/v1/search", json!({"query": query, "limit": limit})).await
    }

    async fn scrape(&self, url: &str) -> Result<Value, CrawlError> {
        self.post(
            "/v1/scrape",
            json!({"url": url, "formats": ["markdown"], "onlyMainContent": true}),
        )
        .await
    }
}

fn classify(error: reqwest::Error) -> CrawlError {
    if error.is_timeout() {
        CrawlError::Timeout(error.to_string())
    } else {
        CrawlError::Connection(error.to_string())
    }
}
