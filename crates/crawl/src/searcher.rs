use std::sync::{Arc, OnceLock};

use regex::Regex;
use tracing::debug;

use fieldbook_core::config::CrawlConfig;
use fieldbook_core::Outcome;

use crate::backend::{CrawlBackend, FirecrawlBackend};
use crate::normalize::{normalize_scrape, normalize_search};
use crate::query::WebQuery;

fn url_prefix() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^https?://\S+").expect("literal pattern"))
}

fn url_anywhere() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"https?://\S+").expect("literal pattern"))
}

/// Front door for web lookups. Holds no per-query state; a missing API key
/// turns every call into a configuration failure without touching the wire.
pub struct WebSearcher {
    backend: Option<Arc<dyn CrawlBackend>>,
}

impl WebSearcher {
    pub fn new(backend: Arc<dyn CrawlBackend>) -> Self {
        Self { backend: Some(backend) }
    }

    /// Unconfigured searcher: answers every query with the missing-key
    /// failure. Lets the rest of the application boot without a crawl key.
    pub fn unconfigured() -> Self {
        Self { backend: None }
    }

    pub fn from_config(config: &CrawlConfig) -> Result<Self, reqwest::Error> {
        match &config.api_key {
            Some(key) => {
                let backend = FirecrawlBackend::new(config, key.clone())?;
                Ok(Self::new(Arc::new(backend)))
            }
            None => Ok(Self::unconfigured()),
        }
    }

    pub async fn execute(&self, request: &WebQuery) -> Outcome {
        let Some(backend) = &self.backend else {
            return Outcome::failure(
                "crawl API key not configured. Set FIELDBOOK_CRAWL_API_KEY to enable web search",
            );
        };

        if request.is_scrape() {
            return scrape(backend.as_ref(), &request.query).await;
        }

        let query = request.query.trim();
        debug!(query, limit = request.max_results, "web search");
        match backend.search(query, request.max_results).await {
            Ok(payload) => normalize_search(&payload, query, request.max_results),
            Err(err) => Outcome::failure(format!("search for '{query}' failed: {err}")),
        }
    }
}

async fn scrape(backend: &dyn CrawlBackend, raw_query: &str) -> Outcome {
    let Some(url) = extract_url(raw_query) else {
        return Outcome::invalid_text(format!(
            "cannot scrape '{raw_query}' - no valid URL found. Provide a URL starting with \
             http:// or https://"
        ));
    };

    debug!(url, "scrape");
    match backend.scrape(url).await {
        Ok(payload) => normalize_scrape(&payload, url),
        Err(err) => Outcome::failure(format!("could not scrape URL {url}: {err}")),
    }
}

/// A scrape query must be a URL; a URL embedded in surrounding text is
/// promoted to the whole query.
fn extract_url(raw_query: &str) -> Option<&str> {
    let trimmed = raw_query.trim();
    if let Some(found) = url_prefix().find(trimmed) {
        return Some(found.as_str());
    }
    url_anywhere().find(trimmed).map(|found| found.as_str())
}
