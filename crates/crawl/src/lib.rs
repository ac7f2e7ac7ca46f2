//! Web search and page scraping against a crawl service.
//!
//! The service's API has shipped two response shapes over time and gives no
//! version flag, so [`normalize`] probes the structure of each payload
//! instead of trusting any single schema. Either way the caller gets one
//! canonical [`fieldbook_core::Outcome`] with pre-formatted text.

mod backend;
pub mod normalize;
mod query;
mod searcher;

pub use backend::{CrawlBackend, CrawlError, FirecrawlBackend};
pub use query::WebQuery;
pub use searcher::WebSearcher;
