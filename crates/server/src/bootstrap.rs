use std::sync::Arc;

use thiserror::Error;
use tracing::info;

use fieldbook_agent::llm::AzureOpenAiClient;
use fieldbook_agent::runtime::AgentRuntime;
use fieldbook_agent::tools::default_registry;
use fieldbook_api::ApiClient;
use fieldbook_core::config::{AppConfig, ConfigError, LoadOptions};
use fieldbook_crawl::WebSearcher;

/// Everything the server needs, wired once at startup from validated
/// config. No lazy globals: the agent is constructed here and shared.
pub struct Application {
    pub config: AppConfig,
    pub agent: Arc<AgentRuntime>,
}

#[derive(Debug, Error)]
pub enum BootstrapError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("http client construction failed: {0}")]
    HttpClient(#[source] reqwest::Error),
    #[error("llm client construction failed: {0}")]
    Llm(#[source] anyhow::Error),
}

pub async fn bootstrap(options: LoadOptions) -> Result<Application, BootstrapError> {
    let config = AppConfig::load(options)?;
    bootstrap_with_config(config).await
}

pub async fn bootstrap_with_config(config: AppConfig) -> Result<Application, BootstrapError> {
    info!(event_name = "system.bootstrap.start", "starting application bootstrap");

    // The query surface needs full LLM credentials; fail here, not on the
    // first request.
    config.llm.ensure_complete()?;

    let api_client =
        Arc::new(ApiClient::from_config(&config.backend).map_err(BootstrapError::HttpClient)?);
    let searcher =
        Arc::new(WebSearcher::from_config(&config.crawl).map_err(BootstrapError::HttpClient)?);
    let llm = Arc::new(AzureOpenAiClient::from_config(&config.llm).map_err(BootstrapError::Llm)?);

    let tools = default_registry(api_client, searcher);
    info!(
        event_name = "system.bootstrap.tools_registered",
        tool_count = tools.len(),
        "agent tool surface registered"
    );

    let agent = Arc::new(AgentRuntime::new(llm, tools, config.llm.max_turns));
    Ok(Application { config, agent })
}
