//! Fieldbook MCP Server Binary
//!
//! Serves the full records tool surface over stdio.
//!
//! ```bash
//! # Point at a non-default backend
//! FIELDBOOK_BACKEND_BASE_URL=http://records.internal:8000 fieldbook-mcp
//! ```

use std::sync::Arc;

use anyhow::Result;
use tracing::info;

use fieldbook_api::ApiClient;
use fieldbook_core::config::{AppConfig, LoadOptions};
use fieldbook_mcp::FieldbookMcpServer;

#[tokio::main]
async fn main() -> Result<()> {
    // Logs must stay off stdout; the protocol owns it.
    tracing_subscriber::fmt().with_writer(std::io::stderr).init();

    let config = AppConfig::load(LoadOptions::default())?;
    info!(backend = %config.backend.base_url, "starting fieldbook MCP server");

    let client = Arc::new(ApiClient::from_config(&config.backend)?);
    FieldbookMcpServer::new(client).run_stdio().await
}
