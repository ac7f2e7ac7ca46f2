use std::sync::Arc;

use rmcp::handler::server::router::tool::ToolRouter;
use rmcp::model::{
    CallToolResult, Content, Implementation, ProtocolVersion, ServerCapabilities, ServerInfo,
};
use rmcp::{tool_handler, ErrorData as McpError, ServerHandler, ServiceExt};
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, info};

use fieldbook_api::ApiClient;

/// MCP server over the records backend. One dispatcher client shared by all
/// 38 tools; the per-resource routers live in `tools/`.
#[derive(Clone)]
pub struct FieldbookMcpServer {
    pub(crate) client: Arc<ApiClient>,
    pub(crate) tool_router: ToolRouter<Self>,
}

impl FieldbookMcpServer {
    pub fn new(client: Arc<ApiClient>) -> Self {
        Self {
            client,
            tool_router: Self::customers_router()
                + Self::items_router()
                + Self::invoices_router()
                + Self::contracts_router()
                + Self::serials_router()
                + Self::services_router(),
        }
    }

    /// Run the server over stdio until the peer disconnects.
    pub async fn run_stdio(self) -> anyhow::Result<()> {
        info!("starting MCP server on stdio");
        let service = self.serve(rmcp::transport::stdio()).await?;
        let _quit = service.waiting().await?;
        info!("MCP server shutdown complete");
        Ok(())
    }

    /// Shared execution path: forward to the dispatcher and hand back the
    /// rendered outcome. Invocation faults (unknown operation, schema) map
    /// to invalid-params; backend faults are already readable text.
    pub(crate) async fn run(
        &self,
        operation: &'static str,
        args: Value,
    ) -> Result<CallToolResult, McpError> {
        debug!(operation, "mcp tool call");
        match self.client.dispatch(operation, args).await {
            Ok(outcome) => Ok(CallToolResult::success(vec![Content::text(outcome.render())])),
            Err(err) => Err(McpError::invalid_params(err.to_string(), None)),
        }
    }
}

pub(crate) fn to_args<T: Serialize>(input: T) -> Result<Value, McpError> {
    serde_json::to_value(input).map_err(|err| McpError::invalid_params(err.to_string(), None))
}

#[tool_handler]
impl ServerHandler for FieldbookMcpServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: ProtocolVersion::V_2024_11_05,
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: Implementation {
                name: "fieldbook-mcp".to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
                ..Default::default()
            },
            instructions: Some(
                "Fieldbook MCP Server - business records for AI agents. Query and manage \
                 customers, items, invoices, contracts, serial numbers, and service records."
                    .to_string(),
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;
    use std::sync::Arc;

    use async_trait::async_trait;
    use rmcp::ServerHandler;

    use fieldbook_api::{
        ApiClient, ApiRequest, RawResponse, Transport, TransportError, TOOL_NAMES,
    };

    use super::{to_args, FieldbookMcpServer};

    struct NoBackend;

    #[async_trait]
    impl Transport for NoBackend {
        async fn send(&self, _request: &ApiRequest) -> Result<RawResponse, TransportError> {
            Err(TransportError::Connection("no backend in tests".to_string()))
        }
    }

    fn server() -> FieldbookMcpServer {
        FieldbookMcpServer::new(Arc::new(ApiClient::new(Arc::new(NoBackend))))
    }

    #[test]
    fn router_exposes_every_dispatcher_operation() {
        let exposed: BTreeSet<String> = server()
            .tool_router
            .list_all()
            .into_iter()
            .map(|tool| tool.name.to_string())
            .collect();
        let expected: BTreeSet<String> = TOOL_NAMES.iter().map(|name| name.to_string()).collect();

        assert_eq!(exposed.len(), 38);
        assert_eq!(exposed, expected);
    }

    #[test]
    fn every_tool_carries_a_description() {
        for tool in server().tool_router.list_all() {
            assert!(
                tool.description.as_deref().is_some_and(|text| !text.is_empty()),
                "{} is missing a description",
                tool.name
            );
        }
    }

    #[test]
    fn server_info_advertises_tools() {
        let info = server().get_info();
        assert_eq!(info.server_info.name, "fieldbook-mcp");
        assert!(info.capabilities.tools.is_some());
        assert!(info.instructions.is_some());
    }

    #[test]
    fn input_serialization_drops_nothing() {
        #[derive(serde::Serialize)]
        struct Sample {
            customer_id: i64,
        }

        let value = to_args(Sample { customer_id: 7 }).expect("serializable");
        assert_eq!(value, serde_json::json!({"customer_id": 7}));
    }
}
