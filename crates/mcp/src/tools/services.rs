use rmcp::handler::server::wrapper::Parameters;
use rmcp::model::CallToolResult;
use rmcp::{schemars, tool, tool_router, ErrorData as McpError};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::server::{to_args, FieldbookMcpServer};

#[derive(Debug, Serialize, Deserialize, schemars::JsonSchema)]
pub struct ListServicesInput {
    #[schemars(description = "Optional range start as YYYY-MM-DD; either bound alone filters")]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_date: Option<String>,
    #[schemars(description = "Range end as YYYY-MM-DD")]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_date: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, schemars::JsonSchema)]
pub struct ServiceIdInput {
    #[schemars(description = "The service record id")]
    pub service_id: i64,
}

#[derive(Debug, Serialize, Deserialize, schemars::JsonSchema)]
pub struct CreateServiceInput {
    #[schemars(
        description = "Service fields: service_name, customer, service_date (required), \
                       technician, status, notes, details (per-detail cost and labor). \
                       total_cost is computed server-side."
    )]
    pub service_data: Value,
}

#[derive(Debug, Serialize, Deserialize, schemars::JsonSchema)]
pub struct UpdateServiceInput {
    #[schemars(description = "The service record id")]
    pub service_id: i64,
    #[schemars(description = "Fields to change; omitted fields keep their value")]
    pub service_data: Value,
}

#[derive(Debug, Serialize, Deserialize, schemars::JsonSchema)]
pub struct ServicesByDateInput {
    #[schemars(description = "Range start as YYYY-MM-DD")]
    pub start_date: String,
    #[schemars(description = "Optional range end as YYYY-MM-DD")]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_date: Option<String>,
}

#[tool_router(router = services_router, vis = "pub(crate)")]
impl FieldbookMcpServer {
    #[tool(description = "List service records, optionally within a date range")]
    async fn list_services(
        &self,
        Parameters(input): Parameters<ListServicesInput>,
    ) -> Result<CallToolResult, McpError> {
        self.run("list_services", to_args(input)?).await
    }

    #[tool(description = "Get one service record by id")]
    async fn get_service(
        &self,
        Parameters(input): Parameters<ServiceIdInput>,
    ) -> Result<CallToolResult, McpError> {
        self.run("get_service", to_args(input)?).await
    }

    #[tool(description = "Create a service record; total cost is derived from the details")]
    async fn create_service(
        &self,
        Parameters(input): Parameters<CreateServiceInput>,
    ) -> Result<CallToolResult, McpError> {
        self.run("create_service", to_args(input)?).await
    }

    #[tool(description = "Update fields on an existing service record")]
    async fn update_service(
        &self,
        Parameters(input): Parameters<UpdateServiceInput>,
    ) -> Result<CallToolResult, McpError> {
        self.run("update_service", to_args(input)?).await
    }

    #[tool(description = "Delete a service record by id")]
    async fn delete_service(
        &self,
        Parameters(input): Parameters<ServiceIdInput>,
    ) -> Result<CallToolResult, McpError> {
        self.run("delete_service", to_args(input)?).await
    }

    #[tool(description = "List services in a date range")]
    async fn get_services_by_date(
        &self,
        Parameters(input): Parameters<ServicesByDateInput>,
    ) -> Result<CallToolResult, McpError> {
        self.run("get_services_by_date", to_args(input)?).await
    }
}
