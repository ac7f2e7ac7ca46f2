use rmcp::handler::server::wrapper::Parameters;
use rmcp::model::CallToolResult;
use rmcp::{schemars, tool, tool_router, ErrorData as McpError};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::server::{to_args, FieldbookMcpServer};

#[derive(Debug, Serialize, Deserialize, schemars::JsonSchema)]
pub struct ListContractsInput {
    #[schemars(description = "Filter by status; 'active' narrows to currently active contracts")]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status_filter: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, schemars::JsonSchema)]
pub struct ContractIdInput {
    #[schemars(description = "The contract id")]
    pub contract_id: i64,
}

#[derive(Debug, Serialize, Deserialize, schemars::JsonSchema)]
pub struct CreateContractInput {
    #[schemars(
        description = "Contract fields: customer, start_date, end_date, contract_type \
                       (required), status, terms, contact_details"
    )]
    pub contract_data: Value,
}

#[derive(Debug, Serialize, Deserialize, schemars::JsonSchema)]
pub struct UpdateContractInput {
    #[schemars(description = "The contract id")]
    pub contract_id: i64,
    #[schemars(description = "Fields to change; omitted fields keep their value")]
    pub contract_data: Value,
}

#[tool_router(router = contracts_router, vis = "pub(crate)")]
impl FieldbookMcpServer {
    #[tool(description = "List contracts, optionally narrowed to active ones")]
    async fn list_contracts(
        &self,
        Parameters(input): Parameters<ListContractsInput>,
    ) -> Result<CallToolResult, McpError> {
        self.run("list_contracts", to_args(input)?).await
    }

    #[tool(description = "Get one contract by id")]
    async fn get_contract(
        &self,
        Parameters(input): Parameters<ContractIdInput>,
    ) -> Result<CallToolResult, McpError> {
        self.run("get_contract", to_args(input)?).await
    }

    #[tool(description = "Create a contract")]
    async fn create_contract(
        &self,
        Parameters(input): Parameters<CreateContractInput>,
    ) -> Result<CallToolResult, McpError> {
        self.run("create_contract", to_args(input)?).await
    }

    #[tool(description = "Update fields on an existing contract")]
    async fn update_contract(
        &self,
        Parameters(input): Parameters<UpdateContractInput>,
    ) -> Result<CallToolResult, McpError> {
        self.run("update_contract", to_args(input)?).await
    }

    #[tool(description = "Delete a contract by id")]
    async fn delete_contract(
        &self,
        Parameters(input): Parameters<ContractIdInput>,
    ) -> Result<CallToolResult, McpError> {
        self.run("delete_contract", to_args(input)?).await
    }

    #[tool(description = "List all currently active contracts")]
    async fn get_active_contracts(&self) -> Result<CallToolResult, McpError> {
        self.run("get_active_contracts", serde_json::json!({})).await
    }
}
