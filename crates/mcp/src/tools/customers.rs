use rmcp::handler::server::wrapper::Parameters;
use rmcp::model::CallToolResult;
use rmcp::{schemars, tool, tool_router, ErrorData as McpError};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::server::{to_args, FieldbookMcpServer};

#[derive(Debug, Serialize, Deserialize, schemars::JsonSchema)]
pub struct ListCustomersInput {
    #[schemars(description = "Keep only customers whose name contains this text")]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name_filter: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, schemars::JsonSchema)]
pub struct CustomerIdInput {
    #[schemars(description = "The customer id")]
    pub customer_id: i64,
}

#[derive(Debug, Serialize, Deserialize, schemars::JsonSchema)]
pub struct CreateCustomerInput {
    #[schemars(description = "Customer fields: name (required), email, phone, address")]
    pub customer_data: Value,
}

#[derive(Debug, Serialize, Deserialize, schemars::JsonSchema)]
pub struct UpdateCustomerInput {
    #[schemars(description = "The customer id")]
    pub customer_id: i64,
    #[schemars(description = "Fields to change; omitted fields keep their value")]
    pub customer_data: Value,
}

#[tool_router(router = customers_router, vis = "pub(crate)")]
impl FieldbookMcpServer {
    #[tool(description = "List customers, optionally filtered by name substring")]
    async fn list_customers(
        &self,
        Parameters(input): Parameters<ListCustomersInput>,
    ) -> Result<CallToolResult, McpError> {
        self.run("list_customers", to_args(input)?).await
    }

    #[tool(description = "Get one customer by id")]
    async fn get_customer(
        &self,
        Parameters(input): Parameters<CustomerIdInput>,
    ) -> Result<CallToolResult, McpError> {
        self.run("get_customer", to_args(input)?).await
    }

    #[tool(description = "Create a customer")]
    async fn create_customer(
        &self,
        Parameters(input): Parameters<CreateCustomerInput>,
    ) -> Result<CallToolResult, McpError> {
        self.run("create_customer", to_args(input)?).await
    }

    #[tool(description = "Update fields on an existing customer")]
    async fn update_customer(
        &self,
        Parameters(input): Parameters<UpdateCustomerInput>,
    ) -> Result<CallToolResult, McpError> {
        self.run("update_customer", to_args(input)?).await
    }

    #[tool(description = "Delete a customer by id")]
    async fn delete_customer(
        &self,
        Parameters(input): Parameters<CustomerIdInput>,
    ) -> Result<CallToolResult, McpError> {
        self.run("delete_customer", to_args(input)?).await
    }

    #[tool(description = "List all invoices for a customer")]
    async fn get_customer_invoices(
        &self,
        Parameters(input): Parameters<CustomerIdInput>,
    ) -> Result<CallToolResult, McpError> {
        self.run("get_customer_invoices", to_args(input)?).await
    }

    #[tool(description = "List all contracts for a customer")]
    async fn get_customer_contracts(
        &self,
        Parameters(input): Parameters<CustomerIdInput>,
    ) -> Result<CallToolResult, McpError> {
        self.run("get_customer_contracts", to_args(input)?).await
    }

    #[tool(description = "List the service history for a customer")]
    async fn get_customer_services(
        &self,
        Parameters(input): Parameters<CustomerIdInput>,
    ) -> Result<CallToolResult, McpError> {
        self.run("get_customer_services", to_args(input)?).await
    }
}
