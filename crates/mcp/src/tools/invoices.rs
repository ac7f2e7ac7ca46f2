use rmcp::handler::server::wrapper::Parameters;
use rmcp::model::CallToolResult;
use rmcp::{schemars, tool, tool_router, ErrorData as McpError};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::server::{to_args, FieldbookMcpServer};

#[derive(Debug, Serialize, Deserialize, schemars::JsonSchema)]
pub struct ListInvoicesInput {
    #[schemars(description = "Keep only invoices belonging to customers with this name")]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub customer_name_filter: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, schemars::JsonSchema)]
pub struct InvoiceIdInput {
    #[schemars(description = "The invoice id")]
    pub invoice_id: i64,
}

#[derive(Debug, Serialize, Deserialize, schemars::JsonSchema)]
pub struct CreateInvoiceInput {
    #[schemars(
        description = "Invoice fields: customer and invoice_date (required), status, details \
                       (line items with item, quantity, unit_price). Line and invoice totals \
                       are computed server-side."
    )]
    pub invoice_data: Value,
}

#[derive(Debug, Serialize, Deserialize, schemars::JsonSchema)]
pub struct UpdateInvoiceInput {
    #[schemars(description = "The invoice id")]
    pub invoice_id: i64,
    #[schemars(description = "Fields to change; omitted fields keep their value")]
    pub invoice_data: Value,
}

#[derive(Debug, Serialize, Deserialize, schemars::JsonSchema)]
pub struct InvoicesByCustomerInput {
    #[schemars(description = "The customer name to search invoices for")]
    pub customer_name: String,
}

#[tool_router(router = invoices_router, vis = "pub(crate)")]
impl FieldbookMcpServer {
    #[tool(description = "List invoices, optionally filtered by customer name")]
    async fn list_invoices(
        &self,
        Parameters(input): Parameters<ListInvoicesInput>,
    ) -> Result<CallToolResult, McpError> {
        self.run("list_invoices", to_args(input)?).await
    }

    #[tool(description = "Get one invoice by id")]
    async fn get_invoice(
        &self,
        Parameters(input): Parameters<InvoiceIdInput>,
    ) -> Result<CallToolResult, McpError> {
        self.run("get_invoice", to_args(input)?).await
    }

    #[tool(description = "Create an invoice; totals are derived from the line items")]
    async fn create_invoice(
        &self,
        Parameters(input): Parameters<CreateInvoiceInput>,
    ) -> Result<CallToolResult, McpError> {
        self.run("create_invoice", to_args(input)?).await
    }

    #[tool(description = "Update fields on an existing invoice")]
    async fn update_invoice(
        &self,
        Parameters(input): Parameters<UpdateInvoiceInput>,
    ) -> Result<CallToolResult, McpError> {
        self.run("update_invoice", to_args(input)?).await
    }

    #[tool(description = "Delete an invoice by id")]
    async fn delete_invoice(
        &self,
        Parameters(input): Parameters<InvoiceIdInput>,
    ) -> Result<CallToolResult, McpError> {
        self.run("delete_invoice", to_args(input)?).await
    }

    #[tool(description = "Find invoices by customer name")]
    async fn search_invoices_by_customer(
        &self,
        Parameters(input): Parameters<InvoicesByCustomerInput>,
    ) -> Result<CallToolResult, McpError> {
        self.run("search_invoices_by_customer", to_args(input)?).await
    }
}
