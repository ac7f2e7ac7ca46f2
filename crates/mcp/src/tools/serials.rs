use rmcp::handler::server::wrapper::Parameters;
use rmcp::model::CallToolResult;
use rmcp::{schemars, tool, tool_router, ErrorData as McpError};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::server::{to_args, FieldbookMcpServer};

#[derive(Debug, Serialize, Deserialize, schemars::JsonSchema)]
pub struct ListSerialsInput {
    #[schemars(description = "Keep only serials registered to this item id")]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub item_id_filter: Option<i64>,
}

#[derive(Debug, Serialize, Deserialize, schemars::JsonSchema)]
pub struct SerialIdInput {
    #[schemars(description = "The serial record id")]
    pub serial_id: i64,
}

#[derive(Debug, Serialize, Deserialize, schemars::JsonSchema)]
pub struct CreateSerialInput {
    #[schemars(
        description = "Serial fields: serial_number and item (required), status, \
                       manufactured_date, warranty_end_date (dates as YYYY-MM-DD)"
    )]
    pub serial_data: Value,
}

#[derive(Debug, Serialize, Deserialize, schemars::JsonSchema)]
pub struct UpdateSerialInput {
    #[schemars(description = "The serial record id")]
    pub serial_id: i64,
    #[schemars(description = "Fields to change; omitted fields keep their value")]
    pub serial_data: Value,
}

#[derive(Debug, Serialize, Deserialize, schemars::JsonSchema)]
pub struct SerialsByItemInput {
    #[schemars(description = "The item id to list serial numbers for")]
    pub item_id: i64,
}

#[tool_router(router = serials_router, vis = "pub(crate)")]
impl FieldbookMcpServer {
    #[tool(description = "List serial records, optionally filtered by item")]
    async fn list_serials(
        &self,
        Parameters(input): Parameters<ListSerialsInput>,
    ) -> Result<CallToolResult, McpError> {
        self.run("list_serials", to_args(input)?).await
    }

    #[tool(description = "Get one serial record by id")]
    async fn get_serial(
        &self,
        Parameters(input): Parameters<SerialIdInput>,
    ) -> Result<CallToolResult, McpError> {
        self.run("get_serial", to_args(input)?).await
    }

    #[tool(description = "Register a serial number for an item")]
    async fn create_serial(
        &self,
        Parameters(input): Parameters<CreateSerialInput>,
    ) -> Result<CallToolResult, McpError> {
        self.run("create_serial", to_args(input)?).await
    }

    #[tool(description = "Update fields on an existing serial record")]
    async fn update_serial(
        &self,
        Parameters(input): Parameters<UpdateSerialInput>,
    ) -> Result<CallToolResult, McpError> {
        self.run("update_serial", to_args(input)?).await
    }

    #[tool(description = "Delete a serial record by id")]
    async fn delete_serial(
        &self,
        Parameters(input): Parameters<SerialIdInput>,
    ) -> Result<CallToolResult, McpError> {
        self.run("delete_serial", to_args(input)?).await
    }

    #[tool(description = "List the serial numbers registered for an item")]
    async fn lookup_serials_by_item(
        &self,
        Parameters(input): Parameters<SerialsByItemInput>,
    ) -> Result<CallToolResult, McpError> {
        self.run("lookup_serials_by_item", to_args(input)?).await
    }
}
