use rmcp::handler::server::wrapper::Parameters;
use rmcp::model::CallToolResult;
use rmcp::{schemars, tool, tool_router, ErrorData as McpError};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::server::{to_args, FieldbookMcpServer};

#[derive(Debug, Serialize, Deserialize, schemars::JsonSchema)]
pub struct ListItemsInput {
    #[schemars(description = "Keep only items matching this text in name, model, or brand")]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name_filter: Option<String>,
    #[schemars(description = "Keep only items of this brand")]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub brand_filter: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, schemars::JsonSchema)]
pub struct ItemIdInput {
    #[schemars(description = "The item id")]
    pub item_id: i64,
}

#[derive(Debug, Serialize, Deserialize, schemars::JsonSchema)]
pub struct CreateItemInput {
    #[schemars(description = "Item fields: name and item_group (required), model, brand, price")]
    pub item_data: Value,
}

#[derive(Debug, Serialize, Deserialize, schemars::JsonSchema)]
pub struct UpdateItemInput {
    #[schemars(description = "The item id")]
    pub item_id: i64,
    #[schemars(description = "Fields to change; omitted fields keep their value")]
    pub item_data: Value,
}

#[derive(Debug, Serialize, Deserialize, schemars::JsonSchema)]
pub struct SearchItemsInput {
    #[schemars(description = "Matched against item name, model, and brand")]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub query: Option<String>,
    #[schemars(description = "Restrict matches to this brand")]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub brand: Option<String>,
}

#[tool_router(router = items_router, vis = "pub(crate)")]
impl FieldbookMcpServer {
    #[tool(description = "List items, optionally filtered by name/model/brand text and brand")]
    async fn list_items(
        &self,
        Parameters(input): Parameters<ListItemsInput>,
    ) -> Result<CallToolResult, McpError> {
        self.run("list_items", to_args(input)?).await
    }

    #[tool(description = "Get one item by id")]
    async fn get_item(
        &self,
        Parameters(input): Parameters<ItemIdInput>,
    ) -> Result<CallToolResult, McpError> {
        self.run("get_item", to_args(input)?).await
    }

    #[tool(description = "Create an item")]
    async fn create_item(
        &self,
        Parameters(input): Parameters<CreateItemInput>,
    ) -> Result<CallToolResult, McpError> {
        self.run("create_item", to_args(input)?).await
    }

    #[tool(description = "Update fields on an existing item")]
    async fn update_item(
        &self,
        Parameters(input): Parameters<UpdateItemInput>,
    ) -> Result<CallToolResult, McpError> {
        self.run("update_item", to_args(input)?).await
    }

    #[tool(description = "Delete an item by id")]
    async fn delete_item(
        &self,
        Parameters(input): Parameters<ItemIdInput>,
    ) -> Result<CallToolResult, McpError> {
        self.run("delete_item", to_args(input)?).await
    }

    #[tool(description = "Search items by text across name, model, and brand")]
    async fn search_items(
        &self,
        Parameters(input): Parameters<SearchItemsInput>,
    ) -> Result<CallToolResult, McpError> {
        self.run("search_items", to_args(input)?).await
    }
}
