use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use serde_json::{json, Value};

use fieldbook_api::ApiClient;
use fieldbook_crawl::{WebQuery, WebSearcher};

use crate::llm::ToolDefinition;

/// A tool the model may call. Output is always a string: successful data is
/// rendered text, and failures are readable error strings the model can
/// recover from.
#[async_trait]
pub trait Tool: Send + Sync {
    fn name(&self) -> &'static str;
    fn description(&self) -> &'static str;
    fn parameters(&self) -> Value;
    async fn execute(&self, input: Value) -> String;
}

#[derive(Default)]
pub struct ToolRegistry {
    tools: HashMap<String, Box<dyn Tool>>,
}

impl ToolRegistry {
    pub fn register<T>(&mut self, tool: T)
    where
        T: Tool + 'static,
    {
        self.tools.insert(tool.name().to_string(), Box::new(tool));
    }

    pub fn definitions(&self) -> Vec<ToolDefinition> {
        let mut definitions: Vec<ToolDefinition> = self
            .tools
            .values()
            .map(|tool| ToolDefinition {
                name: tool.name().to_string(),
                description: tool.description().to_string(),
                parameters: tool.parameters(),
            })
            .collect();
        definitions.sort_by(|a, b| a.name.cmp(&b.name));
        definitions
    }

    /// A call to a name the registry does not know comes back as tool output
    /// the model can read, not an error.
    pub async fn execute(&self, name: &str, input: Value) -> String {
        match self.tools.get(name) {
            Some(tool) => tool.execute(input).await,
            None => format!("Error: unknown tool `{name}`"),
        }
    }

    pub fn len(&self) -> usize {
        self.tools.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }
}

fn object_schema(properties: Value, required: &[&str]) -> Value {
    json!({
        "type": "object",
        "properties": properties,
        "required": required,
    })
}

/// One read-oriented business lookup, forwarded to a dispatcher operation.
/// The model-facing name and schema mirror the question vocabulary; the
/// arguments pass through to the dispatcher untouched.
struct BusinessTool {
    client: Arc<ApiClient>,
    name: &'static str,
    operation: &'static str,
    description: &'static str,
    parameters: Value,
}

#[async_trait]
impl Tool for BusinessTool {
    fn name(&self) -> &'static str {
        self.name
    }

    fn description(&self) -> &'static str {
        self.description
    }

    fn parameters(&self) -> Value {
        self.parameters.clone()
    }

    async fn execute(&self, input: Value) -> String {
        match self.client.dispatch(self.operation, input).await {
            Ok(outcome) => outcome.render(),
            Err(err) => format!("Error: {err}"),
        }
    }
}

/// Web search / scrape, fronting the crawl service.
pub struct WebSearchTool {
    searcher: Arc<WebSearcher>,
}

impl WebSearchTool {
    pub fn new(searcher: Arc<WebSearcher>) -> Self {
        Self { searcher }
    }
}

#[async_trait]
impl Tool for WebSearchTool {
    fn name(&self) -> &'static str {
        "web_search"
    }

    fn description(&self) -> &'static str {
        "Search the web or scrape a specific URL. Use search_type='scrape' with the exact URL \
         to extract page content; use search_type='search' (default) for general queries."
    }

    fn parameters(&self) -> Value {
        object_schema(
            json!({
                "query": {"type": "string", "description": "Search terms, or the URL to scrape"},
                "search_type": {"type": "string", "enum": ["search", "scrape"]},
                "max_results": {"type": "integer", "minimum": 1}
            }),
            &["query"],
        )
    }

    async fn execute(&self, input: Value) -> String {
        match WebQuery::from_args(input) {
            Ok(request) => self.searcher.execute(&request).await.render(),
            Err(err) => format!("Error: {err}"),
        }
    }
}

/// The agent's default tool surface: the read-oriented business lookups plus
/// web search. Write operations stay behind the MCP surface.
pub fn default_registry(client: Arc<ApiClient>, searcher: Arc<WebSearcher>) -> ToolRegistry {
    let mut registry = ToolRegistry::default();
    for (name, operation, description, parameters) in business_tool_table() {
        registry.register(BusinessTool {
            client: client.clone(),
            name,
            operation,
            description,
            parameters,
        });
    }
    registry.register(WebSearchTool::new(searcher));
    registry
}

fn business_tool_table() -> Vec<(&'static str, &'static str, &'static str, Value)> {
    let id_of = |noun: &str, key: &str| {
        object_schema(
            json!({key: {"type": "integer", "description": format!("The {noun} id")}}),
            &[key],
        )
    };

    vec![
        (
            "customer_search",
            "list_customers",
            "Search for customers and get their basic information",
            object_schema(
                json!({"name_filter": {"type": "string", "description": "Substring of the customer name"}}),
                &[],
            ),
        ),
        (
            "customer_invoices",
            "get_customer_invoices",
            "Get all invoices for a specific customer",
            id_of("customer", "customer_id"),
        ),
        (
            "customer_contracts",
            "get_customer_contracts",
            "Get all contracts for a specific customer",
            id_of("customer", "customer_id"),
        ),
        (
            "customer_services",
            "get_customer_services",
            "Get the service history for a specific customer",
            id_of("customer", "customer_id"),
        ),
        (
            "item_search",
            "search_items",
            "Search items by name, model, or brand; optionally narrow to one brand",
            object_schema(
                json!({
                    "query": {"type": "string", "description": "Matched against name, model, and brand"},
                    "brand": {"type": "string", "description": "Restrict results to this brand"}
                }),
                &["query"],
            ),
        ),
        (
            "invoice_search",
            "search_invoices_by_customer",
            "Find invoices by customer name",
            object_schema(
                json!({"customer_name": {"type": "string", "description": "The customer name"}}),
                &["customer_name"],
            ),
        ),
        (
            "active_contracts",
            "get_active_contracts",
            "List all currently active contracts",
            object_schema(json!({}), &[]),
        ),
        (
            "serial_lookup",
            "list_serials",
            "List machine serial numbers, optionally narrowed to one item",
            object_schema(
                json!({"item_id_filter": {"type": "integer", "description": "Restrict to this item id"}}),
                &[],
            ),
        ),
        (
            "service_history",
            "list_services",
            "List service records, optionally within a date range (dates as YYYY-MM-DD)",
            object_schema(
                json!({
                    "start_date": {"type": "string", "description": "Range start, YYYY-MM-DD"},
                    "end_date": {"type": "string", "description": "Range end, YYYY-MM-DD"}
                }),
                &[],
            ),
        ),
    ]
}
