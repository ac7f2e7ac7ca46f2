//! The tool registry: a closed mapping from operation names to endpoint
//! templates, verbs, and command schemas.

use serde_json::{Map, Value};

use fieldbook_core::ToolError;

use crate::resources::{contracts, customers, invoices, items, serials, services};
use crate::transport::ApiRequest;

/// A request ready to send, produced without any network traffic. The
/// `action` annotates empty-success responses; `post` is the client-side
/// filter applied after normalization.
#[derive(Clone, Debug, PartialEq)]
pub struct PlannedCall {
    pub action: &'static str,
    pub request: ApiRequest,
    pub post: PostFilter,
}

impl PlannedCall {
    pub(crate) fn plain(action: &'static str, request: ApiRequest) -> Self {
        Self { action, request, post: PostFilter::None }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum PostFilter {
    None,
    CustomerName(String),
    Items { query: Option<String>, brand: Option<String> },
}

/// Every operation the dispatcher knows, grouped by resource.
pub const TOOL_NAMES: &[&str] = &[
    // customers
    "list_customers",
    "get_customer",
    "create_customer",
    "update_customer",
    "delete_customer",
    "get_customer_invoices",
    "get_customer_contracts",
    "get_customer_services",
    // items
    "list_items",
    "get_item",
    "create_item",
    "update_item",
    "delete_item",
    "search_items",
    // invoices
    "list_invoices",
    "get_invoice",
    "create_invoice",
    "update_invoice",
    "delete_invoice",
    "search_invoices_by_customer",
    // contracts
    "list_contracts",
    "get_contract",
    "create_contract",
    "update_contract",
    "delete_contract",
    "get_active_contracts",
    // serials
    "list_serials",
    "get_serial",
    "create_serial",
    "update_serial",
    "delete_serial",
    "lookup_serials_by_item",
    // services
    "list_services",
    "get_service",
    "create_service",
    "update_service",
    "delete_service",
    "get_services_by_date",
];

/// Route a named operation to its planned call. Unknown names and malformed
/// arguments fail here; nothing below this point touches the network.
pub fn plan(tool: &str, args: Value) -> Result<PlannedCall, ToolError> {
    // Tools invoked with no arguments at all are treated as empty argument
    // sets so optional-only schemas still apply their defaults.
    let args = if args.is_null() { Value::Object(Map::new()) } else { args };

    match tool {
        "list_customers" => customers::list(args),
        "get_customer" => customers::get(args),
        "create_customer" => customers::create(args),
        "update_customer" => customers::update(args),
        "delete_customer" => customers::delete(args),
        "get_customer_invoices" => customers::invoices(args),
        "get_customer_contracts" => customers::contracts(args),
        "get_customer_services" => customers::services(args),

        "list_items" => items::list(args),
        "get_item" => items::get(args),
        "create_item" => items::create(args),
        "update_item" => items::update(args),
        "delete_item" => items::delete(args),
        "search_items" => items::search(args),

        "list_invoices" => invoices::list(args),
        "get_invoice" => invoices::get(args),
        "create_invoice" => invoices::create(args),
        "update_invoice" => invoices::update(args),
        "delete_invoice" => invoices::delete(args),
        "search_invoices_by_customer" => invoices::search_by_customer(args),

        "list_contracts" => contracts::list(args),
        "get_contract" => contracts::get(args),
        "create_contract" => contracts::create(args),
        "update_contract" => contracts::update(args),
        "delete_contract" => contracts::delete(args),
        "get_active_contracts" => contracts::active(args),

        "list_serials" => serials::list(args),
        "get_serial" => serials::get(args),
        "create_serial" => serials::create(args),
        "update_serial" => serials::update(args),
        "delete_serial" => serials::delete(args),
        "lookup_serials_by_item" => serials::by_item(args),

        "list_services" => services::list(args),
        "get_service" => services::get(args),
        "create_service" => services::create(args),
        "update_service" => services::update(args),
        "delete_service" => services::delete(args),
        "get_services_by_date" => services::by_date(args),

        other => Err(ToolError::unknown_tool(other)),
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use fieldbook_core::ToolError;

    use super::{plan, TOOL_NAMES};
    use crate::transport::Method;

    #[test]
    fn every_registered_tool_name_plans_or_rejects_its_arguments() {
        // Listing tools accept empty arguments; the rest must fail with a
        // schema error rather than an unknown-tool error.
        for tool in TOOL_NAMES {
            match plan(tool, json!({})) {
                Ok(_) => {}
                Err(ToolError::Schema(_)) => {}
                Err(other) => panic!("{tool} should be routable, got {other}"),
            }
        }
    }

    #[test]
    fn unknown_tool_is_a_configuration_error() {
        let error = plan("reboot_printer", json!({})).expect_err("not a tool");
        assert!(matches!(error, ToolError::Configuration(_)));
    }

    #[test]
    fn registry_covers_all_thirty_eight_operations() {
        assert_eq!(TOOL_NAMES.len(), 38);
    }

    #[test]
    fn null_arguments_are_treated_as_empty() {
        let planned = plan("list_customers", serde_json::Value::Null).expect("no-arg listing");
        assert_eq!(planned.request.method, Method::Get);
        assert_eq!(planned.request.path, "/api/customers/");
    }

    #[test]
    fn verbs_follow_the_rest_mapping() {
        let get = plan("get_item", json!({"item_id": 9})).expect("plan");
        assert_eq!(get.request.method, Method::Get);
        assert_eq!(get.request.path, "/api/items/9/");

        let delete = plan("delete_item", json!({"item_id": 9})).expect("plan");
        assert_eq!(delete.request.method, Method::Delete);

        let create = plan(
            "create_item",
            json!({"item_data": {"name": "Toner", "item_group": 1}}),
        )
        .expect("plan");
        assert_eq!(create.request.method, Method::Post);
        assert_eq!(create.request.path, "/api/items/");

        let update = plan(
            "update_item",
            json!({"item_id": 9, "item_data": {"price": "15.00"}}),
        )
        .expect("plan");
        assert_eq!(update.request.method, Method::Patch);
        assert_eq!(update.request.path, "/api/items/9/");
    }
}
