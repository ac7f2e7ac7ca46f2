use serde::Deserialize;
use serde_json::Value;

use fieldbook_core::commands::{CustomerCreate, CustomerUpdate};
use fieldbook_core::ToolError;

use crate::registry::{PlannedCall, PostFilter};
use crate::transport::ApiRequest;

use super::{args, non_empty};

#[derive(Deserialize)]
struct ListArgs {
    #[serde(default)]
    name_filter: Option<String>,
}

#[derive(Deserialize)]
struct IdArgs {
    customer_id: i64,
}

#[derive(Deserialize)]
struct CreateArgs {
    customer_data: Value,
}

#[derive(Deserialize)]
struct UpdateArgs {
    customer_id: i64,
    customer_data: Value,
}

/// The backend has no name query parameter for customers, so the filter is
/// applied client-side after normalization.
pub(crate) fn list(value: Value) -> Result<PlannedCall, ToolError> {
    let parsed: ListArgs = args("list_customers", value)?;
    let post = match non_empty(parsed.name_filter) {
        Some(name) => PostFilter::CustomerName(name),
        None => PostFilter::None,
    };
    Ok(PlannedCall { action: "list customers", request: ApiRequest::get("/api/customers/"), post })
}

pub(crate) fn get(value: Value) -> Result<PlannedCall, ToolError> {
    let parsed: IdArgs = args("get_customer", value)?;
    Ok(PlannedCall::plain(
        "get customer",
        ApiRequest::get(format!("/api/customers/{}/", parsed.customer_id)),
    ))
}

pub(crate) fn create(value: Value) -> Result<PlannedCall, ToolError> {
    let parsed: CreateArgs = args("create_customer", value)?;
    let command = CustomerCreate::from_args(parsed.customer_data)?;
    Ok(PlannedCall::plain(
        "create customer",
        ApiRequest::post("/api/customers/", command.payload()),
    ))
}

pub(crate) fn update(value: Value) -> Result<PlannedCall, ToolError> {
    let parsed: UpdateArgs = args("update_customer", value)?;
    let command = CustomerUpdate::from_args(parsed.customer_data)?;
    Ok(PlannedCall::plain(
        "update customer",
        ApiRequest::patch(format!("/api/customers/{}/", parsed.customer_id), command.payload()),
    ))
}

pub(crate) fn delete(value: Value) -> Result<PlannedCall, ToolError> {
    let parsed: IdArgs = args("delete_customer", value)?;
    Ok(PlannedCall::plain(
        "delete customer",
        ApiRequest::delete(format!("/api/customers/{}/", parsed.customer_id)),
    ))
}

pub(crate) fn invoices(value: Value) -> Result<PlannedCall, ToolError> {
    let parsed: IdArgs = args("get_customer_invoices", value)?;
    Ok(PlannedCall::plain(
        "get customer invoices",
        ApiRequest::get(format!("/api/customers/{}/invoices/", parsed.customer_id)),
    ))
}

pub(crate) fn contracts(value: Value) -> Result<PlannedCall, ToolError> {
    let parsed: IdArgs = args("get_customer_contracts", value)?;
    Ok(PlannedCall::plain(
        "get customer contracts",
        ApiRequest::get(format!("/api/customers/{}/contracts/", parsed.customer_id)),
    ))
}

pub(crate) fn services(value: Value) -> Result<PlannedCall, ToolError> {
    let parsed: IdArgs = args("get_customer_services", value)?;
    Ok(PlannedCall::plain(
        "get customer services",
        ApiRequest::get(format!("/api/customers/{}/services/", parsed.customer_id)),
    ))
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use crate::registry::{plan, PostFilter};
    use crate::transport::Method;

    #[test]
    fn list_with_name_filter_plans_a_client_side_match() {
        let planned = plan("list_customers", json!({"name_filter": "Alpha"})).expect("plan");
        assert_eq!(planned.request.path, "/api/customers/");
        assert!(planned.request.query.is_empty());
        assert_eq!(planned.post, PostFilter::CustomerName("Alpha".to_string()));
    }

    #[test]
    fn empty_name_filter_means_no_filter() {
        let planned = plan("list_customers", json!({"name_filter": ""})).expect("plan");
        assert_eq!(planned.post, PostFilter::None);
    }

    #[test]
    fn create_sends_only_present_fields() {
        let planned = plan(
            "create_customer",
            json!({"customer_data": {"name": "Company Alpha", "email": "ops@alpha.example"}}),
        )
        .expect("plan");
        assert_eq!(planned.request.method, Method::Post);
        assert_eq!(
            planned.request.body,
            Some(json!({"name": "Company Alpha", "email": "ops@alpha.example"}))
        );
    }

    #[test]
    fn nested_listing_paths_are_per_customer() {
        for (tool, suffix) in [
            ("get_customer_invoices", "invoices"),
            ("get_customer_contracts", "contracts"),
            ("get_customer_services", "services"),
        ] {
            let planned = plan(tool, json!({"customer_id": 12})).expect("plan");
            assert_eq!(planned.request.path, format!("/api/customers/12/{suffix}/"));
        }
    }
}
