use serde::Deserialize;
use serde_json::Value;

use fieldbook_core::commands::{InvoiceCreate, InvoiceUpdate};
use fieldbook_core::ToolError;

use crate::registry::PlannedCall;
use crate::transport::ApiRequest;

use super::{args, non_empty};

#[derive(Deserialize)]
struct ListArgs {
    #[serde(default)]
    customer_name_filter: Option<String>,
}

#[derive(Deserialize)]
struct IdArgs {
    invoice_id: i64,
}

#[derive(Deserialize)]
struct CreateArgs {
    invoice_data: Value,
}

#[derive(Deserialize)]
struct UpdateArgs {
    invoice_id: i64,
    invoice_data: Value,
}

#[derive(Deserialize)]
struct ByCustomerArgs {
    customer_name: String,
}

fn by_customer_request(customer_name: &str) -> ApiRequest {
    ApiRequest::get("/api/invoices/by_customer/").with_query("customer_name", customer_name)
}

/// The backend filters by customer name itself, so a filtered listing is
/// just a different endpoint with no client-side pass.
pub(crate) fn list(value: Value) -> Result<PlannedCall, ToolError> {
    let parsed: ListArgs = args("list_invoices", value)?;
    let request = match non_empty(parsed.customer_name_filter) {
        Some(name) => by_customer_request(&name),
        None => ApiRequest::get("/api/invoices/"),
    };
    Ok(PlannedCall::plain("list invoices", request))
}

pub(crate) fn get(value: Value) -> Result<PlannedCall, ToolError> {
    let parsed: IdArgs = args("get_invoice", value)?;
    Ok(PlannedCall::plain(
        "get invoice",
        ApiRequest::get(format!("/api/invoices/{}/", parsed.invoice_id)),
    ))
}

pub(crate) fn create(value: Value) -> Result<PlannedCall, ToolError> {
    let parsed: CreateArgs = args("create_invoice", value)?;
    let command = InvoiceCreate::from_args(parsed.invoice_data)?;
    Ok(PlannedCall::plain(
        "create invoice",
        ApiRequest::post("/api/invoices/", command.payload()),
    ))
}

pub(crate) fn update(value: Value) -> Result<PlannedCall, ToolError> {
    let parsed: UpdateArgs = args("update_invoice", value)?;
    let command = InvoiceUpdate::from_args(parsed.invoice_data)?;
    Ok(PlannedCall::plain(
        "update invoice",
        ApiRequest::patch(format!("/api/invoices/{}/", parsed.invoice_id), command.payload()),
    ))
}

pub(crate) fn delete(value: Value) -> Result<PlannedCall, ToolError> {
    let parsed: IdArgs = args("delete_invoice", value)?;
    Ok(PlannedCall::plain(
        "delete invoice",
        ApiRequest::delete(format!("/api/invoices/{}/", parsed.invoice_id)),
    ))
}

pub(crate) fn search_by_customer(value: Value) -> Result<PlannedCall, ToolError> {
    let parsed: ByCustomerArgs = args("search_invoices_by_customer", value)?;
    Ok(PlannedCall::plain(
        "search invoices by customer",
        by_customer_request(&parsed.customer_name),
    ))
}
