use serde::Deserialize;
use serde_json::Value;

use fieldbook_core::commands::{ContractCreate, ContractUpdate};
use fieldbook_core::ToolError;

use crate::registry::PlannedCall;
use crate::transport::ApiRequest;

use super::{args, non_empty};

#[derive(Deserialize)]
struct ListArgs {
    #[serde(default)]
    status_filter: Option<String>,
}

#[derive(Deserialize)]
struct IdArgs {
    contract_id: i64,
}

#[derive(Deserialize)]
struct CreateArgs {
    contract_data: Value,
}

#[derive(Deserialize)]
struct UpdateArgs {
    contract_id: i64,
    contract_data: Value,
}

/// An `active` status filter is the one listing shortcut the backend offers;
/// any other status falls back to the unfiltered collection.
pub(crate) fn list(value: Value) -> Result<PlannedCall, ToolError> {
    let parsed: ListArgs = args("list_contracts", value)?;
    let request = match non_empty(parsed.status_filter) {
        Some(status) if status.eq_ignore_ascii_case("active") => {
            ApiRequest::get("/api/contracts/active/")
        }
        _ => ApiRequest::get("/api/contracts/"),
    };
    Ok(PlannedCall::plain("list contracts", request))
}

pub(crate) fn get(value: Value) -> Result<PlannedCall, ToolError> {
    let parsed: IdArgs = args("get_contract", value)?;
    Ok(PlannedCall::plain(
        "get contract",
        ApiRequest::get(format!("/api/contracts/{}/", parsed.contract_id)),
    ))
}

pub(crate) fn create(value: Value) -> Result<PlannedCall, ToolError> {
    let parsed: CreateArgs = args("create_contract", value)?;
    let command = ContractCreate::from_args(parsed.contract_data)?;
    Ok(PlannedCall::plain(
        "create contract",
        ApiRequest::post("/api/contracts/", command.payload()),
    ))
}

pub(crate) fn update(value: Value) -> Result<PlannedCall, ToolError> {
    let parsed: UpdateArgs = args("update_contract", value)?;
    let command = ContractUpdate::from_args(parsed.contract_data)?;
    Ok(PlannedCall::plain(
        "update contract",
        ApiRequest::patch(format!("/api/contracts/{}/", parsed.contract_id), command.payload()),
    ))
}

pub(crate) fn delete(value: Value) -> Result<PlannedCall, ToolError> {
    let parsed: IdArgs = args("delete_contract", value)?;
    Ok(PlannedCall::plain(
        "delete contract",
        ApiRequest::delete(format!("/api/contracts/{}/", parsed.contract_id)),
    ))
}

pub(crate) fn active(_value: Value) -> Result<PlannedCall, ToolError> {
    Ok(PlannedCall::plain("get active contracts", ApiRequest::get("/api/contracts/active/")))
}
