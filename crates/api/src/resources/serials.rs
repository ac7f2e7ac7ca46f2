use serde::Deserialize;
use serde_json::Value;

use fieldbook_core::commands::{SerialCreate, SerialUpdate};
use fieldbook_core::ToolError;

use crate::registry::PlannedCall;
use crate::transport::ApiRequest;

use super::args;

#[derive(Deserialize)]
struct ListArgs {
    #[serde(default)]
    item_id_filter: Option<i64>,
}

#[derive(Deserialize)]
struct IdArgs {
    serial_id: i64,
}

#[derive(Deserialize)]
struct CreateArgs {
    serial_data: Value,
}

#[derive(Deserialize)]
struct UpdateArgs {
    serial_id: i64,
    serial_data: Value,
}

#[derive(Deserialize)]
struct ByItemArgs {
    item_id: i64,
}

pub(crate) fn list(value: Value) -> Result<PlannedCall, ToolError> {
    let parsed: ListArgs = args("list_serials", value)?;
    let mut request = ApiRequest::get("/api/serials/");
    if let Some(item_id) = parsed.item_id_filter {
        request = request.with_query("item_id", item_id.to_string());
    }
    Ok(PlannedCall::plain("list serials", request))
}

pub(crate) fn get(value: Value) -> Result<PlannedCall, ToolError> {
    let parsed: IdArgs = args("get_serial", value)?;
    Ok(PlannedCall::plain(
        "get serial",
        ApiRequest::get(format!("/api/serials/{}/", parsed.serial_id)),
    ))
}

pub(crate) fn create(value: Value) -> Result<PlannedCall, ToolError> {
    let parsed: CreateArgs = args("create_serial", value)?;
    let command = SerialCreate::from_args(parsed.serial_data)?;
    Ok(PlannedCall::plain("create serial", ApiRequest::post("/api/serials/", command.payload())))
}

pub(crate) fn update(value: Value) -> Result<PlannedCall, ToolError> {
    let parsed: UpdateArgs = args("update_serial", value)?;
    let command = SerialUpdate::from_args(parsed.serial_data)?;
    Ok(PlannedCall::plain(
        "update serial",
        ApiRequest::patch(format!("/api/serials/{}/", parsed.serial_id), command.payload()),
    ))
}

pub(crate) fn delete(value: Value) -> Result<PlannedCall, ToolError> {
    let parsed: IdArgs = args("delete_serial", value)?;
    Ok(PlannedCall::plain(
        "delete serial",
        ApiRequest::delete(format!("/api/serials/{}/", parsed.serial_id)),
    ))
}

pub(crate) fn by_item(value: Value) -> Result<PlannedCall, ToolError> {
    let parsed: ByItemArgs = args("lookup_serials_by_item", value)?;
    Ok(PlannedCall::plain(
        "lookup serials by item",
        ApiRequest::get("/api/serials/by_item/").with_query("item_id", parsed.item_id.to_string()),
    ))
}
