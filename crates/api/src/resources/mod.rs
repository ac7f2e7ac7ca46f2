//! Per-resource planning: each module turns a tool's untyped arguments into
//! a [`PlannedCall`](crate::registry::PlannedCall) against the backend's
//! endpoints for that resource.

pub(crate) mod contracts;
pub(crate) mod customers;
pub(crate) mod invoices;
pub(crate) mod items;
pub(crate) mod serials;
pub(crate) mod services;

use serde::de::DeserializeOwned;
use serde_json::Value;

use fieldbook_core::ToolError;

fn args<T: DeserializeOwned>(operation: &str, value: Value) -> Result<T, ToolError> {
    fieldbook_core::commands::from_args(operation, value)
}

/// Treat an empty filter string the same as an absent one.
fn non_empty(filter: Option<String>) -> Option<String> {
    filter.filter(|text| !text.is_empty())
}
