//! Typed command schemas for each resource's create/update operation.
//!
//! Commands are constructed fresh per request from the caller's untyped
//! arguments and discarded after the outbound call. Required fields are
//! enforced at construction (a missing field is a [`ToolError::Schema`],
//! reported before any network traffic); optional fields default to absent
//! and absent fields are omitted from the wire payload, never sent as null.

mod contract;
mod customer;
mod invoice;
mod item;
mod serial;
mod service;

pub use contract::{ContactDetail, ContractCreate, ContractUpdate};
pub use customer::{CustomerCreate, CustomerUpdate};
pub use invoice::{InvoiceCreate, InvoiceLine, InvoiceUpdate};
pub use item::{ItemCreate, ItemUpdate};
pub use serial::{SerialCreate, SerialUpdate};
pub use service::{ServiceCreate, ServiceDetail, ServiceUpdate};

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

use crate::ToolError;

/// Deserialize caller-supplied arguments into a command, mapping any failure
/// (missing required field, wrong type) to a schema error tagged with the
/// operation name.
pub fn from_args<T: DeserializeOwned>(operation: &str, args: Value) -> Result<T, ToolError> {
    serde_json::from_value(args).map_err(|err| ToolError::schema(operation, err))
}

/// Serialize a command into its outbound JSON payload. Present fields only;
/// derived fields are layered on top by the command's own `payload()`.
pub(crate) fn base_payload<T: Serialize>(command: &T) -> Value {
    serde_json::to_value(command).unwrap_or(Value::Null)
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::{from_args, CustomerCreate};
    use crate::ToolError;

    #[test]
    fn missing_required_field_is_a_schema_error() {
        let result = from_args::<CustomerCreate>("create_customer", json!({"email": "a@b.co"}));
        let error = result.expect_err("name is required");
        assert!(matches!(error, ToolError::Schema(_)));
        assert!(error.to_string().contains("create_customer"));
    }

    #[test]
    fn wrong_type_is_a_schema_error() {
        let result = from_args::<CustomerCreate>("create_customer", json!({"name": 42}));
        assert!(matches!(result, Err(ToolError::Schema(_))));
    }
}
