use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::ToolError;

/// A single invoice line item. Owned exclusively by its parent invoice
/// command; it has no independent lifecycle.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct InvoiceLine {
    pub item: i64,
    #[serde(default = "default_quantity")]
    pub quantity: u32,
    pub unit_price: Decimal,
}

impl InvoiceLine {
    /// Derived field: `quantity * unit_price`, exact decimal arithmetic.
    pub fn total_price(&self) -> Decimal {
        Decimal::from(self.quantity) * self.unit_price
    }
}

fn default_quantity() -> u32 {
    1
}

fn default_status() -> String {
    "pending".to_string()
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct InvoiceCreate {
    pub customer: i64,
    pub invoice_date: NaiveDate,
    #[serde(default = "default_status")]
    pub status: String,
    #[serde(default)]
    pub details: Vec<InvoiceLine>,
}

impl InvoiceCreate {
    pub fn from_args(args: Value) -> Result<Self, ToolError> {
        super::from_args("create_invoice", args)
    }

    /// Derived field: the invoice total, recomputed from the line items on
    /// every call. Caller-supplied totals never reach the payload.
    pub fn total_amount(&self) -> Decimal {
        self.details.iter().map(InvoiceLine::total_price).sum()
    }

    /// Outbound payload with per-line `total_price` and invoice
    /// `total_amount` layered over the serialized command.
    pub fn payload(&self) -> Value {
        let mut payload = super::base_payload(self);
        if let Some(details) = payload.get_mut("details").and_then(Value::as_array_mut) {
            for (line, serialized) in self.details.iter().zip(details.iter_mut()) {
                if let Some(map) = serialized.as_object_mut() {
                    map.insert("total_price".to_string(), json!(line.total_price()));
                }
            }
        }
        if let Some(map) = payload.as_object_mut() {
            map.insert("total_amount".to_string(), json!(self.total_amount()));
        }
        payload
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InvoiceUpdate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub customer: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub invoice_date: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_amount: Option<Decimal>,
}

impl InvoiceUpdate {
    pub fn from_args(args: Value) -> Result<Self, ToolError> {
        super::from_args("update_invoice", args)
    }

    pub fn payload(&self) -> Value {
        super::base_payload(self)
    }
}
