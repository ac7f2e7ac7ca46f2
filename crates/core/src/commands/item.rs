use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::ToolError;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemCreate {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub brand: Option<String>,
    pub item_group: i64,
    #[serde(default)]
    pub price: Decimal,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemUpdate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub brand: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub item_group: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<Decimal>,
}

impl ItemCreate {
    pub fn from_args(args: Value) -> Result<Self, ToolError> {
        super::from_args("create_item", args)
    }

    pub fn payload(&self) -> Value {
        super::base_payload(self)
    }
}

impl ItemUpdate {
    pub fn from_args(args: Value) -> Result<Self, ToolError> {
        super::from_args("update_item", args)
    }

    pub fn payload(&self) -> Value {
        super::base_payload(self)
    }
}
