use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::ToolError;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomerCreate {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomerUpdate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
}

impl CustomerCreate {
    pub fn from_args(args: Value) -> Result<Self, ToolError> {
        super::from_args("create_customer", args)
    }

    pub fn payload(&self) -> Value {
        super::base_payload(self)
    }
}

impl CustomerUpdate {
    pub fn from_args(args: Value) -> Result<Self, ToolError> {
        super::from_args("update_customer", args)
    }

    pub fn payload(&self) -> Value {
        super::base_payload(self)
    }
}
