use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::ToolError;

fn default_status() -> String {
    "active".to_string()
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SerialCreate {
    pub serial_number: String,
    pub item: i64,
    #[serde(default = "default_status")]
    pub status: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub manufactured_date: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub warranty_end_date: Option<NaiveDate>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SerialUpdate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub serial_number: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub item: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub manufactured_date: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub warranty_end_date: Option<NaiveDate>,
}

impl SerialCreate {
    pub fn from_args(args: Value) -> Result<Self, ToolError> {
        super::from_args("create_serial", args)
    }

    pub fn payload(&self) -> Value {
        super::base_payload(self)
    }
}

impl SerialUpdate {
    pub fn from_args(args: Value) -> Result<Self, ToolError> {
        super::from_args("update_serial", args)
    }

    pub fn payload(&self) -> Value {
        super::base_payload(self)
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::{SerialCreate, SerialUpdate};

    #[test]
    fn absent_dates_are_omitted_not_null() {
        let command =
            SerialCreate::from_args(json!({"serial_number": "SN-100", "item": 4}))
                .expect("dates are optional");
        let payload = command.payload();

        assert!(payload.get("manufactured_date").is_none());
        assert!(payload.get("warranty_end_date").is_none());
        assert_eq!(payload["status"], json!("active"));
    }

    #[test]
    fn warranty_date_round_trips_as_iso_string() {
        let command = SerialUpdate::from_args(json!({"warranty_end_date": "2028-06-30"}))
            .expect("valid update");
        assert_eq!(command.payload(), json!({"warranty_end_date": "2028-06-30"}));
    }
}
