use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::ToolError;

/// A contact person attached to a contract. Owned by the parent contract
/// command.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactDetail {
    pub contact_person: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

fn default_status() -> String {
    "active".to_string()
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContractCreate {
    pub customer: i64,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub contract_type: String,
    #[serde(default = "default_status")]
    pub status: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub terms: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contact_details: Option<Vec<ContactDetail>>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContractUpdate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub customer: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_date: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_date: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contract_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub terms: Option<String>,
}

impl ContractCreate {
    pub fn from_args(args: Value) -> Result<Self, ToolError> {
        super::from_args("create_contract", args)
    }

    pub fn payload(&self) -> Value {
        super::base_payload(self)
    }
}

impl ContractUpdate {
    pub fn from_args(args: Value) -> Result<Self, ToolError> {
        super::from_args("update_contract", args)
    }

    pub fn payload(&self) -> Value {
        super::base_payload(self)
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::{ContractCreate, ContractUpdate};
    use crate::ToolError;

    #[test]
    fn dates_serialize_as_iso_strings() {
        let command = ContractCreate::from_args(json!({
            "customer": 3,
            "start_date": "2026-01-01",
            "end_date": "2027-01-01",
            "contract_type": "SLA"
        }))
        .expect("valid contract create");
        let payload = command.payload();

        assert_eq!(payload["start_date"], json!("2026-01-01"));
        assert_eq!(payload["end_date"], json!("2027-01-01"));
        assert_eq!(payload["status"], json!("active"));
        assert!(payload.get("contact_details").is_none());
    }

    #[test]
    fn nested_contacts_keep_their_own_optional_field_omission() {
        let command = ContractCreate::from_args(json!({
            "customer": 3,
            "start_date": "2026-01-01",
            "end_date": "2027-01-01",
            "contract_type": "SLA",
            "contact_details": [{"contact_person": "A. Tan", "role": "IT"}]
        }))
        .expect("valid contract create");
        let payload = command.payload();

        assert_eq!(payload["contact_details"][0]["contact_person"], json!("A. Tan"));
        assert!(payload["contact_details"][0].get("phone").is_none());
    }

    #[test]
    fn malformed_date_is_a_schema_error() {
        let result = ContractUpdate::from_args(json!({"start_date": "01/02/2026"}));
        assert!(matches!(result, Err(ToolError::Schema(_))));
    }
}
