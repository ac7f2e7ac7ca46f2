use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::ToolError;

/// Work performed during a service visit, optionally tied to a machine
/// serial. Owned by the parent service command.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceDetail {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub serial: Option<i64>,
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parts_used: Option<String>,
    #[serde(default)]
    pub labor_hours: Decimal,
    #[serde(default)]
    pub cost: Decimal,
}

fn default_status() -> String {
    "scheduled".to_string()
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceCreate {
    pub service_name: String,
    pub customer: i64,
    pub service_date: NaiveDate,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub technician: Option<String>,
    #[serde(default = "default_status")]
    pub status: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub details: Vec<ServiceDetail>,
}

impl ServiceCreate {
    pub fn from_args(args: Value) -> Result<Self, ToolError> {
        super::from_args("create_service", args)
    }

    /// Derived field: aggregate cost across the service details.
    pub fn total_cost(&self) -> Decimal {
        self.details.iter().map(|detail| detail.cost).sum()
    }

    pub fn payload(&self) -> Value {
        let mut payload = super::base_payload(self);
        if let Some(map) = payload.as_object_mut() {
            map.insert("total_cost".to_string(), json!(self.total_cost()));
        }
        payload
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceUpdate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub service_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub customer: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub service_date: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub technician: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl ServiceUpdate {
    pub fn from_args(args: Value) -> Result<Self, ToolError> {
        super::from_args("update_service", args)
    }

    pub fn payload(&self) -> Value {
        super::base_payload(self)
    }
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;
    use serde_json::json;

    use super::ServiceCreate;

    #[test]
    fn total_cost_sums_detail_costs_exactly() {
        let command = ServiceCreate::from_args(json!({
            "service_name": "Quarterly maintenance",
            "customer": 2,
            "service_date": "2026-04-01",
            "details": [
                {"description": "Drum replacement", "cost": "420.10"},
                {"description": "Calibration", "cost": "79.90"}
            ]
        }))
        .expect("valid service create");

        assert_eq!(command.total_cost(), Decimal::new(500_00, 2));
        assert_eq!(command.payload()["total_cost"], json!("500.00"));
    }

    #[test]
    fn absent_details_serialize_as_absent_collection() {
        let command = ServiceCreate::from_args(json!({
            "service_name": "Site survey",
            "customer": 2,
            "service_date": "2026-04-01"
        }))
        .expect("details are optional");
        let payload = command.payload();

        assert!(payload.get("details").is_none());
        assert_eq!(payload["total_cost"], json!("0"));
        assert_eq!(payload["status"], json!("scheduled"));
    }
}
