use chrono::NaiveDate;
use serde::Deserialize;
use serde_json::Value;

use fieldbook_core::commands::{ServiceCreate, ServiceUpdate};
use fieldbook_core::ToolError;

use crate::registry::PlannedCall;
use crate::transport::ApiRequest;

use super::args;

#[derive(Deserialize)]
struct ListArgs {
    #[serde(default)]
    start_date: Option<NaiveDate>,
    #[serde(default)]
    end_date: Option<NaiveDate>,
}

#[derive(Deserialize)]
struct IdArgs {
    service_id: i64,
}

#[derive(Deserialize)]
struct CreateArgs {
    service_data: Value,
}

#[derive(Deserialize)]
struct UpdateArgs {
    service_id: i64,
    service_data: Value,
}

#[derive(Deserialize)]
struct ByDateArgs {
    start_date: NaiveDate,
    #[serde(default)]
    end_date: Option<NaiveDate>,
}

fn date_range_request(start: Option<NaiveDate>, end: Option<NaiveDate>) -> ApiRequest {
    let mut request = ApiRequest::get("/api/services/by_date_range/");
    if let Some(start) = start {
        request = request.with_query("start_date", start.to_string());
    }
    if let Some(end) = end {
        request = request.with_query("end_date", end.to_string());
    }
    request
}

/// Listing routes through the date-range endpoint when either bound is
/// given; only the supplied bounds travel as parameters.
pub(crate) fn list(value: Value) -> Result<PlannedCall, ToolError> {
    let parsed: ListArgs = args("list_services", value)?;
    let request = if parsed.start_date.is_none() && parsed.end_date.is_none() {
        ApiRequest::get("/api/services/")
    } else {
        date_range_request(parsed.start_date, parsed.end_date)
    };
    Ok(PlannedCall::plain("list services", request))
}

pub(crate) fn get(value: Value) -> Result<PlannedCall, ToolError> {
    let parsed: IdArgs = args("get_service", value)?;
    Ok(PlannedCall::plain(
        "get service",
        ApiRequest::get(format!("/api/services/{}/", parsed.service_id)),
    ))
}

pub(crate) fn create(value: Value) -> Result<PlannedCall, ToolError> {
    let parsed: CreateArgs = args("create_service", value)?;
    let command = ServiceCreate::from_args(parsed.service_data)?;
    Ok(PlannedCall::plain(
        "create service",
        ApiRequest::post("/api/services/", command.payload()),
    ))
}

pub(crate) fn update(value: Value) -> Result<PlannedCall, ToolError> {
    let parsed: UpdateArgs = args("update_service", value)?;
    let command = ServiceUpdate::from_args(parsed.service_data)?;
    Ok(PlannedCall::plain(
        "update service",
        ApiRequest::patch(format!("/api/services/{}/", parsed.service_id), command.payload()),
    ))
}

pub(crate) fn delete(value: Value) -> Result<PlannedCall, ToolError> {
    let parsed: IdArgs = args("delete_service", value)?;
    Ok(PlannedCall::plain(
        "delete service",
        ApiRequest::delete(format!("/api/services/{}/", parsed.service_id)),
    ))
}

pub(crate) fn by_date(value: Value) -> Result<PlannedCall, ToolError> {
    let parsed: ByDateArgs = args("get_services_by_date", value)?;
    Ok(PlannedCall::plain(
        "get services by date",
        date_range_request(Some(parsed.start_date), parsed.end_date),
    ))
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use crate::registry::plan;

    #[test]
    fn full_range_routes_through_the_date_range_endpoint() {
        let planned = plan(
            "list_services",
            json!({"start_date": "2026-01-01", "end_date": "2026-01-31"}),
        )
        .expect("plan");
        assert_eq!(planned.request.path, "/api/services/by_date_range/");
        assert_eq!(
            planned.request.query,
            vec![
                ("start_date".to_string(), "2026-01-01".to_string()),
                ("end_date".to_string(), "2026-01-31".to_string())
            ]
        );
    }

    #[test]
    fn lone_bound_routes_through_the_date_range_endpoint() {
        let planned = plan("list_services", json!({"start_date": "2026-01-01"})).expect("plan");
        assert_eq!(planned.request.path, "/api/services/by_date_range/");
        assert_eq!(
            planned.request.query,
            vec![("start_date".to_string(), "2026-01-01".to_string())]
        );

        let planned = plan("list_services", json!({"end_date": "2026-01-31"})).expect("plan");
        assert_eq!(planned.request.path, "/api/services/by_date_range/");
        assert_eq!(
            planned.request.query,
            vec![("end_date".to_string(), "2026-01-31".to_string())]
        );
    }

    #[test]
    fn unbounded_list_hits_the_collection_endpoint() {
        let planned = plan("list_services", json!({})).expect("plan");
        assert_eq!(planned.request.path, "/api/services/");
        assert!(planned.request.query.is_empty());
    }

    #[test]
    fn by_date_requires_a_start_and_takes_an_optional_end() {
        assert!(plan("get_services_by_date", json!({})).is_err());

        let planned =
            plan("get_services_by_date", json!({"start_date": "2026-02-01"})).expect("plan");
        assert_eq!(
            planned.request.query,
            vec![("start_date".to_string(), "2026-02-01".to_string())]
        );
    }

    #[test]
    fn malformed_dates_are_schema_errors() {
        let result = plan("get_services_by_date", json!({"start_date": "01/02/2026"}));
        assert!(result.is_err());
    }

    #[test]
    fn create_carries_the_computed_total_cost() {
        let planned = plan(
            "create_service",
            json!({"service_data": {
                "service_name": "Quarterly maintenance",
                "customer": 3,
                "service_date": "2026-02-10",
                "details": [
                    {"description": "Drum replacement", "cost": "420.10"},
                    {"description": "Cleaning", "cost": "79.90"}
                ]
            }}),
        )
        .expect("plan");

        let body = planned.request.body.expect("create has a body");
        assert_eq!(body["total_cost"], json!("500.00"));
    }
}
