use serde::Deserialize;
use serde_json::Value;

use fieldbook_core::commands::{ItemCreate, ItemUpdate};
use fieldbook_core::ToolError;

use crate::registry::{PlannedCall, PostFilter};
use crate::transport::ApiRequest;

use super::{args, non_empty};

#[derive(Deserialize)]
struct ListArgs {
    #[serde(default)]
    name_filter: Option<String>,
    #[serde(default)]
    brand_filter: Option<String>,
}

#[derive(Deserialize)]
struct IdArgs {
    item_id: i64,
}

#[derive(Deserialize)]
struct CreateArgs {
    item_data: Value,
}

#[derive(Deserialize)]
struct UpdateArgs {
    item_id: i64,
    item_data: Value,
}

#[derive(Deserialize)]
struct SearchArgs {
    #[serde(default)]
    query: Option<String>,
    #[serde(default)]
    brand: Option<String>,
}

fn search_request(query: Option<&str>, brand: Option<&str>) -> ApiRequest {
    let mut request = ApiRequest::get("/api/items/search/");
    if let Some(query) = query {
        request = request.with_query("q", query);
    }
    if let Some(brand) = brand {
        request = request.with_query("brand", brand);
    }
    request
}

/// Listing with any filter routes through the search endpoint; the same
/// containment predicate is re-applied client-side so both filters AND
/// together regardless of what the backend returned.
pub(crate) fn list(value: Value) -> Result<PlannedCall, ToolError> {
    let parsed: ListArgs = args("list_items", value)?;
    let query = non_empty(parsed.name_filter);
    let brand = non_empty(parsed.brand_filter);
    if query.is_none() && brand.is_none() {
        return Ok(PlannedCall::plain("list items", ApiRequest::get("/api/items/")));
    }
    let request = search_request(query.as_deref(), brand.as_deref());
    Ok(PlannedCall { action: "list items", request, post: PostFilter::Items { query, brand } })
}

pub(crate) fn get(value: Value) -> Result<PlannedCall, ToolError> {
    let parsed: IdArgs = args("get_item", value)?;
    Ok(PlannedCall::plain("get item", ApiRequest::get(format!("/api/items/{}/", parsed.item_id))))
}

pub(crate) fn create(value: Value) -> Result<PlannedCall, ToolError> {
    let parsed: CreateArgs = args("create_item", value)?;
    let command = ItemCreate::from_args(parsed.item_data)?;
    Ok(PlannedCall::plain("create item", ApiRequest::post("/api/items/", command.payload())))
}

pub(crate) fn update(value: Value) -> Result<PlannedCall, ToolError> {
    let parsed: UpdateArgs = args("update_item", value)?;
    let command = ItemUpdate::from_args(parsed.item_data)?;
    Ok(PlannedCall::plain(
        "update item",
        ApiRequest::patch(format!("/api/items/{}/", parsed.item_id), command.payload()),
    ))
}

pub(crate) fn delete(value: Value) -> Result<PlannedCall, ToolError> {
    let parsed: IdArgs = args("delete_item", value)?;
    Ok(PlannedCall::plain(
        "delete item",
        ApiRequest::delete(format!("/api/items/{}/", parsed.item_id)),
    ))
}

pub(crate) fn search(value: Value) -> Result<PlannedCall, ToolError> {
    let parsed: SearchArgs = args("search_items", value)?;
    let query = non_empty(parsed.query);
    let brand = non_empty(parsed.brand);
    let request = search_request(query.as_deref(), brand.as_deref());
    Ok(PlannedCall { action: "search items", request, post: PostFilter::Items { query, brand } })
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use crate::registry::{plan, PostFilter};

    #[test]
    fn unfiltered_list_hits_the_collection_endpoint() {
        let planned = plan("list_items", json!({})).expect("plan");
        assert_eq!(planned.request.path, "/api/items/");
        assert_eq!(planned.post, PostFilter::None);
    }

    #[test]
    fn filtered_list_routes_through_search() {
        let planned =
            plan("list_items", json!({"name_filter": "printer", "brand_filter": "Ricoh"}))
                .expect("plan");
        assert_eq!(planned.request.path, "/api/items/search/");
        assert_eq!(
            planned.request.query,
            vec![
                ("q".to_string(), "printer".to_string()),
                ("brand".to_string(), "Ricoh".to_string())
            ]
        );
        assert_eq!(
            planned.post,
            PostFilter::Items {
                query: Some("printer".to_string()),
                brand: Some("Ricoh".to_string())
            }
        );
    }

    #[test]
    fn brand_only_list_omits_the_query_parameter() {
        let planned = plan("list_items", json!({"brand_filter": "Canon"})).expect("plan");
        assert_eq!(planned.request.query, vec![("brand".to_string(), "Canon".to_string())]);
    }

    #[test]
    fn brand_only_search_is_allowed() {
        let planned = plan("search_items", json!({"brand": "Ricoh"})).expect("plan");
        assert_eq!(planned.request.path, "/api/items/search/");
        assert_eq!(planned.request.query, vec![("brand".to_string(), "Ricoh".to_string())]);
        assert_eq!(
            planned.post,
            PostFilter::Items { query: None, brand: Some("Ricoh".to_string()) }
        );
    }

    #[test]
    fn empty_search_hits_the_search_endpoint_unfiltered() {
        let planned = plan("search_items", json!({})).expect("plan");
        assert_eq!(planned.request.path, "/api/items/search/");
        assert!(planned.request.query.is_empty());
        assert_eq!(planned.post, PostFilter::Items { query: None, brand: None });
    }

    #[test]
    fn search_with_query_only_filters_on_query_alone() {
        let planned = plan("search_items", json!({"query": "toner"})).expect("plan");
        assert_eq!(
            planned.post,
            PostFilter::Items { query: Some("toner".to_string()), brand: None }
        );
    }
}
