//! Client-side filtering for list-shaped tools: case-insensitive substring
//! containment, combined with logical AND when several filters are present.

use serde_json::Value;

pub fn contains_ci(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}

fn field_contains(record: &Value, field: &str, needle: &str) -> bool {
    record.get(field).and_then(Value::as_str).map(|text| contains_ci(text, needle)).unwrap_or(false)
}

/// Customer list filter: substring match on `name`.
pub fn customer_matches(record: &Value, name_filter: &str) -> bool {
    field_contains(record, "name", name_filter)
}

/// Item filter with the backend's search semantics: `query` matches name OR
/// model OR brand, `brand` matches brand, and supplied filters AND together.
pub fn item_matches(record: &Value, query: Option<&str>, brand: Option<&str>) -> bool {
    if let Some(query) = query {
        let hit = field_contains(record, "name", query)
            || field_contains(record, "model", query)
            || field_contains(record, "brand", query);
        if !hit {
            return false;
        }
    }
    if let Some(brand) = brand {
        if !field_contains(record, "brand", brand) {
            return false;
        }
    }
    true
}

/// Apply a predicate to a JSON array payload, leaving non-array payloads
/// untouched.
pub fn retain_matching(payload: &mut Value, keep: impl Fn(&Value) -> bool) {
    if let Some(records) = payload.as_array_mut() {
        records.retain(|record| keep(record));
    }
}
