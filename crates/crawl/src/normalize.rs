//! Shape probing for crawl service payloads.
//!
//! Probe order, for both search and scrape:
//!
//! 1. a top-level results field (`web` / `markdown`) - the current shape;
//! 2. a top-level `data` field - unwrap and treat as the current shape;
//! 3. a map carrying a `success` key - the legacy envelope;
//! 4. anything else is an unexpected format.

use serde_json::Value;

use fieldbook_core::Outcome;

const SNIPPET_CHARS: usize = 300;
const NO_CONTENT: &str = "No content available";

/// Fold a search payload into a canonical outcome. Empty result lists from
/// either shape render the same no-results text.
pub fn normalize_search(payload: &Value, query: &str, max_results: usize) -> Outcome {
    if let Some(results) = payload.get("web").and_then(Value::as_array) {
        return render_results(results, query, max_results);
    }
    if let Some(data) = present(payload.get("data")) {
        if let Some(results) = data.as_array() {
            return render_results(results, query, max_results);
        }
    }
    if let Some(success) = payload.get("success").and_then(Value::as_bool) {
        if !success {
            return Outcome::failure(error_message(payload));
        }
        return no_results(query);
    }
    unexpected(payload)
}

/// Fold a scrape payload into a canonical outcome.
pub fn normalize_scrape(payload: &Value, url: &str) -> Outcome {
    if let Some(markdown) = payload.get("markdown").and_then(Value::as_str) {
        if !markdown.is_empty() {
            return content(url, markdown);
        }
    }
    if let Some(data) = present(payload.get("data")) {
        let markdown = match data {
            Value::Object(map) => {
                map.get("markdown").and_then(Value::as_str).unwrap_or(NO_CONTENT).to_string()
            }
            Value::String(text) => text.clone(),
            other => other.to_string(),
        };
        return content(url, &markdown);
    }
    if let Some(success) = payload.get("success").and_then(Value::as_bool) {
        if !success {
            return Outcome::failure(format!(
                "could not scrape URL {url}. {}",
                error_message(payload)
            ));
        }
        return content(url, NO_CONTENT);
    }
    unexpected(payload)
}

fn present(value: Option<&Value>) -> Option<&Value> {
    value.filter(|value| !value.is_null())
}

fn content(url: &str, markdown: &str) -> Outcome {
    Outcome::ok_text(format!("Content from {url}:\n\n{markdown}"))
}

fn no_results(query: &str) -> Outcome {
    Outcome::ok_text(format!("No search results found for: {query}"))
}

fn error_message(payload: &Value) -> String {
    payload
        .get("error")
        .and_then(Value::as_str)
        .unwrap_or("Unknown error")
        .to_string()
}

fn unexpected(payload: &Value) -> Outcome {
    Outcome::failure(format!("unexpected response format: {}", type_name(payload)))
}

fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

fn render_results(results: &[Value], query: &str, max_results: usize) -> Outcome {
    if results.is_empty() {
        return no_results(query);
    }
    let formatted: Vec<String> = results
        .iter()
        .take(max_results)
        .enumerate()
        .map(|(index, item)| render_item(index + 1, item))
        .collect();
    Outcome::ok_text(format!("Search results for '{query}':\n\n{}", formatted.join("\n\n")))
}

fn render_item(position: usize, item: &Value) -> String {
    let title = item.get("title").and_then(Value::as_str).unwrap_or("No title");
    let url = item.get("url").and_then(Value::as_str).unwrap_or("No URL");
    let snippet = item
        .get("markdown")
        .or_else(|| item.get("description"))
        .and_then(Value::as_str)
        .unwrap_or("No description");
    let snippet: String = snippet.chars().take(SNIPPET_CHARS).collect();
    format!("{position}. **{title}**\n   URL: {url}\n   Content: {snippet}...")
}
