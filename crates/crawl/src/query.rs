use serde::Deserialize;
use serde_json::Value;

use fieldbook_core::ToolError;

fn default_search_type() -> String {
    "search".to_string()
}

fn default_max_results() -> usize {
    5
}

/// One web lookup. `search_type` is authoritative: `"scrape"` extracts a
/// single page, anything else performs a search, even when the query text is
/// itself a URL.
#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
pub struct WebQuery {
    pub query: String,
    #[serde(default = "default_search_type")]
    pub search_type: String,
    #[serde(default = "default_max_results")]
    pub max_results: usize,
}

impl WebQuery {
    pub fn from_args(args: Value) -> Result<Self, ToolError> {
        fieldbook_core::commands::from_args("web_search", args)
    }

    pub fn search(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            search_type: default_search_type(),
            max_results: default_max_results(),
        }
    }

    pub fn scrape(query: impl Into<String>) -> Self {
        Self { query: query.into(), search_type: "scrape".to_string(), max_results: default_max_results() }
    }

    pub fn is_scrape(&self) -> bool {
        self.search_type == "scrape"
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::WebQuery;

    #[test]
    fn defaults_apply_when_only_the_query_is_given() {
        let parsed = WebQuery::from_args(json!({"query": "ricoh toner"})).expect("valid");
        assert_eq!(parsed.search_type, "search");
        assert_eq!(parsed.max_results, 5);
    }

    #[test]
    fn missing_query_is_a_schema_error() {
        assert!(WebQuery::from_args(json!({"search_type": "scrape"})).is_err());
    }

    #[test]
    fn unrecognized_search_types_behave_as_search() {
        let parsed =
            WebQuery::from_args(json!({"query": "x", "search_type": "browse"})).expect("valid");
        assert!(!parsed.is_scrape());
    }
}
