use serde_json::Value;

/// Successful payload of an [`Outcome`].
#[derive(Clone, Debug, PartialEq)]
pub enum Payload {
    /// Structured data returned by the backend.
    Json(Value),
    /// Pre-formatted text (search results, scraped content).
    Text(String),
    /// An empty success (HTTP 204), annotated with the action name so the
    /// caller can render a confirmation message.
    Completed { action: String },
}

/// The canonical result every upstream response is folded into, regardless
/// of which backend produced it or which wire shape it arrived in.
#[derive(Clone, Debug, PartialEq)]
pub enum Outcome {
    Ok(Payload),
    NotFound,
    /// The upstream rejected the payload. `details` holds the parsed error
    /// body when it parses as JSON, otherwise the raw text.
    Invalid(Value),
    /// Transport or server failure. `code` is the HTTP status when one was
    /// received; `None` for connection-level failures.
    Failure { code: Option<u16>, message: String },
}

impl Outcome {
    pub fn ok_json(payload: Value) -> Self {
        Self::Ok(Payload::Json(payload))
    }

    pub fn ok_text(text: impl Into<String>) -> Self {
        Self::Ok(Payload::Text(text.into()))
    }

    pub fn completed(action: impl Into<String>) -> Self {
        Self::Ok(Payload::Completed { action: action.into() })
    }

    pub fn invalid_text(detail: impl Into<String>) -> Self {
        Self::Invalid(Value::String(detail.into()))
    }

    pub fn failure(message: impl Into<String>) -> Self {
        Self::Failure { code: None, message: message.into() }
    }

    pub fn is_ok(&self) -> bool {
        matches!(self, Self::Ok(_))
    }

    /// Render the outcome as the text contract callers depend on: pretty
    /// JSON on success, a human-readable error string otherwise.
    pub fn render(&self) -> String {
        match self {
            Self::Ok(Payload::Json(value)) => pretty(value),
            Self::Ok(Payload::Text(text)) => text.clone(),
            Self::Ok(Payload::Completed { action }) => {
                format!("Success: {action} completed successfully")
            }
            Self::NotFound => "Error: Resource not found".to_string(),
            Self::Invalid(details) => format!("Error: Bad request - {}", pretty(details)),
            Self::Failure { code: Some(code), message } => {
                format!("Error: API request failed with status {code} - {message}")
            }
            Self::Failure { code: None, message } => format!("Error: {message}"),
        }
    }
}

fn pretty(value: &Value) -> String {
    match value {
        Value::String(text) => text.clone(),
        other => serde_json::to_string_pretty(other).unwrap_or_else(|_| other.to_string()),
    }
}
