use thiserror::Error;

/// Errors that must be reported to the caller before any network call is
/// attempted. Everything that happens after dispatch is returned as data
/// (an [`crate::Outcome`]), never as an `Err`.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum ToolError {
    /// A command was constructed with a missing or malformed field.
    #[error("schema error: {0}")]
    Schema(String),
    /// A caller or deployment mistake: unknown tool name, missing credential.
    #[error("configuration error: {0}")]
    Configuration(String),
}

impl ToolError {
    pub fn schema(operation: &str, detail: impl std::fmt::Display) -> Self {
        Self::Schema(format!("{operation}: {detail}"))
    }

    pub fn unknown_tool(name: &str) -> Self {
        Self::Configuration(format!("unknown tool `{name}`"))
    }
}
