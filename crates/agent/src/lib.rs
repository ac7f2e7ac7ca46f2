//! The query agent - an LLM-orchestrated loop over the business tools.
//!
//! This crate turns a natural-language question into tool calls against the
//! records backend (and the web searcher) and folds the results back into a
//! final answer:
//!
//! 1. **Tool surface** (`tools`) - read-oriented business operations plus
//!    `web_search`, each described to the model with a JSON schema.
//! 2. **Model seam** (`llm`) - the `LlmClient` trait with an Azure OpenAI
//!    chat-completions implementation; tests script turns through a fake.
//! 3. **Loop** (`runtime`) - bounded tool-calling turns; tool failures are
//!    fed back to the model as tool output, never raised.
//!
//! The model only ever chooses which tool to call. Derived fields, filtering,
//! and response normalization are deterministic and live below this crate.

pub mod llm;
pub mod runtime;
pub mod tools;
