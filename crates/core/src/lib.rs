//! Fieldbook core - shared domain types for the business-records tool layer.
//!
//! This crate holds everything the outer surfaces (agent, HTTP server, MCP
//! server) agree on:
//!
//! - `Outcome` - the canonical result every upstream response is normalized
//!   into. No status code or HTTP-library type escapes past a normalizer.
//! - `commands` - typed create/update schemas per resource, including nested
//!   collections and derived-field computation (invoice totals, service cost).
//! - `ToolError` - the fail-fast taxonomy for schema and configuration
//!   mistakes, which are reported before any network call is attempted.
//! - `config` - application configuration loaded from file, environment, and
//!   programmatic overrides, validated at startup.

pub mod commands;
pub mod config;
pub mod errors;
pub mod outcome;

pub use errors::ToolError;
pub use outcome::{Outcome, Payload};
