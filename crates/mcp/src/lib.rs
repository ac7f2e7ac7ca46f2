//! Fieldbook MCP (Model Context Protocol) Server
//!
//! Exposes the full business-records tool surface - all operations over
//! customers, items, invoices, contracts, serials, and services - to AI
//! agents over stdio.
//!
//! Every tool routes through the same dispatcher as the query agent, so
//! derived fields, filtering, and response normalization behave identically
//! on both surfaces. Tool output is the canonical rendered text: pretty JSON
//! on success, readable error strings otherwise.

mod server;
mod tools;

pub use server::FieldbookMcpServer;
