//! Per-resource tool routers. Each module contributes one router of
//! schemars-typed tools; `FieldbookMcpServer::new` combines them.

mod contracts;
mod customers;
mod invoices;
mod items;
mod serials;
mod services;
