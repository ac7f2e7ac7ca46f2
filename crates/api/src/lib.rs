//! Client for the records REST backend.
//!
//! The pieces, in call order:
//!
//! 1. [`registry::plan`] turns a tool name plus untyped arguments into a
//!    [`PlannedCall`] - a fully-shaped request with derived fields computed.
//!    Unknown tools and malformed arguments fail here, before any network
//!    traffic.
//! 2. [`Transport`] sends the planned request. The production implementation
//!    is a reqwest client with a per-request timeout; tests substitute fakes
//!    and count calls.
//! 3. [`normalize::normalize`] folds the raw status/body pair into a
//!    canonical [`fieldbook_core::Outcome`]. Transport failures become
//!    `Outcome::Failure` data, never errors.
//!
//! Each dispatch is single-attempt: there is no retry state.

mod client;
pub mod filters;
pub mod normalize;
pub mod registry;
mod resources;
pub mod transport;

pub use client::ApiClient;
pub use registry::{PlannedCall, PostFilter, TOOL_NAMES};
pub use transport::{ApiRequest, HttpTransport, Method, RawResponse, Transport, TransportError};
