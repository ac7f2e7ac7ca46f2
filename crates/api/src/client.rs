use std::sync::Arc;

use serde_json::Value;
use tracing::{debug, warn};

use fieldbook_core::config::BackendConfig;
use fieldbook_core::{Outcome, Payload, ToolError};

use crate::filters::{customer_matches, item_matches, retain_matching};
use crate::normalize::normalize;
use crate::registry::{plan, PostFilter};
use crate::transport::{HttpTransport, Transport};

/// The dispatcher: plans a call, sends it once, and normalizes whatever
/// comes back. Stateless between dispatches.
#[derive(Clone)]
pub struct ApiClient {
    transport: Arc<dyn Transport>,
}

impl ApiClient {
    pub fn new(transport: Arc<dyn Transport>) -> Self {
        Self { transport }
    }

    pub fn from_config(config: &BackendConfig) -> Result<Self, reqwest::Error> {
        Ok(Self::new(Arc::new(HttpTransport::new(config)?)))
    }

    /// Execute one named operation. `Err` is reserved for faults in how the
    /// tool was invoked (unknown name, malformed arguments); everything the
    /// backend or the wire does wrong comes back as `Ok` with a non-success
    /// [`Outcome`]. Single attempt, no retries.
    pub async fn dispatch(&self, tool: &str, args: Value) -> Result<Outcome, ToolError> {
        let planned = plan(tool, args)?;
        debug!(tool, path = %planned.request.path, "dispatching");

        let raw = match self.transport.send(&planned.request).await {
            Ok(raw) => raw,
            Err(err) => {
                warn!(tool, error = %err, "transport failure");
                return Ok(Outcome::failure(err.to_string()));
            }
        };

        let mut outcome = normalize(raw.status, &raw.body, planned.action);
        apply_post_filter(&mut outcome, &planned.post);
        Ok(outcome)
    }
}

/// Client-side filters only ever narrow a successful JSON listing; every
/// other outcome passes through untouched.
fn apply_post_filter(outcome: &mut Outcome, post: &PostFilter) {
    let Outcome::Ok(Payload::Json(payload)) = outcome else {
        return;
    };
    match post {
        PostFilter::None => {}
        PostFilter::CustomerName(name) => {
            retain_matching(payload, |record| customer_matches(record, name));
        }
        PostFilter::Items { query, brand } => {
            retain_matching(payload, |record| {
                item_matches(record, query.as_deref(), brand.as_deref())
            });
        }
    }
}
