//! End-to-end dispatch through a fake transport: invocation faults must
//! never reach the wire, and wire faults must come back as data.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use serde_json::{json, Value};

use fieldbook_api::{ApiClient, ApiRequest, RawResponse, Transport, TransportError};
use fieldbook_core::{Outcome, Payload, ToolError};

/// Records every request and replays a scripted response.
struct FakeTransport {
    calls: AtomicUsize,
    last_request: Mutex<Option<ApiRequest>>,
    response: Box<dyn Fn() -> Result<RawResponse, TransportError> + Send + Sync>,
}

impl FakeTransport {
    fn replying(status: u16, body: &str) -> Arc<Self> {
        let body = body.to_string();
        Arc::new(Self {
            calls: AtomicUsize::new(0),
            last_request: Mutex::new(None),
            response: Box::new(move || Ok(RawResponse { status, body: body.clone() })),
        })
    }

    fn failing_connection(message: &str) -> Arc<Self> {
        let message = message.to_string();
        Arc::new(Self {
            calls: AtomicUsize::new(0),
            last_request: Mutex::new(None),
            response: Box::new(move || Err(TransportError::Connection(message.clone()))),
        })
    }

    fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Transport for FakeTransport {
    async fn send(&self, request: &ApiRequest) -> Result<RawResponse, TransportError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        *self.last_request.lock().expect("lock") = Some(request.clone());
        (self.response)()
    }
}

#[tokio::test]
async fn unknown_tool_fails_fast_without_touching_the_wire() {
    let transport = FakeTransport::replying(200, "[]");
    let client = ApiClient::new(transport.clone());

    let error = client.dispatch("summon_technician", json!({})).await.expect_err("not a tool");

    assert!(matches!(error, ToolError::Configuration(_)));
    assert_eq!(transport.calls(), 0);
}

#[tokio::test]
async fn schema_errors_fail_fast_without_touching_the_wire() {
    let transport = FakeTransport::replying(201, "{}");
    let client = ApiClient::new(transport.clone());

    let error = client
        .dispatch("create_customer", json!({"customer_data": {"email": "no-name@x.y"}}))
        .await
        .expect_err("name is required");

    assert!(matches!(error, ToolError::Schema(_)));
    assert_eq!(transport.calls(), 0);
}

#[tokio::test]
async fn connection_failure_comes_back_as_outcome_data() {
    let transport = FakeTransport::failing_connection("backend unreachable");
    let client = ApiClient::new(transport.clone());

    let outcome = client.dispatch("list_customers", json!({})).await.expect("invocation is valid");

    assert_eq!(outcome, Outcome::failure("connection error: backend unreachable"));
    assert_eq!(transport.calls(), 1);
}

#[tokio::test]
async fn delete_renders_the_empty_success_confirmation() {
    let transport = FakeTransport::replying(204, "");
    let client = ApiClient::new(transport.clone());

    let outcome = client.dispatch("delete_invoice", json!({"invoice_id": 5})).await.expect("ok");

    assert_eq!(outcome.render(), "Success: delete invoice completed successfully");
}

#[tokio::test]
async fn missing_resource_normalizes_to_not_found() {
    let transport = FakeTransport::replying(404, r#"{"detail": "Not found."}"#);
    let client = ApiClient::new(transport.clone());

    let outcome = client.dispatch("get_customer", json!({"customer_id": 999})).await.expect("ok");

    assert_eq!(outcome, Outcome::NotFound);
}

#[tokio::test]
async fn two_item_filters_combine_with_and_after_dispatch() {
    let listing = json!([
        {"name": "Color Printer", "model": "IM C3000", "brand": "Ricoh"},
        {"name": "Copier", "model": "MP 2555", "brand": "Ricoh"},
        {"name": "Color Printer", "model": "PIXMA", "brand": "Canon"}
    ]);
    let transport = FakeTransport::replying(200, &listing.to_string());
    let client = ApiClient::new(transport.clone());

    let outcome = client
        .dispatch("list_items", json!({"name_filter": "Print", "brand_filter": "Ricoh"}))
        .await
        .expect("ok");

    let Outcome::Ok(Payload::Json(Value::Array(records))) = outcome else {
        panic!("filtered listing must stay a JSON array");
    };
    assert_eq!(records.len(), 1);
    assert_eq!(records[0]["model"], json!("IM C3000"));
    assert_eq!(transport.calls(), 1);
}

#[tokio::test]
async fn create_invoice_sends_the_derived_totals() {
    let transport = FakeTransport::replying(201, r#"{"id": 31}"#);
    let client = ApiClient::new(transport.clone());

    client
        .dispatch(
            "create_invoice",
            json!({"invoice_data": {
                "customer": 7,
                "invoice_date": "2026-03-14",
                "details": [
                    {"item": 1, "quantity": 2, "unit_price": "150.00"},
                    {"item": 2, "unit_price": "75.00"}
                ]
            }}),
        )
        .await
        .expect("ok");

    let sent = transport.last_request.lock().expect("lock").clone().expect("one call");
    let body = sent.body.expect("create has a body");
    assert_eq!(body["total_amount"], json!("375.00"));
    assert_eq!(body["details"][1]["quantity"], json!(1));
}
