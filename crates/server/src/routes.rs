use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::Serialize;
use serde_json::{json, Value};
use tracing::info;

use fieldbook_agent::runtime::AgentRuntime;

#[derive(Clone)]
pub struct AppState {
    pub agent: Arc<AgentRuntime>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct QueryResponse {
    pub question: String,
    pub answer: String,
}

impl QueryResponse {
    fn into_json(self) -> Json<Value> {
        Json(json!({"question": self.question, "answer": self.answer}))
    }
}

pub fn router(agent: Arc<AgentRuntime>) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/query", post(query))
        .route("/examples", get(examples))
        .with_state(AppState { agent })
}

pub async fn health() -> Json<Value> {
    Json(json!({
        "status": "healthy",
        "message": "fieldbook query API is running",
        "endpoints": {
            "/query": "POST - Send natural language questions about business data"
        }
    }))
}

/// `{"question": …}` in, `{"question", "answer"}` out. A missing or
/// non-string question is the caller's fault (400); the agent itself never
/// raises, so 500 is reserved for serialization-level surprises.
pub async fn query(State(state): State<AppState>, body: String) -> (StatusCode, Json<Value>) {
    let question = serde_json::from_str::<Value>(&body)
        .ok()
        .and_then(|data| data.get("question").and_then(Value::as_str).map(str::to_string));

    let Some(question) = question else {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({"error": "Missing 'question' in request body"})),
        );
    };

    info!(event_name = "query.received", "processing question");
    let answer = state.agent.answer(&question).await;
    (StatusCode::OK, QueryResponse { question, answer }.into_json())
}

pub async fn examples() -> Json<Value> {
    Json(json!({
        "sample_queries": [
            "What is the purchase/invoice history for Company A?",
            "What model did Company A purchase from Ricoh?",
            "What contracts are currently active?",
            "What is the SLA agreement for Company A?",
            "Show me the service history for customer Company B",
            "What machines does Enterprise B have under contract?",
            "Find all items from Ricoh brand",
            "What is the residual value information for our machines?"
        ]
    }))
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use anyhow::Result;
    use async_trait::async_trait;
    use axum::body::Body;
    use axum::http::{header, Request, StatusCode};
    use serde_json::{json, Value};
    use tower::util::ServiceExt;

    use fieldbook_agent::llm::{AssistantTurn, ChatMessage, LlmClient, ToolDefinition};
    use fieldbook_agent::runtime::AgentRuntime;
    use fieldbook_agent::tools::ToolRegistry;

    use super::router;

    struct EchoLlm;

    #[async_trait]
    impl LlmClient for EchoLlm {
        async fn chat(
            &self,
            messages: &[ChatMessage],
            _tools: &[ToolDefinition],
        ) -> Result<AssistantTurn> {
            let question = messages
                .iter()
                .rev()
                .find(|message| message.role == "user")
                .and_then(|message| message.content.clone())
                .unwrap_or_default();
            Ok(AssistantTurn { content: Some(format!("echo: {question}")), tool_calls: vec![] })
        }
    }

    fn test_router() -> axum::Router {
        let agent = AgentRuntime::new(Arc::new(EchoLlm), ToolRegistry::default(), 4);
        router(Arc::new(agent))
    }

    async fn body_json(response: axum::response::Response) -> Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("readable body");
        serde_json::from_slice(&bytes).expect("json body")
    }

    #[tokio::test]
    async fn health_names_the_service() {
        let response = test_router()
            .oneshot(Request::builder().uri("/health").body(Body::empty()).expect("request"))
            .await
            .expect("response");

        assert_eq!(response.status(), StatusCode::OK);
        let payload = body_json(response).await;
        assert_eq!(payload["status"], json!("healthy"));
        assert!(payload["endpoints"].get("/query").is_some());
    }

    #[tokio::test]
    async fn query_round_trips_question_and_answer() {
        let request = Request::builder()
            .method("POST")
            .uri("/query")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(r#"{"question": "who is customer 1?"}"#))
            .expect("request");

        let response = test_router().oneshot(request).await.expect("response");

        assert_eq!(response.status(), StatusCode::OK);
        let payload = body_json(response).await;
        assert_eq!(payload["question"], json!("who is customer 1?"));
        assert_eq!(payload["answer"], json!("echo: who is customer 1?"));
    }

    #[tokio::test]
    async fn missing_question_is_a_bad_request() {
        for body in [r#"{}"#, r#"{"question": 7}"#, "not json"] {
            let request = Request::builder()
                .method("POST")
                .uri("/query")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body))
                .expect("request");

            let response = test_router().oneshot(request).await.expect("response");

            assert_eq!(response.status(), StatusCode::BAD_REQUEST, "body: {body}");
            let payload = body_json(response).await;
            assert_eq!(payload["error"], json!("Missing 'question' in request body"));
        }
    }

    #[tokio::test]
    async fn examples_lists_sample_queries() {
        let response = test_router()
            .oneshot(Request::builder().uri("/examples").body(Body::empty()).expect("request"))
            .await
            .expect("response");

        let payload = body_json(response).await;
        let samples = payload["sample_queries"].as_array().expect("array");
        assert!(!samples.is_empty());
    }
}
