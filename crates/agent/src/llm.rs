use std::time::Duration;

use anyhow::{Context, Result};
use async_trait::async_trait;
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use fieldbook_core::config::LlmConfig;

/// One entry in the conversation transcript, OpenAI chat shape.
#[derive(Clone, Debug, Serialize)]
pub struct ChatMessage {
    pub role: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tool_calls: Option<Vec<WireToolCall>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tool_call_id: Option<String>,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self { role: "system", content: Some(content.into()), tool_calls: None, tool_call_id: None }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self { role: "user", content: Some(content.into()), tool_calls: None, tool_call_id: None }
    }

    /// The assistant turn that requested tool calls, echoed back verbatim so
    /// the model can pair it with the tool results that follow.
    pub fn assistant_calls(turn: &AssistantTurn) -> Self {
        Self {
            role: "assistant",
            content: turn.content.clone(),
            tool_calls: Some(turn.tool_calls.iter().map(WireToolCall::from).collect()),
            tool_call_id: None,
        }
    }

    pub fn tool_result(call_id: impl Into<String>, output: impl Into<String>) -> Self {
        Self {
            role: "tool",
            content: Some(output.into()),
            tool_calls: None,
            tool_call_id: Some(call_id.into()),
        }
    }
}

/// A tool surface described to the model.
#[derive(Clone, Debug)]
pub struct ToolDefinition {
    pub name: String,
    pub description: String,
    pub parameters: Value,
}

impl ToolDefinition {
    fn to_wire(&self) -> Value {
        json!({
            "type": "function",
            "function": {
                "name": self.name,
                "description": self.description,
                "parameters": self.parameters,
            }
        })
    }
}

/// A tool invocation requested by the model, with its arguments already
/// parsed out of the wire encoding.
#[derive(Clone, Debug, PartialEq)]
pub struct ToolCall {
    pub id: String,
    pub name: String,
    pub arguments: Value,
}

/// What the model produced for one turn: free text, tool calls, or both.
#[derive(Clone, Debug, Default)]
pub struct AssistantTurn {
    pub content: Option<String>,
    pub tool_calls: Vec<ToolCall>,
}

#[async_trait]
pub trait LlmClient: Send + Sync {
    async fn chat(
        &self,
        messages: &[ChatMessage],
        tools: &[ToolDefinition],
    ) -> Result<AssistantTurn>;
}

/// OpenAI wire encoding of a tool call: arguments travel as a JSON string
/// inside the JSON document.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct WireToolCall {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub function: WireFunction,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct WireFunction {
    pub name: String,
    pub arguments: String,
}

impl From<&ToolCall> for WireToolCall {
    fn from(call: &ToolCall) -> Self {
        Self {
            id: call.id.clone(),
            kind: "function".to_string(),
            function: WireFunction {
                name: call.name.clone(),
                arguments: call.arguments.to_string(),
            },
        }
    }
}

#[derive(Deserialize)]
struct ChatResponse {
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: ResponseMessage,
}

#[derive(Deserialize)]
struct ResponseMessage {
    #[serde(default)]
    content: Option<String>,
    #[serde(default)]
    tool_calls: Option<Vec<WireToolCall>>,
}

/// Azure OpenAI chat-completions client. Deterministic by construction:
/// temperature is pinned to zero.
pub struct AzureOpenAiClient {
    client: reqwest::Client,
    endpoint: String,
    deployment: String,
    api_version: String,
    api_key: SecretString,
}

impl AzureOpenAiClient {
    pub fn from_config(config: &LlmConfig) -> Result<Self> {
        config.ensure_complete().context("incomplete llm configuration")?;
        let endpoint = config
            .endpoint
            .clone()
            .context("llm.endpoint is required")?
            .trim_end_matches('/')
            .to_string();
        let api_key = config.api_key.clone().context("llm.api_key is required")?;
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .context("building llm http client")?;

        Ok(Self {
            client,
            endpoint,
            deployment: config.deployment.clone(),
            api_version: config.api_version.clone(),
            api_key,
        })
    }

    fn url(&self) -> String {
        format!(
            "{}/openai/deployments/{}/chat/completions?api-version={}",
            self.endpoint, self.deployment, self.api_version
        )
    }
}

#[async_trait]
impl LlmClient for AzureOpenAiClient {
    async fn chat(
        &self,
        messages: &[ChatMessage],
        tools: &[ToolDefinition],
    ) -> Result<AssistantTurn> {
        let mut body = json!({
            "messages": messages,
            "temperature": 0,
        });
        if !tools.is_empty() {
            body["tools"] = Value::Array(tools.iter().map(ToolDefinition::to_wire).collect());
        }

        let response = self
            .client
            .post(self.url())
            .header("api-key", self.api_key.expose_secret())
            .json(&body)
            .send()
            .await
            .context("sending chat completion request")?;

        let status = response.status();
        let text = response.text().await.context("reading chat completion response")?;
        if !status.is_success() {
            anyhow::bail!("chat completion failed with status {status}: {text}");
        }

        let parsed: ChatResponse =
            serde_json::from_str(&text).context("decoding chat completion response")?;
        let message = parsed
            .choices
            .into_iter()
            .next()
            .context("chat completion returned no choices")?
            .message;

        let tool_calls = message
            .tool_calls
            .unwrap_or_default()
            .into_iter()
            .map(|call| {
                let arguments = serde_json::from_str(&call.function.arguments)
                    .unwrap_or(Value::Object(serde_json::Map::new()));
                ToolCall { id: call.id, name: call.function.name, arguments }
            })
            .collect();

        Ok(AssistantTurn { content: message.content, tool_calls })
    }
}
