use std::sync::Arc;

use anyhow::Result;
use tracing::{debug, warn};

use crate::llm::{ChatMessage, LlmClient};
use crate::tools::ToolRegistry;

const SYSTEM_PROMPT: &str = "\
You are a business data assistant that answers questions about customers, \
invoices, contracts, items, serials, and services, with web search available \
for external information.

When answering questions:
1. Use the tools to gather the data; look a customer up first when you need \
their id.
2. For brand questions use item_search; for contract or SLA questions use \
active_contracts; for service history use service_history.
3. When the user asks to scrape a URL, call web_search with \
search_type='scrape' and the exact URL as the query. Never rewrite the URL.
4. Answer with specific details from the retrieved data, not generic text.";

/// The orchestrating loop: ask the model, run the tools it requests, feed
/// the results back, repeat until it answers in plain text or the turn
/// budget runs out.
pub struct AgentRuntime {
    llm: Arc<dyn LlmClient>,
    tools: ToolRegistry,
    max_turns: u32,
}

impl AgentRuntime {
    pub fn new(llm: Arc<dyn LlmClient>, tools: ToolRegistry, max_turns: u32) -> Self {
        Self { llm, tools, max_turns: max_turns.max(1) }
    }

    /// Always returns an answer string; anything that escapes the loop is
    /// folded into an error message rather than raised.
    pub async fn answer(&self, question: &str) -> String {
        match self.run(question).await {
            Ok(answer) => answer,
            Err(err) => {
                warn!(error = %err, "query failed");
                format!("Error processing query: {err}")
            }
        }
    }

    async fn run(&self, question: &str) -> Result<String> {
        let definitions = self.tools.definitions();
        let mut messages = vec![ChatMessage::system(SYSTEM_PROMPT), ChatMessage::user(question)];

        for turn_index in 0..self.max_turns {
            let turn = self.llm.chat(&messages, &definitions).await?;

            if turn.tool_calls.is_empty() {
                return Ok(turn
                    .content
                    .filter(|content| !content.trim().is_empty())
                    .unwrap_or_else(|| "I could not find an answer to that question.".to_string()));
            }

            messages.push(ChatMessage::assistant_calls(&turn));
            for call in &turn.tool_calls {
                debug!(turn = turn_index, tool = %call.name, "tool call");
                let output = self.tools.execute(&call.name, call.arguments.clone()).await;
                messages.push(ChatMessage::tool_result(call.id.clone(), output));
            }
        }

        anyhow::bail!("no final answer after {} tool turns", self.max_turns)
    }
}
