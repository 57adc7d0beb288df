use crate::error::{GraphError, Result};
use crate::node::Node;
use async_trait::async_trait;
use packpal_llm::{ChatClient, ChatOptions, ChatRequest, Message, ToolCall, ToolChoice};
use packpal_tools::ToolRegistry;
use packpal_types::{AssistantState, ChatMessage, LLMConfig, NodeType, StateUpdate};
use std::sync::Arc;
use std::time::Duration;

/// Decision step: asks the model what to do next
pub struct LLMNode {
    client: Arc<dyn ChatClient>,
    registry: Arc<ToolRegistry>,
    llm_config: LLMConfig,
    system_prompt: Arc<str>,
    timeout: Duration,
}

impl LLMNode {
    pub fn new(
        client: Arc<dyn ChatClient>,
        registry: Arc<ToolRegistry>,
        llm_config: LLMConfig,
        system_prompt: Arc<str>,
        timeout: Duration,
    ) -> Self {
        Self {
            client,
            registry,
            llm_config,
            system_prompt,
            timeout,
        }
    }

    /// Request sent to the provider. Only this copy carries the embedded
    /// context and the current instruction text; the state is untouched.
    pub fn build_request(&self, state: &AssistantState) -> Result<ChatRequest> {
        let mut messages = state.messages.clone();

        if let Some(Message::System { content, .. }) = messages.first_mut() {
            *content = self.system_prompt.as_ref().into();
        }

        if let Some(Message::Human { content, .. }) = messages.last_mut() {
            let embedded = with_context(state, &content.to_text())?;
            *content = embedded.into();
        }

        let mut options = ChatOptions::new()
            .tools(self.registry.definitions())
            .tool_choice(ToolChoice::auto());

        if let Some(temp) = self.llm_config.temperature {
            options = options.temperature(temp);
        }
        if let Some(max_tokens) = self.llm_config.max_tokens {
            options = options.max_tokens(max_tokens);
        }

        Ok(ChatRequest::new(self.llm_config.model.clone(), messages).with_options(options))
    }
}

/// Prefix the user text with the latest trip and packing list
fn with_context(state: &AssistantState, user_text: &str) -> Result<String> {
    let trip = serde_json::to_string(&state.trip)?;
    let items = state
        .packing_list
        .iter()
        .map(serde_json::to_string)
        .collect::<std::result::Result<Vec<_>, _>>()?;

    Ok(format!(
        "Trip: {}\n\nPacking List: [{}]\n\nUser message: {}",
        trip,
        items.join(",\n"),
        user_text
    ))
}

/// Providers may omit call ids; results must still reference their call
fn ensure_call_ids(calls: Vec<ToolCall>) -> Vec<ToolCall> {
    calls
        .into_iter()
        .map(|mut call| {
            if call.id.trim().is_empty() {
                call.id = format!("call_{}", uuid::Uuid::new_v4().simple());
            }
            call
        })
        .collect()
}

#[async_trait]
impl Node for LLMNode {
    async fn execute(&self, state: &AssistantState) -> Result<StateUpdate> {
        let request = self.build_request(state)?;

        tracing::info!(
            "LLM_NODE: requesting model={} messages={}",
            request.model,
            request.messages.len()
        );

        let response = tokio::time::timeout(self.timeout, self.client.chat(request))
            .await
            .map_err(|_| GraphError::ProviderTimeout(self.timeout.as_millis() as u64))?
            .map_err(GraphError::Provider)?;

        let content = response.content.unwrap_or_default();
        let tool_calls = ensure_call_ids(response.tool_calls.unwrap_or_default());

        tracing::debug!("LLM_NODE: reply with {} tool call(s)", tool_calls.len());

        // a reply with neither text nor calls is kept as ""
        let body = if content.is_empty() && !tool_calls.is_empty() {
            None
        } else {
            Some(content.as_str().into())
        };

        Ok(StateUpdate::new()
            .message(Message::ai_with_tools(body, tool_calls))
            .chat(ChatMessage::assistant(content)))
    }

    fn node_type(&self) -> NodeType {
        NodeType::LLM
    }
}
