// OpenAI-compatible client implementation

use crate::config::OpenAIConfig;
use crate::traits::{ChatClient, ChatOptions, ChatRequest, ChatResponse, TokenUsage};
use crate::types::{Content, ContentPart, Message, ToolCall};
use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};

/// Chat Completions client (HTTP direct, no SDK)
pub struct OpenAIClient {
    http_client: reqwest::Client,
    base_url: String,
}

impl OpenAIClient {
    /// Create client against the default OpenAI endpoint
    pub fn new(api_key: impl Into<String>) -> Result<Self> {
        Self::from_config(OpenAIConfig::new(api_key))
    }

    pub fn from_config(config: OpenAIConfig) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert(
            AUTHORIZATION,
            HeaderValue::from_str(&format!("Bearer {}", config.api_key))
                .context("Invalid API key format")?,
        );

        let http_client = reqwest::Client::builder()
            .default_headers(headers)
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self {
            http_client,
            base_url: config.base_url().to_string(),
        })
    }

    /// Build chat completion request payload
    fn build_chat_request(
        &self,
        model: &str,
        messages: Vec<Message>,
        options: &ChatOptions,
    ) -> Result<Value> {
        let openai_messages: Vec<Value> = messages
            .into_iter()
            .map(|msg| self.convert_message(msg))
            .collect::<Result<Vec<_>>>()?;

        let mut request = Map::new();
        request.insert("model".to_string(), json!(model));
        request.insert("messages".to_string(), Value::Array(openai_messages));

        if let Some(temp) = options.temperature {
            request.insert("temperature".to_string(), json!(temp));
        }
        if let Some(max_tokens) = options.max_tokens {
            request.insert("max_tokens".to_string(), json!(max_tokens));
        }
        if let Some(tools) = options.tools.as_ref().filter(|tools| !tools.is_empty()) {
            request.insert("tools".to_string(), serde_json::to_value(tools)?);
            if let Some(tool_choice) = &options.tool_choice {
                request.insert("tool_choice".to_string(), serde_json::to_value(tool_choice)?);
            }
        }

        Ok(Value::Object(request))
    }

    /// Convert our Message type to the wire format
    fn convert_message(&self, message: Message) -> Result<Value> {
        let mut obj = Map::new();
        obj.insert("role".to_string(), json!(message.role()));

        match message {
            Message::System { content, name } | Message::Human { content, name } => {
                obj.insert("content".to_string(), self.convert_content(content));
                if let Some(name) = name {
                    obj.insert("name".to_string(), json!(name));
                }
            }
            Message::AI { content, tool_calls, name } => {
                // null content is only accepted alongside tool_calls
                let content = match content {
                    Some(c) => self.convert_content(c),
                    None if tool_calls.is_some() => Value::Null,
                    None => json!(""),
                };
                obj.insert("content".to_string(), content);
                if let Some(tool_calls) = tool_calls {
                    obj.insert("tool_calls".to_string(), serde_json::to_value(tool_calls)?);
                }
                if let Some(name) = name {
                    obj.insert("name".to_string(), json!(name));
                }
            }
            Message::Tool { tool_call_id, content } => {
                obj.insert("tool_call_id".to_string(), json!(tool_call_id));
                obj.insert("content".to_string(), self.convert_content(content));
            }
        }

        Ok(Value::Object(obj))
    }

    fn convert_content(&self, content: Content) -> Value {
        match content {
            Content::Text(s) => json!(s),
            Content::Parts(parts) => Value::Array(
                parts
                    .into_iter()
                    .map(|ContentPart::Text { text }| json!({ "type": "text", "text": text }))
                    .collect(),
            ),
        }
    }
}

#[async_trait]
impl ChatClient for OpenAIClient {
    async fn chat(&self, request: ChatRequest) -> Result<ChatResponse> {
        let payload = self.build_chat_request(&request.model, request.messages, &request.options)?;

        tracing::debug!(
            "OPENAI: POST {}/chat/completions model={}",
            self.base_url,
            request.model
        );

        let response = self
            .http_client
            .post(format!("{}/chat/completions", self.base_url))
            .json(&payload)
            .send()
            .await
            .context("Failed to send request")?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();
            anyhow::bail!("OpenAI API error ({}): {}", status, error_text);
        }

        let raw: OpenAIChatResponse = response
            .json()
            .await
            .context("Failed to parse response")?;

        let choice = raw
            .choices
            .into_iter()
            .next()
            .context("Response contained no choices")?;

        Ok(ChatResponse {
            content: choice.message.content,
            tool_calls: choice.message.tool_calls.filter(|calls| !calls.is_empty()),
            usage: raw.usage.map(|usage| TokenUsage {
                input_tokens: usage.prompt_tokens,
                output_tokens: usage.completion_tokens,
                total_tokens: usage.total_tokens,
            }),
            finish_reason: choice.finish_reason,
        })
    }
}

// ============================================================================
// WIRE RESPONSE TYPES
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
struct OpenAIChatResponse {
    #[serde(default)]
    pub choices: Vec<Choice>,
    #[serde(default)]
    pub usage: Option<Usage>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct Choice {
    pub message: ResponseMessage,
    #[serde(default)]
    pub finish_reason: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct ResponseMessage {
    #[serde(default)]
    pub content: Option<String>,
    #[serde(default)]
    pub tool_calls: Option<Vec<ToolCall>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct Usage {
    pub prompt_tokens: u32,
    pub completion_tokens: u32,
    pub total_tokens: u32,
}
