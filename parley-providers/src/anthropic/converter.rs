//! Conversion between Parley types and Anthropic API types

use crate::constants::DEFAULT_MAX_TOKENS;
use crate::error;
use crate::traits::RequestConverter;
use async_trait::async_trait;
use parley_core::{Error, Message, ProviderRequest, Role};
use serde::{Deserialize, Serialize};
use serde_json::Value;

// Anthropic API request types
#[derive(Debug, Serialize)]
pub struct AnthropicRequest {
    pub model: String,
    pub messages: Vec<AnthropicMessage>,
    pub max_tokens: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub system: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub top_p: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub top_k: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stop_sequences: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tools: Option<Vec<AnthropicTool>>,
    pub stream: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnthropicMessage {
    pub role: String,
    pub content: AnthropicContent,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AnthropicContent {
    Text(String),
    Blocks(Vec<ContentBlock>),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum ContentBlock {
    #[serde(rename = "text")]
    Text { text: String },
    #[serde(rename = "tool_use")]
    ToolUse {
        id: String,
        name: String,
        input: Value,
    },
    #[serde(rename = "tool_result")]
    ToolResult {
        tool_use_id: String,
        content: String,
    },
    /// Block types this adapter does not interpret (thinking, images, ...)
    #[serde(other)]
    Unknown,
}

#[derive(Debug, Serialize)]
pub struct AnthropicTool {
    pub name: String,
    pub description: String,
    pub input_schema: Value,
}

/// Converts canonical requests to the messages API format
#[derive(Debug, Clone, Copy, Default)]
pub struct AnthropicConverter;

#[async_trait]
impl RequestConverter for AnthropicConverter {
    async fn convert_request(&self, request: &ProviderRequest) -> Result<Value, Error> {
        let body = to_anthropic_request(request);
        serde_json::to_value(body).map_err(|e| error::encode_error("anthropic", e))
    }
}

// Conversion functions
pub fn to_anthropic_request(request: &ProviderRequest) -> AnthropicRequest {
    let mut system_parts = Vec::new();
    let mut messages: Vec<AnthropicMessage> = Vec::new();
    // Whether the last pushed message holds only tool results
    let mut open_tool_turn = false;

    for msg in &request.messages {
        match msg.role {
            Role::System => system_parts.push(msg.content.clone()),
            Role::User => {
                messages.push(AnthropicMessage {
                    role: "user".to_string(),
                    content: AnthropicContent::Text(msg.content.clone()),
                });
                open_tool_turn = false;
            }
            Role::Assistant => {
                messages.push(AnthropicMessage {
                    role: "assistant".to_string(),
                    content: convert_assistant(msg),
                });
                open_tool_turn = false;
            }
            Role::Tool => {
                let block = ContentBlock::ToolResult {
                    tool_use_id: msg.tool_call_id().unwrap_or_default().to_string(),
                    content: msg.content.clone(),
                };
                match messages.last_mut() {
                    Some(AnthropicMessage {
                        content: AnthropicContent::Blocks(blocks),
                        ..
                    }) if open_tool_turn => blocks.push(block),
                    _ => {
                        messages.push(AnthropicMessage {
                            role: "user".to_string(),
                            content: AnthropicContent::Blocks(vec![block]),
                        });
                        open_tool_turn = true;
                    }
                }
            }
        }
    }

    let tools = request
        .tools
        .as_ref()
        .filter(|t| !t.is_empty())
        .map(|tools| {
            tools
                .iter()
                .map(|tool| AnthropicTool {
                    name: tool.name().to_string(),
                    description: tool.description().to_string(),
                    input_schema: tool.parameters().clone(),
                })
                .collect()
        });

    let params = &request.parameters;
    AnthropicRequest {
        model: params.model.to_string(),
        messages,
        max_tokens: params.max_tokens.unwrap_or(DEFAULT_MAX_TOKENS),
        system: (!system_parts.is_empty()).then(|| system_parts.join("\n\n")),
        temperature: params.temperature,
        top_p: params.top_p,
        top_k: params.top_k,
        stop_sequences: params.stop.clone(),
        tools,
        stream: false,
    }
}

fn convert_assistant(msg: &Message) -> AnthropicContent {
    if !msg.has_tool_calls() {
        return AnthropicContent::Text(msg.content.clone());
    }

    let mut blocks = Vec::with_capacity(msg.tool_calls.len() + 1);
    if !msg.content.is_empty() {
        blocks.push(ContentBlock::Text {
            text: msg.content.clone(),
        });
    }
    blocks.extend(msg.tool_calls.iter().map(|call| ContentBlock::ToolUse {
        id: call.id.clone(),
        name: call.name.clone(),
        input: call.arguments.clone(),
    }));
    AnthropicContent::Blocks(blocks)
}
