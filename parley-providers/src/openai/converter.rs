//! Request conversion for OpenAI

use crate::traits::RequestConverter;
use async_trait::async_trait;
use parley_core::{Error, Message, ProviderRequest, Role, ToolSet};
use serde_json::{json, Value};

/// Converts canonical requests to the chat-completions format
#[derive(Debug, Clone, Copy, Default)]
pub struct OpenAIConverter;

#[async_trait]
impl RequestConverter for OpenAIConverter {
    async fn convert_request(&self, request: &ProviderRequest) -> Result<Value, Error> {
        let params = &request.parameters;
        let mut body = json!({
            "model": params.model.as_str(),
            "messages": self.convert_messages(&request.messages),
            "stream": false,
        });

        if let Some(max_tokens) = params.max_tokens {
            body["max_tokens"] = json!(max_tokens);
        }
        if let Some(temperature) = params.temperature {
            body["temperature"] = json!(temperature);
        }
        if let Some(top_p) = params.top_p {
            body["top_p"] = json!(top_p);
        }
        if let Some(stop) = &params.stop {
            body["stop"] = json!(stop);
        }
        if let Some(seed) = params.seed {
            body["seed"] = json!(seed);
        }

        // parallel_tool_calls is rejected by the API unless tools are present
        if let Some(tools) = request.tools.as_ref().filter(|t| !t.is_empty()) {
            body["tools"] = json!(self.convert_tools(tools));
            if let Some(parallel) = params.parallel_tool_calls {
                body["parallel_tool_calls"] = json!(parallel);
            }
        }

        Ok(body)
    }
}

impl OpenAIConverter {
    /// Convert a message sequence
    pub fn convert_messages(&self, messages: &[Message]) -> Vec<Value> {
        messages.iter().map(|msg| self.convert_message(msg)).collect()
    }

    fn convert_message(&self, message: &Message) -> Value {
        let mut msg = json!({
            "role": message.role.as_str(),
            "content": message.content,
        });

        if message.role == Role::Assistant && message.has_tool_calls() {
            if message.content.is_empty() {
                msg["content"] = Value::Null;
            }
            msg["tool_calls"] = message
                .tool_calls
                .iter()
                .map(|call| {
                    json!({
                        "id": call.id,
                        "type": "function",
                        "function": {
                            "name": call.name,
                            "arguments": call.arguments_json(),
                        },
                    })
                })
                .collect();
        }

        if let Some(name) = &message.metadata.name {
            msg["name"] = json!(name);
        }
        if let Some(tool_call_id) = message.tool_call_id() {
            msg["tool_call_id"] = json!(tool_call_id);
        }

        msg
    }

    /// Convert a tool set to function definitions
    pub fn convert_tools(&self, tools: &ToolSet) -> Vec<Value> {
        tools
            .iter()
            .map(|tool| {
                json!({
                    "type": "function",
                    "function": {
                        "name": tool.name(),
                        "description": tool.description(),
                        "parameters": tool.parameters(),
                    },
                })
            })
            .collect()
    }
}
