//! Conversion between Parley types and Ollama API types

use crate::traits::RequestConverter;
use async_trait::async_trait;
use parley_core::{Error, Message, ProviderRequest, Role};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;

// Ollama API request types
#[derive(Debug, Serialize)]
pub struct OllamaRequest {
    pub model: String,
    pub messages: Vec<OllamaMessage>,
    pub stream: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub options: Option<OllamaOptions>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tools: Option<Vec<OllamaTool>>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct OllamaMessage {
    #[serde(default)]
    pub role: String,
    #[serde(default)]
    pub content: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tool_calls: Option<Vec<OllamaToolCall>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tool_name: Option<String>,
}

#[derive(Debug, Default, Serialize)]
pub struct OllamaOptions {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub top_p: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub top_k: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub num_predict: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stop: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
}

impl OllamaOptions {
    fn is_empty(&self) -> bool {
        self.temperature.is_none()
            && self.top_p.is_none()
            && self.top_k.is_none()
            && self.num_predict.is_none()
            && self.stop.is_none()
            && self.seed.is_none()
    }
}

#[derive(Debug, Serialize)]
pub struct OllamaTool {
    #[serde(rename = "type")]
    pub tool_type: String,
    pub function: OllamaFunction,
}

#[derive(Debug, Serialize)]
pub struct OllamaFunction {
    pub name: String,
    pub description: String,
    pub parameters: Value,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct OllamaToolCall {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub function: OllamaFunctionCall,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct OllamaFunctionCall {
    pub name: String,
    #[serde(default)]
    pub arguments: Value,
}

/// Converts canonical requests to the `/api/chat` format
#[derive(Debug, Clone, Copy, Default)]
pub struct OllamaConverter;

#[async_trait]
impl RequestConverter for OllamaConverter {
    async fn convert_request(&self, request: &ProviderRequest) -> Result<Value, Error> {
        serde_json::to_value(to_ollama_request(request)).map_err(|e| Error::ResponseParse {
            provider: "ollama".to_string(),
            message: format!("failed to encode request: {e}"),
            source: Some(Box::new(e)),
        })
    }
}

// Conversion functions
pub fn to_ollama_request(request: &ProviderRequest) -> OllamaRequest {
    // Ollama identifies tool results by function name, not call id
    let mut call_names: HashMap<&str, &str> = HashMap::new();
    let mut messages = Vec::with_capacity(request.messages.len());
    for msg in &request.messages {
        for call in &msg.tool_calls {
            call_names.insert(call.id.as_str(), call.name.as_str());
        }
        messages.push(convert_message(msg, &call_names));
    }

    let params = &request.parameters;
    let options = OllamaOptions {
        temperature: params.temperature,
        top_p: params.top_p,
        top_k: params.top_k,
        num_predict: params.max_tokens,
        stop: params.stop.clone(),
        seed: params.seed,
    };

    let tools = request
        .tools
        .as_ref()
        .filter(|t| !t.is_empty())
        .map(|tools| {
            tools
                .iter()
                .map(|tool| OllamaTool {
                    tool_type: "function".to_string(),
                    function: OllamaFunction {
                        name: tool.name().to_string(),
                        description: tool.description().to_string(),
                        parameters: tool.parameters().clone(),
                    },
                })
                .collect()
        });

    OllamaRequest {
        model: params.model.to_string(),
        messages,
        stream: false,
        options: (!options.is_empty()).then_some(options),
        tools,
    }
}

fn convert_message(msg: &Message, call_names: &HashMap<&str, &str>) -> OllamaMessage {
    let tool_calls = (msg.role == Role::Assistant && msg.has_tool_calls()).then(|| {
        msg.tool_calls
            .iter()
            .map(|call| OllamaToolCall {
                id: None,
                function: OllamaFunctionCall {
                    name: call.name.clone(),
                    arguments: call.arguments.clone(),
                },
            })
            .collect()
    });

    let tool_name = msg
        .tool_call_id()
        .and_then(|id| call_names.get(id))
        .map(|name| (*name).to_string());

    OllamaMessage {
        role: msg.role.as_str().to_string(),
        content: msg.content.clone(),
        tool_calls,
        tool_name,
    }
}
