//! Ollama response parsing

use crate::constants::OLLAMA_TOOL_ID_PREFIX;
use crate::error::{self, error_message};
use crate::ollama::converter::OllamaMessage;
use crate::traits::ResponseParser;
use crate::utils::parse_tool_arguments;
use async_trait::async_trait;
use parley_core::{Error, FinishReason, Response, ResponseMetadata, ToolCall, Usage};
use serde::Deserialize;
use serde_json::Value;
use std::collections::BTreeMap;

// Ollama API response types
#[derive(Debug, Deserialize)]
pub struct OllamaResponse {
    pub model: Option<String>,
    pub created_at: Option<String>,
    pub message: OllamaMessage,
    pub done_reason: Option<String>,
    pub total_duration: Option<u64>,
    pub load_duration: Option<u64>,
    pub prompt_eval_count: Option<u32>,
    pub eval_count: Option<u32>,
    pub eval_duration: Option<u64>,
}

pub fn parse_response(response: OllamaResponse) -> Result<Response, Error> {
    let tool_calls = response
        .message
        .tool_calls
        .unwrap_or_default()
        .into_iter()
        .enumerate()
        .map(|(i, tc)| {
            let arguments =
                parse_tool_arguments("ollama", &tc.function.name, &tc.function.arguments)?;
            let id = tc
                .id
                .filter(|id| !id.is_empty())
                .unwrap_or_else(|| format!("{OLLAMA_TOOL_ID_PREFIX}{i}"));
            Ok(ToolCall::new(id, tc.function.name, arguments))
        })
        .collect::<Result<Vec<_>, Error>>()?;

    let mut custom = BTreeMap::new();
    // Timing information, in nanoseconds
    if let Some(total_duration) = response.total_duration {
        custom.insert("total_duration_ns".to_string(), total_duration.to_string());
    }
    if let Some(load_duration) = response.load_duration {
        custom.insert("load_duration_ns".to_string(), load_duration.to_string());
    }
    if let Some(eval_duration) = response.eval_duration {
        custom.insert("eval_duration_ns".to_string(), eval_duration.to_string());
    }
    if let Some(created_at) = response.created_at {
        custom.insert("created_at".to_string(), created_at);
    }

    let usage = match (response.prompt_eval_count, response.eval_count) {
        (Some(prompt), Some(completion)) => Some(Usage::new(prompt, completion)),
        _ => None,
    };

    let finish_reason = if tool_calls.is_empty() {
        response.done_reason.as_deref().map(|reason| match reason {
            "stop" => FinishReason::Stop,
            "length" => FinishReason::Length,
            other => FinishReason::Other(other.to_string()),
        })
    } else {
        Some(FinishReason::ToolCalls)
    };

    Ok(Response {
        content: response.message.content,
        tool_calls,
        finish_reason,
        metadata: ResponseMetadata {
            model: response.model,
            id: None,
            usage,
            custom,
        },
    })
}

/// Parser implementation for Ollama
#[derive(Debug, Clone, Copy, Default)]
pub struct OllamaParser;

#[async_trait]
impl ResponseParser for OllamaParser {
    async fn parse_response(&self, value: Value) -> Result<Response, Error> {
        if let Some(message) = value.get("error").and_then(|_| error_message(&value)) {
            return Err(Error::api("ollama", message));
        }

        let ollama_response: OllamaResponse =
            serde_json::from_value(value).map_err(|e| error::parse_error("ollama", e))?;
        parse_response(ollama_response)
    }
}
