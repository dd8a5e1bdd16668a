//! Response parsing for OpenAI

use crate::error::{self, error_message};
use crate::traits::ResponseParser;
use crate::utils::parse_tool_arguments;
use async_trait::async_trait;
use parley_core::{Error, FinishReason, Response, ResponseMetadata, ToolCall, Usage};
use serde::Deserialize;
use serde_json::Value;

/// Parses chat-completions replies
#[derive(Debug, Clone, Copy)]
pub struct OpenAIParser {
    provider: &'static str,
}

impl OpenAIParser {
    /// Create a parser that tags errors with `provider`
    pub fn new(provider: &'static str) -> Self {
        Self { provider }
    }
}

#[async_trait]
impl ResponseParser for OpenAIParser {
    async fn parse_response(&self, value: Value) -> Result<Response, Error> {
        // Some compatible backends report failures in a 200 body
        if value.get("error").is_some_and(|e| !e.is_null()) {
            let message = error_message(&value).unwrap_or_else(|| value["error"].to_string());
            return Err(Error::api(self.provider, message));
        }

        let response: OpenAIResponse =
            serde_json::from_value(value).map_err(|e| error::parse_error(self.provider, e))?;

        let choice = response
            .choices
            .into_iter()
            .next()
            .ok_or_else(|| Error::response_parse(self.provider, "No choices in response"))?;

        let tool_calls = choice
            .message
            .tool_calls
            .unwrap_or_default()
            .into_iter()
            .map(|tc| {
                let arguments =
                    parse_tool_arguments(self.provider, &tc.function.name, &tc.function.arguments)?;
                Ok(ToolCall::new(tc.id, tc.function.name, arguments))
            })
            .collect::<Result<Vec<_>, Error>>()?;

        let mut metadata = ResponseMetadata {
            model: response.model,
            id: response.id,
            usage: response.usage.map(|u| Usage {
                prompt_tokens: u.prompt_tokens,
                completion_tokens: u.completion_tokens,
                total_tokens: u.total_tokens,
            }),
            ..Default::default()
        };
        if let Some(fingerprint) = response.system_fingerprint {
            metadata.custom.insert("system_fingerprint".into(), fingerprint);
        }

        Ok(Response {
            content: choice.message.content.unwrap_or_default(),
            tool_calls,
            finish_reason: choice.finish_reason.as_deref().map(parse_finish_reason),
            metadata,
        })
    }
}

/// Map a chat-completions `finish_reason`
pub fn parse_finish_reason(reason: &str) -> FinishReason {
    match reason {
        "stop" => FinishReason::Stop,
        "length" => FinishReason::Length,
        "tool_calls" | "function_call" => FinishReason::ToolCalls,
        "content_filter" => FinishReason::ContentFilter,
        other => FinishReason::Other(other.to_string()),
    }
}

// Response structures
#[derive(Deserialize)]
struct OpenAIResponse {
    id: Option<String>,
    model: Option<String>,
    #[serde(default)]
    choices: Vec<Choice>,
    usage: Option<UsageInfo>,
    system_fingerprint: Option<String>,
}

#[derive(Deserialize)]
struct Choice {
    message: MessageResponse,
    finish_reason: Option<String>,
}

#[derive(Deserialize)]
struct MessageResponse {
    content: Option<String>,
    tool_calls: Option<Vec<ToolCallResponse>>,
}

#[derive(Deserialize)]
struct ToolCallResponse {
    id: String,
    function: FunctionCall,
}

#[derive(Deserialize)]
struct FunctionCall {
    name: String,
    #[serde(default)]
    arguments: Value,
}

#[derive(Deserialize)]
struct UsageInfo {
    prompt_tokens: u32,
    completion_tokens: u32,
    total_tokens: u32,
}
