//! Anthropic response parsing

use crate::anthropic::converter::ContentBlock;
use crate::error::{self, error_message};
use crate::traits::ResponseParser;
use async_trait::async_trait;
use parley_core::{Error, FinishReason, Response, ResponseMetadata, ToolCall, Usage};
use serde::Deserialize;
use serde_json::Value;

// Anthropic API response types
#[derive(Debug, Deserialize)]
pub struct AnthropicResponse {
    pub id: Option<String>,
    pub model: Option<String>,
    #[serde(default)]
    pub content: Vec<ContentBlock>,
    pub stop_reason: Option<String>,
    pub stop_sequence: Option<String>,
    pub usage: Option<AnthropicUsage>,
}

#[derive(Debug, Deserialize)]
pub struct AnthropicUsage {
    pub input_tokens: u32,
    pub output_tokens: u32,
}

pub fn parse_response(response: AnthropicResponse) -> Response {
    let mut texts = Vec::new();
    let mut tool_calls = Vec::new();
    for block in response.content {
        match block {
            ContentBlock::Text { text } => texts.push(text),
            ContentBlock::ToolUse { id, name, input } => {
                let input = if input.is_null() { serde_json::json!({}) } else { input };
                tool_calls.push(ToolCall::new(id, name, input));
            }
            ContentBlock::ToolResult { .. } | ContentBlock::Unknown => {}
        }
    }

    let mut metadata = ResponseMetadata {
        model: response.model,
        id: response.id,
        usage: response.usage.as_ref().map(parse_usage),
        ..Default::default()
    };
    if let Some(sequence) = response.stop_sequence {
        metadata.custom.insert("stop_sequence".into(), sequence);
    }

    Response {
        content: texts.join("\n"),
        tool_calls,
        finish_reason: response.stop_reason.as_deref().map(parse_stop_reason),
        metadata,
    }
}

/// Map an Anthropic `stop_reason`
pub fn parse_stop_reason(reason: &str) -> FinishReason {
    match reason {
        "end_turn" | "stop_sequence" => FinishReason::Stop,
        "max_tokens" => FinishReason::Length,
        "tool_use" => FinishReason::ToolCalls,
        "refusal" => FinishReason::ContentFilter,
        other => FinishReason::Other(other.to_string()),
    }
}

pub fn parse_usage(usage: &AnthropicUsage) -> Usage {
    Usage::new(usage.input_tokens, usage.output_tokens)
}

/// Parser implementation for Anthropic
#[derive(Debug, Clone, Copy, Default)]
pub struct AnthropicParser;

#[async_trait]
impl ResponseParser for AnthropicParser {
    async fn parse_response(&self, value: Value) -> Result<Response, Error> {
        if value.get("type").and_then(Value::as_str) == Some("error") {
            let message = error_message(&value).unwrap_or_else(|| value.to_string());
            return Err(Error::api("anthropic", message));
        }

        let anthropic_response: AnthropicResponse =
            serde_json::from_value(value).map_err(|e| error::parse_error("anthropic", e))?;
        Ok(parse_response(anthropic_response))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use parley_core::ProviderErrorKind;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[tokio::test]
    async fn test_parse_text_and_tool_use() {
        let value = json!({
            "id": "msg_01",
            "type": "message",
            "role": "assistant",
            "model": "claude-3-5-sonnet-20241022",
            "content": [
                {"type": "thinking", "thinking": "hmm", "signature": "x"},
                {"type": "text", "text": "Let me check."},
                {"type": "tool_use", "id": "toolu_1", "name": "weather", "input": {"city": "Paris"}}
            ],
            "stop_reason": "tool_use",
            "usage": {"input_tokens": 20, "output_tokens": 8}
        });

        let response = AnthropicParser.parse_response(value).await.unwrap();
        assert_eq!(response.content, "Let me check.");
        assert_eq!(
            response.tool_calls,
            vec![ToolCall::new("toolu_1", "weather", json!({"city": "Paris"}))]
        );
        assert_eq!(response.finish_reason, Some(FinishReason::ToolCalls));
        assert_eq!(response.metadata.usage, Some(Usage::new(20, 8)));
        assert_eq!(response.metadata.id.as_deref(), Some("msg_01"));
    }

    #[tokio::test]
    async fn test_parse_stop_sequence() {
        let value = json!({
            "id": "msg_02",
            "model": "claude-3-5-haiku-latest",
            "content": [{"type": "text", "text": "done"}],
            "stop_reason": "stop_sequence",
            "stop_sequence": "###"
        });
        let response = AnthropicParser.parse_response(value).await.unwrap();
        assert_eq!(response.finish_reason, Some(FinishReason::Stop));
        assert_eq!(response.metadata.custom["stop_sequence"], "###");
        assert!(response.is_complete());
    }

    #[tokio::test]
    async fn test_parse_error_payload() {
        let value = json!({
            "type": "error",
            "error": {"type": "overloaded_error", "message": "Overloaded"}
        });
        let error = AnthropicParser.parse_response(value).await.unwrap_err();
        assert_eq!(error.provider_kind(), Some(ProviderErrorKind::Api));
        assert!(error.to_string().contains("Overloaded"));
    }

    #[tokio::test]
    async fn test_parse_malformed() {
        let error = AnthropicParser
            .parse_response(json!({"content": "not a list"}))
            .await
            .unwrap_err();
        assert!(matches!(error, Error::ResponseParse { .. }));
    }

    #[test]
    fn test_stop_reason_mapping() {
        assert_eq!(parse_stop_reason("end_turn"), FinishReason::Stop);
        assert_eq!(parse_stop_reason("max_tokens"), FinishReason::Length);
        assert_eq!(
            parse_stop_reason("pause_turn"),
            FinishReason::Other("pause_turn".into())
        );
    }
}
