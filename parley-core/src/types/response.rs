//! Response types for LLM interactions

use crate::types::message::Message;
use crate::types::tool::ToolCall;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Metadata about a response
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ResponseMetadata {
    /// Model used for generation
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
    /// Unique ID for this response
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Usage statistics
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub usage: Option<Usage>,
    /// Custom metadata
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub custom: BTreeMap<String, String>,
}

/// Token usage statistics
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Usage {
    /// Tokens in the prompt
    pub prompt_tokens: u32,
    /// Tokens in the completion
    pub completion_tokens: u32,
    /// Total tokens used
    pub total_tokens: u32,
}

impl Usage {
    /// Create usage stats, deriving the total
    pub fn new(prompt_tokens: u32, completion_tokens: u32) -> Self {
        Self {
            prompt_tokens,
            completion_tokens,
            total_tokens: prompt_tokens.saturating_add(completion_tokens),
        }
    }
}

/// Why the model stopped generating
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FinishReason {
    /// Natural end of message or a stop sequence
    Stop,
    /// Hit the max_tokens limit
    Length,
    /// Model decided to call a tool
    ToolCalls,
    /// Content was filtered
    ContentFilter,
    /// Provider-specific reason
    Other(String),
}

/// A complete response from an LLM
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Response {
    /// The generated content
    #[serde(default)]
    pub content: String,
    /// Tool calls requested by the model
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tool_calls: Vec<ToolCall>,
    /// Why generation stopped
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub finish_reason: Option<FinishReason>,
    /// Response metadata
    #[serde(default)]
    pub metadata: ResponseMetadata,
}

impl Response {
    /// Create a simple text response
    pub fn text(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            finish_reason: Some(FinishReason::Stop),
            ..Self::default()
        }
    }

    /// Create a response that requests tool invocations
    pub fn with_tool_calls(content: impl Into<String>, tool_calls: Vec<ToolCall>) -> Self {
        Self {
            content: content.into(),
            tool_calls,
            finish_reason: Some(FinishReason::ToolCalls),
            metadata: ResponseMetadata::default(),
        }
    }

    /// Check if the response contains tool calls
    pub fn has_tool_calls(&self) -> bool {
        !self.tool_calls.is_empty()
    }

    /// Whether the turn is finished
    ///
    /// `false` means the model is waiting for tool results.
    pub fn is_complete(&self) -> bool {
        !self.has_tool_calls()
    }

    /// Messages this response contributes to a conversation history
    ///
    /// At most one assistant message: with the tool calls when there are
    /// any, otherwise with the text when it is non-empty.
    pub fn messages(&self) -> Vec<Message> {
        if self.has_tool_calls() {
            vec![Message::assistant_with_tool_calls(
                self.content.clone(),
                self.tool_calls.clone(),
            )]
        } else if !self.content.is_empty() {
            vec![Message::assistant(self.content.clone())]
        } else {
            Vec::new()
        }
    }
}

impl fmt::Display for Response {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.content)?;
        if !self.tool_calls.is_empty() {
            write!(f, " [+{} tool calls]", self.tool_calls.len())?;
        }
        Ok(())
    }
}
