//! Conversation validation
//!
//! Every message sequence that reaches a provider passes through these
//! checks first, so adapters can assume well-formed input.

use crate::error::{Error, Result};
use crate::types::message::{Message, Role};
use std::collections::HashSet;

/// Check the invariants of a single message
///
/// `index` is only used to locate the failure in the error text.
pub fn validate_message(index: usize, message: &Message) -> Result<()> {
    let fail = |reason: &str| Err(Error::invalid_history(format!("message {index}: {reason}")));

    match message.role {
        Role::System | Role::User if message.content.trim().is_empty() => {
            return fail(&format!("{} message content is required", message.role));
        }
        Role::Assistant if message.content.is_empty() && message.tool_calls.is_empty() => {
            return fail("assistant message needs content or tool calls");
        }
        Role::Tool if message.tool_call_id().map_or(true, str::is_empty) => {
            return fail("tool message requires a tool_call_id");
        }
        _ => {}
    }

    if message.role != Role::Assistant && message.has_tool_calls() {
        return fail(&format!("tool calls are not allowed on {} messages", message.role));
    }
    if message.role != Role::Tool && message.tool_call_id().is_some() {
        return fail(&format!("tool_call_id is not allowed on {} messages", message.role));
    }

    let mut ids = HashSet::new();
    for call in &message.tool_calls {
        if call.id.is_empty() {
            return fail("tool call id must not be empty");
        }
        if call.name.is_empty() {
            return fail(&format!("tool call '{}' has no name", call.id));
        }
        if !ids.insert(call.id.as_str()) {
            return fail(&format!("duplicate tool call id '{}'", call.id));
        }
    }
    Ok(())
}

/// Validate `messages` as a continuation of `prior`
///
/// `prior` is trusted; it only contributes the tool-call ids that tool
/// messages in `messages` may answer. Indices in errors refer to
/// `messages`.
pub fn validate_sequence(prior: &[Message], messages: &[Message]) -> Result<()> {
    let mut known: HashSet<&str> = prior
        .iter()
        .flat_map(|m| m.tool_calls.iter().map(|c| c.id.as_str()))
        .collect();

    for (index, message) in messages.iter().enumerate() {
        validate_message(index, message)?;

        if let Some(call_id) = message.tool_call_id() {
            if !known.contains(call_id) {
                return Err(Error::invalid_history(format!(
                    "message {index}: tool result references unknown tool call '{call_id}'"
                )));
            }
        }
        known.extend(message.tool_calls.iter().map(|c| c.id.as_str()));
    }
    Ok(())
}

/// Validate the new messages of a chat call
///
/// The input must be non-empty.
pub fn validate_chat_input(prior: &[Message], messages: &[Message]) -> Result<()> {
    if messages.is_empty() {
        return Err(Error::invalid_history("at least one message is required"));
    }
    validate_sequence(prior, messages)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::tool::ToolCall;
    use serde_json::json;

    fn call(id: &str) -> ToolCall {
        ToolCall::new(id, "search", json!({}))
    }

    fn history_error(result: Result<()>) -> String {
        match result {
            Err(Error::InvalidHistory(msg)) => msg,
            other => panic!("Expected InvalidHistory, got {other:?}"),
        }
    }

    #[test]
    fn test_valid_conversation() {
        let messages = vec![
            Message::system("be brief"),
            Message::user("weather?"),
            Message::assistant_with_tool_calls("", vec![call("c1"), call("c2")]),
            Message::tool("sunny", "c1"),
            Message::tool("warm", "c2"),
            Message::assistant("Sunny and warm."),
        ];
        assert!(validate_sequence(&[], &messages).is_ok());
    }

    #[test]
    fn test_empty_content_rejected() {
        let msg = history_error(validate_sequence(&[], &[Message::user("  ")]));
        assert_eq!(msg, "message 0: user message content is required");

        let msg = history_error(validate_sequence(
            &[],
            &[Message::user("hi"), Message::system("")],
        ));
        assert!(msg.starts_with("message 1:"));

        let msg = history_error(validate_sequence(&[], &[Message::assistant("")]));
        assert!(msg.contains("content or tool calls"));
    }

    #[test]
    fn test_tool_calls_only_on_assistant() {
        let mut user = Message::user("hi");
        user.tool_calls.push(call("c1"));
        let msg = history_error(validate_sequence(&[], &[user]));
        assert!(msg.contains("not allowed on user"));
    }

    #[test]
    fn test_tool_call_id_placement() {
        let mut user = Message::user("hi");
        user.metadata.tool_call_id = Some("c1".into());
        assert!(history_error(validate_sequence(&[], &[user])).contains("tool_call_id"));

        let mut tool = Message::tool("out", "c1");
        tool.metadata.tool_call_id = None;
        assert!(history_error(validate_sequence(&[], &[tool])).contains("requires a tool_call_id"));
    }

    #[test]
    fn test_unknown_tool_call_reference() {
        let msg = history_error(validate_sequence(
            &[],
            &[Message::user("hi"), Message::tool("out", "missing")],
        ));
        assert_eq!(
            msg,
            "message 1: tool result references unknown tool call 'missing'"
        );
    }

    #[test]
    fn test_tool_result_must_follow_call() {
        let messages = vec![
            Message::tool("early", "c1"),
            Message::assistant_with_tool_calls("", vec![call("c1")]),
        ];
        assert!(validate_sequence(&[], &messages).is_err());
    }

    #[test]
    fn test_prior_history_supplies_ids() {
        let prior = vec![
            Message::user("weather?"),
            Message::assistant_with_tool_calls("", vec![call("c1")]),
        ];
        let next = vec![Message::tool("sunny", "c1")];
        assert!(validate_sequence(&prior, &next).is_ok());
        assert!(validate_sequence(&[], &next).is_err());
    }

    #[test]
    fn test_duplicate_ids_within_message() {
        let msg = Message::assistant_with_tool_calls("", vec![call("c1"), call("c1")]);
        assert!(history_error(validate_sequence(&[], &[msg])).contains("duplicate tool call id"));
    }

    #[test]
    fn test_chat_input_must_not_be_empty() {
        let msg = history_error(validate_chat_input(&[], &[]));
        assert_eq!(msg, "at least one message is required");
        assert!(validate_chat_input(&[], &[Message::user("hi")]).is_ok());
    }
}
