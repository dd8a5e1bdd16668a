//! Common utilities for provider implementations

use parley_core::Error;
use serde_json::{json, Value};

/// Decode tool-call arguments as sent by a provider
///
/// Providers send arguments either as a JSON-encoded string or as an
/// object. An empty string or `null` means "no arguments" and becomes `{}`.
pub fn parse_tool_arguments(provider: &str, tool: &str, raw: &Value) -> Result<Value, Error> {
    match raw {
        Value::Null => Ok(json!({})),
        Value::String(s) if s.trim().is_empty() => Ok(json!({})),
        Value::String(s) => serde_json::from_str(s).map_err(|e| Error::ResponseParse {
            provider: provider.to_string(),
            message: format!("invalid arguments for tool call '{tool}': {e}"),
            source: Some(Box::new(e)),
        }),
        other => Ok(other.clone()),
    }
}

/// Case-insensitive substring match against a list of patterns
pub fn matches_any(model: &str, patterns: &[&str]) -> bool {
    let model = model.to_ascii_lowercase();
    patterns.iter().any(|p| model.contains(p))
}

/// Join a base URL and a path without doubling slashes
pub fn join_url(base: &str, path: &str) -> String {
    format!(
        "{}/{}",
        base.trim_end_matches('/'),
        path.trim_start_matches('/')
    )
}
