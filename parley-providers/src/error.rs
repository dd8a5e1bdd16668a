//! Mapping of transport failures into the core error taxonomy

use parley_core::Error;
use reqwest::header::{HeaderMap, RETRY_AFTER};
use reqwest::StatusCode;
use serde_json::Value;
use std::time::Duration;

/// Convert a reqwest failure (connect, TLS, timeout, body read) to a core error
pub fn network_error(provider: &str, error: reqwest::Error) -> Error {
    let message = if error.is_timeout() {
        format!("request timed out: {error}")
    } else {
        error.to_string()
    };
    Error::transport(provider, message, Some(Box::new(error)))
}

/// Convert a non-success HTTP reply to a core error
///
/// The message is taken from the JSON error payload when there is one,
/// otherwise from the raw body.
pub fn status_error(provider: &str, status: StatusCode, headers: &HeaderMap, body: &str) -> Error {
    let message = serde_json::from_str::<Value>(body)
        .ok()
        .and_then(|v| error_message(&v))
        .or_else(|| {
            let trimmed = body.trim();
            (!trimmed.is_empty()).then(|| trimmed.to_string())
        })
        .unwrap_or_else(|| {
            status
                .canonical_reason()
                .unwrap_or("request failed")
                .to_string()
        });
    Error::from_status(provider, status.as_u16(), message, retry_after(headers))
}

/// Convert undecodable reply JSON to a core error
pub fn parse_error(provider: &str, error: serde_json::Error) -> Error {
    Error::ResponseParse {
        provider: provider.to_string(),
        message: error.to_string(),
        source: Some(Box::new(error)),
    }
}

/// Convert a failure to encode the outbound body to a core error
///
/// Nothing was sent, so this is reported as a transport-side failure.
pub fn encode_error(provider: &str, error: serde_json::Error) -> Error {
    Error::transport(
        provider,
        format!("failed to encode request: {error}"),
        Some(Box::new(error)),
    )
}

/// Extract the human-readable message from a provider error payload
///
/// Understands `{"error": {"message": ..}}` (OpenAI, Anthropic, GROQ,
/// OpenRouter), `{"error": ".."}` (Ollama) and a top-level `message`.
pub fn error_message(value: &Value) -> Option<String> {
    match value.get("error") {
        Some(Value::String(s)) => Some(s.clone()),
        Some(Value::Object(obj)) => obj
            .get("message")
            .and_then(Value::as_str)
            .map(str::to_string),
        _ => value
            .get("message")
            .and_then(Value::as_str)
            .map(str::to_string),
    }
}

fn retry_after(headers: &HeaderMap) -> Option<Duration> {
    headers
        .get(RETRY_AFTER)?
        .to_str()
        .ok()?
        .trim()
        .parse::<f64>()
        .ok()
        .and_then(|secs| Duration::try_from_secs_f64(secs).ok())
}
