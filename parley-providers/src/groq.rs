//! GROQ provider
//!
//! GROQ serves the chat-completions format under `/openai/v1`, so requests
//! go through the OpenAI adapter with GROQ's defaults and capability table.

use crate::constants::GROQ_DEFAULT_BASE_URL;
use crate::http::HttpClient;
use crate::openai::{OpenAI, OpenAIConfig};
use crate::utils::matches_any;
use async_trait::async_trait;
use parley_core::{Error, Model, Provider, ProviderRequest, Response};
use std::sync::Arc;

/// Models known to handle tool calling on GROQ (case-insensitive substrings)
const TOOL_CAPABLE_PATTERNS: &[&str] = &[
    "kimi-k2-instruct",
    "llama-4-maverick",
    "deepseek-r1-distill-llama-70b",
    "llama-3.3-70b-versatile",
    "gemma2",
];

/// Whether a GROQ model accepts tool definitions
pub fn supports_tool_calling(model: &str) -> bool {
    matches_any(model, TOOL_CAPABLE_PATTERNS)
}

/// GROQ provider
#[derive(Clone)]
pub struct Groq {
    inner: OpenAI,
}

impl Groq {
    /// Create a GROQ provider
    pub fn new(config: OpenAIConfig, client: Arc<dyn HttpClient>) -> Self {
        Self {
            inner: OpenAI::compatible("groq", config, client, supports_tool_calling),
        }
    }

    /// Configuration pointing at the public GROQ endpoint
    pub fn default_config(api_key: impl Into<String>) -> OpenAIConfig {
        OpenAIConfig::new(api_key).with_base_url(GROQ_DEFAULT_BASE_URL)
    }
}

#[async_trait]
impl Provider for Groq {
    fn name(&self) -> &str {
        self.inner.name()
    }

    async fn request(&self, request: &ProviderRequest) -> Result<Response, Error> {
        self.inner.request(request).await
    }

    fn supports_tool_calling(&self, model: &Model) -> bool {
        self.inner.supports_tool_calling(model)
    }
}
