//! OpenRouter provider
//!
//! OpenRouter proxies many vendors behind the chat-completions format.
//! Model ids carry a vendor prefix (`anthropic/claude-3.5-sonnet`), which
//! is what the capability table keys on. Attribution headers
//! (`HTTP-Referer`, `X-Title`) are passed through the configured extra
//! headers.

use crate::constants::OPENROUTER_DEFAULT_BASE_URL;
use crate::http::HttpClient;
use crate::openai::{OpenAI, OpenAIConfig};
use async_trait::async_trait;
use parley_core::{Error, Model, Provider, ProviderRequest, Response};
use std::sync::Arc;

/// Vendor prefixes whose models are routed with tool support
const TOOL_CAPABLE_VENDORS: &[&str] = &[
    "openai/",
    "anthropic/",
    "google/",
    "mistralai/",
    "meta-llama/llama-3.1",
    "meta-llama/llama-3.3",
    "meta-llama/llama-4",
    "qwen/",
    "deepseek/",
    "x-ai/",
    "cohere/",
    "moonshotai/",
];

/// Whether an OpenRouter model accepts tool definitions
pub fn supports_tool_calling(model: &str) -> bool {
    let model = model.to_ascii_lowercase();
    TOOL_CAPABLE_VENDORS
        .iter()
        .any(|prefix| model.starts_with(prefix))
}

/// OpenRouter provider
#[derive(Clone)]
pub struct OpenRouter {
    inner: OpenAI,
}

impl OpenRouter {
    /// Create an OpenRouter provider
    pub fn new(config: OpenAIConfig, client: Arc<dyn HttpClient>) -> Self {
        Self {
            inner: OpenAI::compatible("openrouter", config, client, supports_tool_calling),
        }
    }

    /// Configuration pointing at the public OpenRouter endpoint
    pub fn default_config(api_key: impl Into<String>) -> OpenAIConfig {
        OpenAIConfig::new(api_key).with_base_url(OPENROUTER_DEFAULT_BASE_URL)
    }
}

#[async_trait]
impl Provider for OpenRouter {
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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_capability_table() {
        assert!(supports_tool_calling("openai/gpt-4o"));
        assert!(supports_tool_calling("Anthropic/claude-3.5-sonnet"));
        assert!(supports_tool_calling("meta-llama/llama-3.3-70b-instruct"));
        assert!(!supports_tool_calling("meta-llama/llama-2-70b-chat"));
        assert!(!supports_tool_calling("gpt-4o"));
    }

    #[test]
    fn test_default_config() {
        let config = OpenRouter::default_config("sk-or").with_header("X-Title", "parley");
        assert_eq!(config.chat_url(), "https://openrouter.ai/api/v1/chat/completions");
        assert_eq!(config.extra_headers["X-Title"], "parley");
    }
}
