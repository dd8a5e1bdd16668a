//! Anthropic provider implementation
//!
//! Integration with the Claude messages API. System messages travel in the
//! top-level `system` field and tool traffic as `tool_use`/`tool_result`
//! content blocks.

use async_trait::async_trait;
use parley_core::{Error, Model, Provider, ProviderRequest, Response};
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;

use crate::anthropic::{
    config::AnthropicConfig, converter::AnthropicConverter, parser::AnthropicParser,
};
use crate::http::{HttpClient, ReqwestClient};
use crate::traits::{RequestConverter, ResponseParser};

/// Legacy model families without tool use
const LEGACY_PREFIXES: &[&str] = &["claude-1", "claude-2", "claude-instant"];

/// Whether a Claude model accepts tool definitions
///
/// Every Claude model from the 3 family on does.
pub fn supports_tool_calling(model: &str) -> bool {
    let model = model.to_ascii_lowercase();
    model.starts_with("claude") && !LEGACY_PREFIXES.iter().any(|p| model.starts_with(p))
}

/// Anthropic Claude provider
#[derive(Clone)]
pub struct Anthropic {
    config: AnthropicConfig,
    client: Arc<dyn HttpClient>,
    converter: AnthropicConverter,
    parser: AnthropicParser,
}

impl Anthropic {
    /// Create a new Anthropic provider with the given configuration and client
    pub fn new(config: AnthropicConfig, client: Arc<dyn HttpClient>) -> Self {
        Self {
            config,
            client,
            converter: AnthropicConverter,
            parser: AnthropicParser,
        }
    }

    /// Create a new Anthropic provider with just an API key
    pub fn with_api_key(api_key: impl Into<String>) -> Result<Self, Error> {
        let client = Arc::new(ReqwestClient::new(Duration::from_secs(
            parley_core::config::DEFAULT_TIMEOUT_SECS,
        ))?);
        Ok(Self::new(AnthropicConfig::new(api_key), client))
    }
}

#[async_trait]
impl Provider for Anthropic {
    fn name(&self) -> &str {
        "anthropic"
    }

    async fn request(&self, request: &ProviderRequest) -> Result<Response, Error> {
        debug!(
            provider = "anthropic",
            model = %request.model(),
            messages = request.messages.len(),
            "Dispatching messages request"
        );

        let body = self.converter.convert_request(request).await?;
        let headers = self.config.headers()?;
        let response_value = self
            .client
            .post("anthropic", &self.config.messages_url(), headers, body)
            .await?;

        self.parser.parse_response(response_value).await
    }

    fn supports_tool_calling(&self, model: &Model) -> bool {
        supports_tool_calling(model.as_str())
    }
}
