//! OpenAI provider implementation
//!
//! Integration with the chat-completions API. The same type backs the GROQ
//! and OpenRouter adapters, which differ only in name, defaults and
//! capability table.

use crate::http::{HttpClient, ReqwestClient};
use crate::openai::{config::OpenAIConfig, converter::OpenAIConverter, parser::OpenAIParser};
use crate::traits::{RequestConverter, ResponseParser};
use crate::utils::matches_any;
use async_trait::async_trait;
use parley_core::{Error, Model, Provider, ProviderRequest, Response};
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;

/// Model families that cannot take tool definitions
const NO_TOOL_PATTERNS: &[&str] = &[
    "instruct",
    "text-",
    "davinci",
    "babbage",
    "o1-mini",
    "o1-preview",
];

/// Whether an OpenAI model accepts tool definitions
///
/// Chat models do; legacy completion models and the early o1 previews do
/// not.
pub fn supports_tool_calling(model: &str) -> bool {
    !matches_any(model, NO_TOOL_PATTERNS)
}

/// OpenAI provider for chat completions
///
/// # Example
///
/// ```no_run
/// use parley_providers::openai::{OpenAI, OpenAIConfig};
/// use parley_providers::http::ReqwestClient;
/// use std::sync::Arc;
/// use std::time::Duration;
///
/// let config = OpenAIConfig::new("your-api-key").with_organization("org-id");
/// let client = Arc::new(ReqwestClient::new(Duration::from_secs(60)).unwrap());
/// let provider = OpenAI::new(config, client);
/// ```
#[derive(Clone)]
pub struct OpenAI {
    name: &'static str,
    client: Arc<dyn HttpClient>,
    config: OpenAIConfig,
    converter: OpenAIConverter,
    parser: OpenAIParser,
    capabilities: fn(&str) -> bool,
}

impl OpenAI {
    /// Create a new OpenAI provider with the given configuration and client
    pub fn new(config: OpenAIConfig, client: Arc<dyn HttpClient>) -> Self {
        Self::compatible("openai", config, client, supports_tool_calling)
    }

    /// Create a provider for an OpenAI-compatible backend
    pub fn compatible(
        name: &'static str,
        config: OpenAIConfig,
        client: Arc<dyn HttpClient>,
        capabilities: fn(&str) -> bool,
    ) -> Self {
        Self {
            name,
            client,
            config,
            converter: OpenAIConverter,
            parser: OpenAIParser::new(name),
            capabilities,
        }
    }

    /// Create a new OpenAI provider with just an API key
    pub fn with_api_key(api_key: impl Into<String>) -> Result<Self, Error> {
        let client = Arc::new(ReqwestClient::new(Duration::from_secs(
            parley_core::config::DEFAULT_TIMEOUT_SECS,
        ))?);
        Ok(Self::new(OpenAIConfig::new(api_key), client))
    }

    /// The active configuration
    pub fn config(&self) -> &OpenAIConfig {
        &self.config
    }
}

#[async_trait]
impl Provider for OpenAI {
    fn name(&self) -> &str {
        self.name
    }

    async fn request(&self, request: &ProviderRequest) -> Result<Response, Error> {
        debug!(
            provider = self.name,
            model = %request.model(),
            messages = request.messages.len(),
            tools = request.tools.as_ref().map_or(0, |t| t.len()),
            "Dispatching chat completion"
        );

        let body = self.converter.convert_request(request).await?;
        let headers = self.config.headers()?;
        let response = self
            .client
            .post(self.name, &self.config.chat_url(), headers, body)
            .await?;

        self.parser.parse_response(response).await
    }

    fn supports_tool_calling(&self, model: &Model) -> bool {
        (self.capabilities)(model.as_str())
    }
}
