//! Ollama provider implementation

use crate::http::{HttpClient, ReqwestClient};
use crate::ollama::{config::OllamaConfig, converter::OllamaConverter, parser::OllamaParser};
use crate::traits::{RequestConverter, ResponseParser};
use crate::utils::matches_any;
use async_trait::async_trait;
use parley_core::{Error, Model, Provider, ProviderRequest, Response};
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;

/// Model families with tool support in Ollama
const TOOL_CAPABLE_FAMILIES: &[&str] = &[
    "llama3.1",
    "llama3.2",
    "llama3.3",
    "qwen2.5",
    "qwen3",
    "mistral",
    "mixtral",
    "command-r",
    "firefunction",
    "hermes3",
    "granite3",
];

/// Whether an Ollama model accepts tool definitions
pub fn supports_tool_calling(model: &str) -> bool {
    matches_any(model, TOOL_CAPABLE_FAMILIES)
}

/// Ollama provider for local models
///
/// # Example
///
/// ```no_run
/// use parley_providers::Ollama;
///
/// let provider = Ollama::local().unwrap();
/// ```
#[derive(Clone)]
pub struct Ollama {
    config: OllamaConfig,
    client: Arc<dyn HttpClient>,
    converter: OllamaConverter,
    parser: OllamaParser,
}

impl Ollama {
    /// Create a new Ollama provider
    pub fn new(config: OllamaConfig, client: Arc<dyn HttpClient>) -> Self {
        Self {
            config,
            client,
            converter: OllamaConverter,
            parser: OllamaParser,
        }
    }

    /// Provider for a server on the default local address
    pub fn local() -> Result<Self, Error> {
        let client = Arc::new(ReqwestClient::new(Duration::from_secs(
            parley_core::config::DEFAULT_TIMEOUT_SECS,
        ))?);
        Ok(Self::new(OllamaConfig::default(), client))
    }
}

#[async_trait]
impl Provider for Ollama {
    fn name(&self) -> &str {
        "ollama"
    }

    async fn request(&self, request: &ProviderRequest) -> Result<Response, Error> {
        debug!(
            provider = "ollama",
            model = %request.model(),
            messages = request.messages.len(),
            "Dispatching chat request"
        );

        let body = self.converter.convert_request(request).await?;
        let headers = self.config.headers()?;
        let response = self
            .client
            .post("ollama", &self.config.chat_url(), headers, body)
            .await?;

        self.parser.parse_response(response).await
    }

    fn supports_tool_calling(&self, model: &Model) -> bool {
        supports_tool_calling(model.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_capability_table() {
        assert!(supports_tool_calling("llama3.1:8b"));
        assert!(supports_tool_calling("qwen2.5-coder:7b"));
        assert!(supports_tool_calling("Mistral-Nemo"));
        assert!(!supports_tool_calling("llama2"));
        assert!(!supports_tool_calling("gemma:2b"));
    }

    #[test]
    fn test_default_url() {
        assert_eq!(
            OllamaConfig::default().chat_url(),
            "http://localhost:11434/api/chat"
        );
    }
}
