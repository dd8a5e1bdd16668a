//! Provider construction from a [`ClientConfig`]
//!
//! The adapter is chosen by [`ClientConfig::provider`]. Callers that need a
//! custom transport (tests, proxies) inject it with
//! [`ProviderBuilder::with_client`].
//!
//! # Examples
//!
//! ```no_run
//! use parley_core::{ClientConfig, ProviderKind};
//! use parley_providers::builder::ProviderBuilder;
//!
//! let config = ClientConfig::builder(ProviderKind::Groq)
//!     .api_key("gsk-...")
//!     .build()
//!     .unwrap();
//! let provider = ProviderBuilder::new(config).build().unwrap();
//! assert_eq!(provider.name(), "groq");
//! ```

use crate::anthropic::{Anthropic, AnthropicConfig};
use crate::constants::{GROQ_DEFAULT_BASE_URL, OPENAI_DEFAULT_BASE_URL, OPENROUTER_DEFAULT_BASE_URL};
use crate::groq::Groq;
use crate::http::{HttpClient, ReqwestClient};
use crate::ollama::{Ollama, OllamaConfig};
use crate::openai::{OpenAI, OpenAIConfig};
use crate::openrouter::OpenRouter;
use parley_core::{ClientConfig, Error, Provider, ProviderKind};
use std::sync::Arc;
use tracing::debug;

/// Builds the adapter selected by a client configuration
pub struct ProviderBuilder {
    config: ClientConfig,
    client: Option<Arc<dyn HttpClient>>,
}

impl ProviderBuilder {
    /// Start from a configuration
    pub fn new(config: ClientConfig) -> Self {
        Self {
            config,
            client: None,
        }
    }

    /// Set a custom HTTP client
    ///
    /// Without one, a [`ReqwestClient`] with the configured timeout is
    /// created.
    pub fn with_client(mut self, client: Arc<dyn HttpClient>) -> Self {
        self.client = Some(client);
        self
    }

    /// Build the provider
    pub fn build(self) -> Result<Arc<dyn Provider>, Error> {
        self.config.validate()?;
        let client = match self.client {
            Some(client) => client,
            None => Arc::new(ReqwestClient::new(self.config.timeout())?),
        };

        let kind = self.config.provider();
        debug!(provider = %kind, base_url = ?self.config.base_url(), "Building provider");

        let provider: Arc<dyn Provider> = match kind {
            ProviderKind::OpenAI => Arc::new(OpenAI::new(
                OpenAIConfig::from_client_config(&self.config, OPENAI_DEFAULT_BASE_URL)?,
                client,
            )),
            ProviderKind::Groq => Arc::new(Groq::new(
                OpenAIConfig::from_client_config(&self.config, GROQ_DEFAULT_BASE_URL)?,
                client,
            )),
            ProviderKind::OpenRouter => Arc::new(OpenRouter::new(
                OpenAIConfig::from_client_config(&self.config, OPENROUTER_DEFAULT_BASE_URL)?,
                client,
            )),
            ProviderKind::Anthropic => Arc::new(Anthropic::new(
                AnthropicConfig::from_client_config(&self.config)?,
                client,
            )),
            ProviderKind::Ollama => Arc::new(Ollama::new(
                OllamaConfig::from_client_config(&self.config),
                client,
            )),
        };
        Ok(provider)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use parley_core::Model;

    fn config(kind: ProviderKind) -> ClientConfig {
        let builder = ClientConfig::builder(kind);
        let builder = if kind.requires_api_key() {
            builder.api_key("test-key")
        } else {
            builder
        };
        builder.build().unwrap()
    }

    #[test]
    fn test_builds_every_kind() {
        for kind in ProviderKind::ALL {
            let provider = ProviderBuilder::new(config(kind)).build().unwrap();
            assert_eq!(provider.name(), kind.name());
        }
    }

    #[test]
    fn test_capabilities_follow_kind() {
        let model = Model::new("llama-3.3-70b-versatile");
        let groq = ProviderBuilder::new(config(ProviderKind::Groq)).build().unwrap();
        let ollama = ProviderBuilder::new(config(ProviderKind::Ollama)).build().unwrap();
        assert!(groq.supports_tool_calling(&model));
        assert!(!ollama.supports_tool_calling(&model));
    }
}
