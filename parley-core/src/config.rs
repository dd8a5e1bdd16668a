//! Client configuration
//!
//! A [`ClientConfig`] names the provider to talk to and carries the
//! connection parameters. It is validated once, when built, and never
//! changes afterwards.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;
use std::time::Duration;
use url::Url;

/// Default HTTP timeout, in seconds
pub const DEFAULT_TIMEOUT_SECS: u64 = 300;

/// The supported provider backends
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProviderKind {
    /// OpenAI chat completions
    OpenAI,
    /// Anthropic messages API
    Anthropic,
    /// GROQ (OpenAI-compatible)
    Groq,
    /// OpenRouter (OpenAI-compatible)
    OpenRouter,
    /// Local Ollama server
    Ollama,
}

impl ProviderKind {
    /// All provider kinds
    pub const ALL: [Self; 5] = [
        Self::OpenAI,
        Self::Anthropic,
        Self::Groq,
        Self::OpenRouter,
        Self::Ollama,
    ];

    /// Lowercase provider name
    pub fn name(&self) -> &'static str {
        match self {
            Self::OpenAI => "openai",
            Self::Anthropic => "anthropic",
            Self::Groq => "groq",
            Self::OpenRouter => "openrouter",
            Self::Ollama => "ollama",
        }
    }

    /// Whether calls need an API key
    pub fn requires_api_key(&self) -> bool {
        !matches!(self, Self::Ollama)
    }

    /// Prefix of the environment variables read by [`ClientConfig::from_env`]
    pub fn env_prefix(&self) -> &'static str {
        match self {
            Self::OpenAI => "OPENAI",
            Self::Anthropic => "ANTHROPIC",
            Self::Groq => "GROQ",
            Self::OpenRouter => "OPENROUTER",
            Self::Ollama => "OLLAMA",
        }
    }
}

impl fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ProviderKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| Error::configuration(format!("unknown provider '{s}'")))
    }
}

/// Validated connection parameters for one client
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawClientConfig")]
pub struct ClientConfig {
    provider: ProviderKind,
    #[serde(skip_serializing)]
    api_key: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    base_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    api_version: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    organization: Option<String>,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    extra_headers: BTreeMap<String, String>,
    timeout_secs: u64,
}

#[derive(Deserialize)]
struct RawClientConfig {
    provider: ProviderKind,
    #[serde(default)]
    api_key: Option<String>,
    #[serde(default)]
    base_url: Option<String>,
    #[serde(default)]
    api_version: Option<String>,
    #[serde(default)]
    organization: Option<String>,
    #[serde(default)]
    extra_headers: BTreeMap<String, String>,
    #[serde(default = "default_timeout_secs")]
    timeout_secs: u64,
}

fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

impl TryFrom<RawClientConfig> for ClientConfig {
    type Error = Error;

    fn try_from(raw: RawClientConfig) -> Result<Self> {
        let config = Self {
            provider: raw.provider,
            api_key: raw.api_key,
            base_url: raw.base_url,
            api_version: raw.api_version,
            organization: raw.organization,
            extra_headers: raw.extra_headers,
            timeout_secs: raw.timeout_secs,
        };
        config.validate()?;
        Ok(config)
    }
}

impl fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientConfig")
            .field("provider", &self.provider)
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("base_url", &self.base_url)
            .field("api_version", &self.api_version)
            .field("organization", &self.organization)
            .field("extra_headers", &self.extra_headers)
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

impl ClientConfig {
    /// Start building a configuration for a provider
    pub fn builder(provider: ProviderKind) -> ClientConfigBuilder {
        ClientConfigBuilder {
            config: Self {
                provider,
                api_key: None,
                base_url: None,
                api_version: None,
                organization: None,
                extra_headers: BTreeMap::new(),
                timeout_secs: DEFAULT_TIMEOUT_SECS,
            },
        }
    }

    /// Build a configuration from `<PROVIDER>_API_KEY` and `<PROVIDER>_BASE_URL`
    ///
    /// For example `GROQ_API_KEY` for [`ProviderKind::Groq`].
    pub fn from_env(provider: ProviderKind) -> Result<Self> {
        Self::from_lookup(provider, |name| std::env::var(name).ok())
    }

    fn from_lookup(provider: ProviderKind, lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let prefix = provider.env_prefix();
        let mut builder = Self::builder(provider);
        if let Some(key) = lookup(&format!("{prefix}_API_KEY")).filter(|k| !k.is_empty()) {
            builder = builder.api_key(key);
        }
        if let Some(url) = lookup(&format!("{prefix}_BASE_URL")).filter(|u| !u.is_empty()) {
            builder = builder.base_url(url);
        }
        builder.build()
    }

    /// Check every construction invariant
    pub fn validate(&self) -> Result<()> {
        if self.provider.requires_api_key()
            && self.api_key.as_deref().map_or(true, |k| k.trim().is_empty())
        {
            return Err(Error::configuration(format!(
                "{} API key not provided. Set {}_API_KEY or pass an api_key",
                self.provider,
                self.provider.env_prefix()
            )));
        }

        if let Some(base_url) = &self.base_url {
            let url = Url::parse(base_url)
                .map_err(|e| Error::configuration(format!("invalid base URL '{base_url}': {e}")))?;
            if !matches!(url.scheme(), "http" | "https") || !url.has_host() {
                return Err(Error::configuration(format!(
                    "base URL '{base_url}' must be an absolute http(s) URL"
                )));
            }
        }

        if self.api_version.as_deref().is_some_and(|v| v.trim().is_empty()) {
            return Err(Error::configuration("api_version must not be blank"));
        }

        if self.timeout_secs == 0 {
            return Err(Error::configuration("timeout must be greater than zero"));
        }
        Ok(())
    }

    /// The provider backend
    pub fn provider(&self) -> ProviderKind {
        self.provider
    }

    /// The API key, if any
    pub fn api_key(&self) -> Option<&str> {
        self.api_key.as_deref()
    }

    /// Base URL override
    pub fn base_url(&self) -> Option<&str> {
        self.base_url.as_deref()
    }

    /// API version override
    pub fn api_version(&self) -> Option<&str> {
        self.api_version.as_deref()
    }

    /// Organization identifier (OpenAI)
    pub fn organization(&self) -> Option<&str> {
        self.organization.as_deref()
    }

    /// Headers added to every request
    pub fn extra_headers(&self) -> &BTreeMap<String, String> {
        &self.extra_headers
    }

    /// HTTP timeout
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

/// Builder for [`ClientConfig`]
#[derive(Debug, Clone)]
pub struct ClientConfigBuilder {
    config: ClientConfig,
}

impl ClientConfigBuilder {
    /// Set the API key
    pub fn api_key(mut self, key: impl Into<String>) -> Self {
        self.config.api_key = Some(key.into());
        self
    }

    /// Set the base URL
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.config.base_url = Some(url.into());
        self
    }

    /// Set the API version
    pub fn api_version(mut self, version: impl Into<String>) -> Self {
        self.config.api_version = Some(version.into());
        self
    }

    /// Set the organization
    pub fn organization(mut self, org: impl Into<String>) -> Self {
        self.config.organization = Some(org.into());
        self
    }

    /// Add a header sent with every request
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.config.extra_headers.insert(name.into(), value.into());
        self
    }

    /// Set the HTTP timeout, rounded down to whole seconds
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.config.timeout_secs = timeout.as_secs();
        self
    }

    /// Validate and build the configuration
    pub fn build(self) -> Result<ClientConfig> {
        self.config.validate()?;
        Ok(self.config)
    }
}
