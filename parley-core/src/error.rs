//! Error types for the Parley library

use std::error::Error as StdError;
use std::fmt;
use std::time::Duration;
use thiserror::Error;

/// Boxed source error carried by provider failures
pub type BoxError = Box<dyn StdError + Send + Sync>;

/// What went wrong while talking to a provider
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProviderErrorKind {
    /// Connection, DNS, TLS or timeout failure before a reply arrived
    Transport,
    /// The provider rejected the credentials (HTTP 401/403)
    Authentication,
    /// The provider throttled the call (HTTP 429)
    RateLimited,
    /// Any other error status or error payload returned by the provider
    Api,
}

impl fmt::Display for ProviderErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Transport => write!(f, "transport"),
            Self::Authentication => write!(f, "authentication"),
            Self::RateLimited => write!(f, "rate limited"),
            Self::Api => write!(f, "api"),
        }
    }
}

/// The main error type for all Parley operations
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum Error {
    /// Invalid or missing connection parameters
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Malformed message sequence
    #[error("Invalid history: {0}")]
    InvalidHistory(String),

    /// Malformed or duplicate tool descriptors
    #[error("Invalid tools: {0}")]
    InvalidTools(String),

    /// The provider round-trip failed
    #[error("Provider error ({provider}, {kind}): {message}")]
    ProviderCall {
        /// Provider name (e.g., "openai", "anthropic")
        provider: String,
        /// Failure category
        kind: ProviderErrorKind,
        /// Error message
        message: String,
        /// HTTP status, when a reply was received
        status: Option<u16>,
        /// Time to wait before retrying (for rate limits)
        retry_after: Option<Duration>,
        /// Underlying error if available
        #[source]
        source: Option<BoxError>,
    },

    /// The provider reply could not be translated to a canonical response
    #[error("Response parse error ({provider}): {message}")]
    ResponseParse {
        /// Provider name
        provider: String,
        /// Error message
        message: String,
        /// Underlying error if available
        #[source]
        source: Option<BoxError>,
    },
}

/// Result type alias for Parley operations
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Create a configuration error
    pub fn configuration(msg: impl Into<String>) -> Self {
        Self::Configuration(msg.into())
    }

    /// Create an invalid history error
    pub fn invalid_history(msg: impl Into<String>) -> Self {
        Self::InvalidHistory(msg.into())
    }

    /// Create an invalid tools error
    pub fn invalid_tools(msg: impl Into<String>) -> Self {
        Self::InvalidTools(msg.into())
    }

    /// Create a transport failure
    pub fn transport(
        provider: impl Into<String>,
        message: impl Into<String>,
        source: Option<BoxError>,
    ) -> Self {
        Self::ProviderCall {
            provider: provider.into(),
            kind: ProviderErrorKind::Transport,
            message: message.into(),
            status: None,
            retry_after: None,
            source,
        }
    }

    /// Create an error for a non-success status returned by the provider
    ///
    /// The kind is derived from the status: 401/403 are authentication
    /// failures, 429 is a rate limit, everything else is an API error.
    pub fn from_status(
        provider: impl Into<String>,
        status: u16,
        message: impl Into<String>,
        retry_after: Option<Duration>,
    ) -> Self {
        let kind = match status {
            401 | 403 => ProviderErrorKind::Authentication,
            429 => ProviderErrorKind::RateLimited,
            _ => ProviderErrorKind::Api,
        };
        Self::ProviderCall {
            provider: provider.into(),
            kind,
            message: message.into(),
            status: Some(status),
            retry_after,
            source: None,
        }
    }

    /// Create an API error for an error payload without a usable status
    pub fn api(provider: impl Into<String>, message: impl Into<String>) -> Self {
        Self::ProviderCall {
            provider: provider.into(),
            kind: ProviderErrorKind::Api,
            message: message.into(),
            status: None,
            retry_after: None,
            source: None,
        }
    }

    /// Create a response parse error
    pub fn response_parse(provider: impl Into<String>, message: impl Into<String>) -> Self {
        Self::ResponseParse {
            provider: provider.into(),
            message: message.into(),
            source: None,
        }
    }

    /// The provider failure category, if this is a provider call error
    pub fn provider_kind(&self) -> Option<ProviderErrorKind> {
        match self {
            Self::ProviderCall { kind, .. } => Some(*kind),
            _ => None,
        }
    }

    /// Whether a caller could reasonably retry the same call
    ///
    /// Transport failures, rate limits and 5xx replies are retryable.
    /// Parley itself never retries.
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::ProviderCall { kind, status, .. } => match kind {
                ProviderErrorKind::Transport | ProviderErrorKind::RateLimited => true,
                ProviderErrorKind::Api => status.is_some_and(|s| s >= 500),
                ProviderErrorKind::Authentication => false,
            },
            _ => false,
        }
    }

    /// Suggested delay before retrying, when the provider sent one
    pub fn retry_after(&self) -> Option<Duration> {
        match self {
            Self::ProviderCall { retry_after, .. } => *retry_after,
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;

    #[test]
    fn test_error_display() {
        let error = Error::configuration("Invalid base URL");
        assert_eq!(error.to_string(), "Configuration error: Invalid base URL");

        let error = Error::invalid_history("message 0: user message content is required");
        assert_eq!(
            error.to_string(),
            "Invalid history: message 0: user message content is required"
        );

        let error = Error::invalid_tools("duplicate tool name 'search'");
        assert_eq!(error.to_string(), "Invalid tools: duplicate tool name 'search'");

        let error = Error::from_status("openai", 429, "Rate limit exceeded", None);
        assert_eq!(
            error.to_string(),
            "Provider error (openai, rate limited): Rate limit exceeded"
        );

        let error = Error::response_parse("anthropic", "missing content");
        assert_eq!(error.to_string(), "Response parse error (anthropic): missing content");
    }

    #[test]
    fn test_status_classification() {
        let kind = |status| Error::from_status("groq", status, "x", None).provider_kind();
        assert_eq!(kind(401), Some(ProviderErrorKind::Authentication));
        assert_eq!(kind(403), Some(ProviderErrorKind::Authentication));
        assert_eq!(kind(429), Some(ProviderErrorKind::RateLimited));
        assert_eq!(kind(400), Some(ProviderErrorKind::Api));
        assert_eq!(kind(503), Some(ProviderErrorKind::Api));
    }

    #[test]
    fn test_is_retryable() {
        assert!(Error::transport("openai", "connection refused", None).is_retryable());
        assert!(Error::from_status("openai", 429, "slow down", None).is_retryable());
        assert!(Error::from_status("openai", 502, "bad gateway", None).is_retryable());
        assert!(!Error::from_status("openai", 400, "bad request", None).is_retryable());
        assert!(!Error::from_status("openai", 401, "bad key", None).is_retryable());
        assert!(!Error::api("openrouter", "no endpoints").is_retryable());
        assert!(!Error::invalid_history("empty").is_retryable());
        assert!(!Error::response_parse("openai", "garbage").is_retryable());
    }

    #[test]
    fn test_retry_after() {
        let error = Error::from_status("openai", 429, "slow down", Some(Duration::from_secs(30)));
        assert_eq!(error.retry_after(), Some(Duration::from_secs(30)));
        assert_eq!(Error::configuration("x").retry_after(), None);
    }

    #[test]
    fn test_error_source() {
        let io_error = io::Error::new(io::ErrorKind::ConnectionRefused, "refused");
        let error = Error::transport("ollama", "connection failed", Some(Box::new(io_error)));
        assert!(error.source().is_some());

        let error = Error::from_status("ollama", 500, "boom", None);
        assert!(error.source().is_none());

        let error = Error::InvalidHistory("test".into());
        assert!(error.source().is_none());
    }

    #[test]
    fn test_error_is_send_sync() {
        fn assert_send<T: Send>() {}
        fn assert_sync<T: Sync>() {}

        assert_send::<Error>();
        assert_sync::<Error>();
    }
}
