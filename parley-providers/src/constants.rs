//! Constants for provider implementations

/// Default OpenAI base URL
pub const OPENAI_DEFAULT_BASE_URL: &str = "https://api.openai.com";

/// Default path segment for OpenAI-compatible APIs
pub const OPENAI_DEFAULT_API_VERSION: &str = "v1";

/// Default GROQ base URL
pub const GROQ_DEFAULT_BASE_URL: &str = "https://api.groq.com/openai";

/// Default OpenRouter base URL
pub const OPENROUTER_DEFAULT_BASE_URL: &str = "https://openrouter.ai/api";

/// Default Anthropic base URL
pub const ANTHROPIC_DEFAULT_BASE_URL: &str = "https://api.anthropic.com";

/// Default `anthropic-version` header
pub const ANTHROPIC_DEFAULT_API_VERSION: &str = "2023-06-01";

/// Default Ollama base URL
pub const OLLAMA_DEFAULT_BASE_URL: &str = "http://localhost:11434";

/// Default max tokens if not specified (Anthropic requires one)
pub const DEFAULT_MAX_TOKENS: u32 = 4096;

/// Prefix for tool call ids synthesized for Ollama replies
pub const OLLAMA_TOOL_ID_PREFIX: &str = "ollama_tool_";
