//! Provider adapters for the Parley LLM client library
//!
//! Each adapter translates the canonical request into one backend's wire
//! format and the reply back into a canonical [`parley_core::Response`].
//! GROQ and OpenRouter share the OpenAI chat-completions adapter.

#![warn(missing_docs)]

pub mod builder;
pub mod constants;
pub mod error;
pub mod http;
pub mod traits;
pub mod utils;

// Provider implementations
pub mod anthropic;
pub mod groq;
pub mod ollama;
pub mod openai;
pub mod openrouter;

// Re-export provider types
pub use anthropic::Anthropic;
pub use builder::ProviderBuilder;
pub use groq::Groq;
pub use http::{HttpClient, ReqwestClient};
pub use ollama::Ollama;
pub use openai::OpenAI;
pub use openrouter::OpenRouter;

// Re-export common traits
pub use traits::{RequestConverter, ResponseParser};
