//! OpenAI provider implementation
//!
//! The chat-completions wire format is shared by several backends; the
//! GROQ and OpenRouter adapters reuse this module with their own defaults
//! and capability tables.

mod config;
mod converter;
mod parser;
mod provider;

pub use config::OpenAIConfig;
pub use converter::OpenAIConverter;
pub use parser::OpenAIParser;
pub use provider::{supports_tool_calling, OpenAI};
