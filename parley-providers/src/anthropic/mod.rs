//! Anthropic Claude provider implementation

mod config;
pub(crate) mod converter;
pub(crate) mod parser;
mod provider;

pub use config::AnthropicConfig;
pub use converter::AnthropicConverter;
pub use parser::AnthropicParser;
pub use provider::{supports_tool_calling, Anthropic};
