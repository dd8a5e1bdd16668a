//! Ollama provider implementation

mod config;
mod converter;
mod parser;
mod provider;

pub use config::OllamaConfig;
pub use converter::OllamaConverter;
pub use parser::OllamaParser;
pub use provider::{supports_tool_calling, Ollama};
