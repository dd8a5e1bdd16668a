//! Request types for LLM interactions

use crate::types::message::Message;
use crate::types::tool::ToolSet;
use serde::{Deserialize, Serialize};

/// A model identifier
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Model(pub String);

impl Model {
    /// Create a new model identifier
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// The identifier as sent to the provider
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for Model {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for Model {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl std::fmt::Display for Model {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Per-call model configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelParameters {
    /// The model to use
    pub model: Model,
    /// Maximum tokens to generate
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_tokens: Option<u32>,
    /// Temperature for randomness
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f32>,
    /// Top-p nucleus sampling
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub top_p: Option<f32>,
    /// Top-k sampling (not every provider honours it)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub top_k: Option<u32>,
    /// Stop sequences
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stop: Option<Vec<String>>,
    /// Random seed for deterministic generation
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
    /// Allow the model to request several tools in one turn
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parallel_tool_calls: Option<bool>,
}

impl ModelParameters {
    /// Parameters with only the model set
    pub fn new(model: impl Into<Model>) -> Self {
        Self {
            model: model.into(),
            max_tokens: None,
            temperature: None,
            top_p: None,
            top_k: None,
            stop: None,
            seed: None,
            parallel_tool_calls: None,
        }
    }

    /// Create a new parameters builder
    pub fn builder(model: impl Into<Model>) -> ModelParametersBuilder {
        ModelParametersBuilder {
            params: Self::new(model),
        }
    }
}

/// Builder for ModelParameters
#[derive(Debug, Clone)]
pub struct ModelParametersBuilder {
    params: ModelParameters,
}

impl ModelParametersBuilder {
    /// Set maximum tokens
    pub fn max_tokens(mut self, tokens: u32) -> Self {
        self.params.max_tokens = Some(tokens);
        self
    }

    /// Set temperature
    pub fn temperature(mut self, temp: f32) -> Self {
        self.params.temperature = Some(temp);
        self
    }

    /// Set top-p
    pub fn top_p(mut self, p: f32) -> Self {
        self.params.top_p = Some(p);
        self
    }

    /// Set top-k
    pub fn top_k(mut self, k: u32) -> Self {
        self.params.top_k = Some(k);
        self
    }

    /// Set stop sequences
    pub fn stop(mut self, sequences: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.params.stop = Some(sequences.into_iter().map(Into::into).collect());
        self
    }

    /// Set the seed
    pub fn seed(mut self, seed: u64) -> Self {
        self.params.seed = Some(seed);
        self
    }

    /// Allow or forbid parallel tool calls
    pub fn parallel_tool_calls(mut self, enabled: bool) -> Self {
        self.params.parallel_tool_calls = Some(enabled);
        self
    }

    /// Build the parameters
    pub fn build(self) -> ModelParameters {
        self.params
    }
}

/// Options for a single chat call
///
/// The default offers no tools and keeps the conversation history.
#[derive(Debug, Clone, PartialEq)]
pub struct ChatOptions {
    /// Tools offered to the model for this call
    pub tools: Option<ToolSet>,
    /// Prepend the stored history and append this turn to it
    pub reuse_history: bool,
}

impl Default for ChatOptions {
    fn default() -> Self {
        Self {
            tools: None,
            reuse_history: true,
        }
    }
}

impl ChatOptions {
    /// Offer a tool set
    pub fn with_tools(mut self, tools: ToolSet) -> Self {
        self.tools = Some(tools);
        self
    }

    /// Choose whether to reuse the stored history
    pub fn reuse_history(mut self, reuse: bool) -> Self {
        self.reuse_history = reuse;
        self
    }

    /// Whether a non-empty tool set is offered
    pub fn has_tools(&self) -> bool {
        self.tools.as_ref().is_some_and(|t| !t.is_empty())
    }
}

/// The canonical request handed to a provider adapter
#[derive(Debug, Clone, PartialEq)]
pub struct ProviderRequest {
    /// Full outbound message sequence
    pub messages: Vec<Message>,
    /// Tools offered, if any
    pub tools: Option<ToolSet>,
    /// Model configuration
    pub parameters: ModelParameters,
}

impl ProviderRequest {
    /// Create a request
    pub fn new(messages: Vec<Message>, tools: Option<ToolSet>, parameters: ModelParameters) -> Self {
        Self {
            messages,
            tools,
            parameters,
        }
    }

    /// Check if the request offers any tools
    pub fn has_tools(&self) -> bool {
        self.tools.as_ref().is_some_and(|t| !t.is_empty())
    }

    /// The model to call
    pub fn model(&self) -> &Model {
        &self.parameters.model
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::tool::ToolDescriptor;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn test_model_creation() {
        assert_eq!(Model::new("gpt-4o").as_str(), "gpt-4o");
        let model: Model = "llama-3.3-70b-versatile".into();
        assert_eq!(model.to_string(), "llama-3.3-70b-versatile");
        assert_eq!(serde_json::to_value(&model).unwrap(), json!("llama-3.3-70b-versatile"));
    }

    #[test]
    fn test_parameters_builder() {
        let params = ModelParameters::builder("gpt-4o")
            .max_tokens(100)
            .temperature(0.7)
            .top_p(0.9)
            .top_k(40)
            .stop(vec!["\n", "STOP"])
            .seed(7)
            .parallel_tool_calls(false)
            .build();

        assert_eq!(params.model, Model::new("gpt-4o"));
        assert_eq!(params.max_tokens, Some(100));
        assert_eq!(params.temperature, Some(0.7));
        assert_eq!(params.top_p, Some(0.9));
        assert_eq!(params.top_k, Some(40));
        assert_eq!(params.stop, Some(vec!["\n".to_string(), "STOP".to_string()]));
        assert_eq!(params.seed, Some(7));
        assert_eq!(params.parallel_tool_calls, Some(false));
    }

    #[test]
    fn test_parameters_serialization_skips_unset() {
        let params = ModelParameters::new("claude-3-5-sonnet-latest");
        assert_eq!(
            serde_json::to_value(&params).unwrap(),
            json!({"model": "claude-3-5-sonnet-latest"})
        );
    }

    #[test]
    fn test_chat_options_default() {
        let options = ChatOptions::default();
        assert!(options.tools.is_none());
        assert!(options.reuse_history);
        assert!(!options.has_tools());
    }

    #[test]
    fn test_chat_options_builder() {
        let tool = ToolDescriptor::new("t", "d", json!({"type": "object"})).unwrap();
        let options = ChatOptions::default()
            .with_tools(ToolSet::new([tool]).unwrap())
            .reuse_history(false);
        assert!(options.has_tools());
        assert!(!options.reuse_history);

        let empty = ChatOptions::default().with_tools(ToolSet::default());
        assert!(!empty.has_tools());
    }
}
