//! Tool/function calling types

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};
use std::collections::HashSet;

/// A tool call requested by the model
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolCall {
    /// Unique ID for this call
    pub id: String,
    /// Name of the tool to call
    pub name: String,
    /// Decoded arguments
    pub arguments: Value,
}

impl ToolCall {
    /// Create a tool call
    pub fn new(id: impl Into<String>, name: impl Into<String>, arguments: Value) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            arguments,
        }
    }

    /// Arguments encoded as a JSON string, as OpenAI-style APIs expect them
    pub fn arguments_json(&self) -> String {
        self.arguments.to_string()
    }
}

/// Result from executing a tool
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolResult {
    /// ID of the tool call this is responding to
    pub call_id: String,
    /// Output of the tool, if any
    pub result: Option<String>,
    /// Error reported by the tool, if any
    pub error: Option<String>,
}

impl ToolResult {
    /// Create a successful tool result
    pub fn success(call_id: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            call_id: call_id.into(),
            result: Some(content.into()),
            error: None,
        }
    }

    /// Create a failed tool result
    pub fn error(call_id: impl Into<String>, error: impl Into<String>) -> Self {
        Self {
            call_id: call_id.into(),
            result: None,
            error: Some(error.into()),
        }
    }

    /// Whether the tool reported no error
    pub fn is_success(&self) -> bool {
        self.error.is_none()
    }

    /// Text sent back to the model for this result
    pub fn render(&self) -> String {
        let mut text = String::new();
        if let Some(result) = self.result.as_deref().filter(|r| !r.is_empty()) {
            text.push_str(result);
            text.push('\n');
        }
        if let Some(error) = self.error.as_deref().filter(|e| !e.is_empty()) {
            text.push_str("Tool call failed with error:\n");
            text.push_str(error);
        }
        text.trim().to_string()
    }
}

/// One parameter of a tool, used to build a JSON schema
#[derive(Debug, Clone, PartialEq)]
pub struct ToolParameter {
    /// Parameter name
    pub name: String,
    /// JSON schema type ("string", "integer", "array", ...)
    pub kind: String,
    /// Human-readable description
    pub description: String,
    /// Whether the model must supply it
    pub required: bool,
    /// Allowed values, for enumerations
    pub enum_values: Option<Vec<String>>,
    /// Item schema, for arrays
    pub items: Option<Value>,
}

impl ToolParameter {
    /// Create an optional parameter
    pub fn new(
        name: impl Into<String>,
        kind: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            kind: kind.into(),
            description: description.into(),
            required: false,
            enum_values: None,
            items: None,
        }
    }

    /// Mark the parameter as required
    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    /// Restrict the parameter to a set of values
    pub fn with_enum(mut self, values: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.enum_values = Some(values.into_iter().map(Into::into).collect());
        self
    }

    /// Set the item schema of an array parameter
    pub fn with_items(mut self, items: Value) -> Self {
        self.items = Some(items);
        self
    }

    fn schema(&self) -> Value {
        let mut schema = Map::new();
        schema.insert("type".into(), json!(self.kind));
        schema.insert("description".into(), json!(self.description));
        if let Some(values) = &self.enum_values {
            schema.insert("enum".into(), json!(values));
        }
        if let Some(items) = &self.items {
            schema.insert("items".into(), items.clone());
        }
        Value::Object(schema)
    }
}

/// An immutable description of a tool the model may call
///
/// Fields are only readable; a descriptor never changes after
/// construction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawToolDescriptor")]
pub struct ToolDescriptor {
    name: String,
    description: String,
    parameters: Value,
}

#[derive(Deserialize)]
struct RawToolDescriptor {
    name: String,
    description: String,
    parameters: Value,
}

impl TryFrom<RawToolDescriptor> for ToolDescriptor {
    type Error = Error;

    fn try_from(raw: RawToolDescriptor) -> Result<Self> {
        Self::new(raw.name, raw.description, raw.parameters)
    }
}

impl ToolDescriptor {
    /// Create a descriptor from a JSON schema
    ///
    /// The name must be non-empty and free of whitespace, and the schema
    /// must be a JSON object.
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        parameters: Value,
    ) -> Result<Self> {
        let name = name.into();
        if name.is_empty() {
            return Err(Error::invalid_tools("tool name must not be empty"));
        }
        if name.chars().any(char::is_whitespace) {
            return Err(Error::invalid_tools(format!(
                "tool name '{name}' must not contain whitespace"
            )));
        }
        if !parameters.is_object() {
            return Err(Error::invalid_tools(format!(
                "parameter schema of tool '{name}' must be a JSON object"
            )));
        }
        Ok(Self {
            name,
            description: description.into(),
            parameters,
        })
    }

    /// Create a descriptor from a parameter list
    pub fn from_parameters(
        name: impl Into<String>,
        description: impl Into<String>,
        parameters: &[ToolParameter],
    ) -> Result<Self> {
        let mut properties = Map::new();
        let mut required = Vec::new();
        for param in parameters {
            if properties.insert(param.name.clone(), param.schema()).is_some() {
                return Err(Error::invalid_tools(format!(
                    "duplicate parameter '{}'",
                    param.name
                )));
            }
            if param.required {
                required.push(param.name.clone());
            }
        }
        let schema = json!({
            "type": "object",
            "properties": properties,
            "required": required,
        });
        Self::new(name, description, schema)
    }

    /// The tool name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Human-readable description
    pub fn description(&self) -> &str {
        &self.description
    }

    /// JSON schema for the parameters
    pub fn parameters(&self) -> &Value {
        &self.parameters
    }
}

/// The set of tools offered to the model in a single call
///
/// Names are unique within a set.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<ToolDescriptor>", into = "Vec<ToolDescriptor>")]
pub struct ToolSet {
    tools: Vec<ToolDescriptor>,
}

impl ToolSet {
    /// Build a set, rejecting duplicate names
    pub fn new(tools: impl IntoIterator<Item = ToolDescriptor>) -> Result<Self> {
        let tools: Vec<ToolDescriptor> = tools.into_iter().collect();
        let mut seen = HashSet::new();
        for tool in &tools {
            if !seen.insert(tool.name()) {
                return Err(Error::invalid_tools(format!(
                    "duplicate tool name '{}'",
                    tool.name()
                )));
            }
        }
        Ok(Self { tools })
    }

    /// Iterate over the descriptors in order
    pub fn iter(&self) -> std::slice::Iter<'_, ToolDescriptor> {
        self.tools.iter()
    }

    /// Look up a descriptor by name
    pub fn get(&self, name: &str) -> Option<&ToolDescriptor> {
        self.tools.iter().find(|t| t.name() == name)
    }

    /// Tool names in order
    pub fn names(&self) -> Vec<&str> {
        self.tools.iter().map(ToolDescriptor::name).collect()
    }

    /// Number of tools
    pub fn len(&self) -> usize {
        self.tools.len()
    }

    /// Whether the set is empty
    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }
}

impl TryFrom<Vec<ToolDescriptor>> for ToolSet {
    type Error = Error;

    fn try_from(tools: Vec<ToolDescriptor>) -> Result<Self> {
        Self::new(tools)
    }
}

impl From<ToolSet> for Vec<ToolDescriptor> {
    fn from(set: ToolSet) -> Self {
        set.tools
    }
}

impl<'a> IntoIterator for &'a ToolSet {
    type Item = &'a ToolDescriptor;
    type IntoIter = std::slice::Iter<'a, ToolDescriptor>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
