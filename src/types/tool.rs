//! Tool calling payloads carried inside dialogue messages

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Kind of tool being invoked. The service only knows functions.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ToolType {
    #[default]
    Function,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolFunction {
    pub name: String,
    #[serde(default)]
    pub arguments: Map<String, Value>,
}

/// Tool call (invocation from model)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolCall {
    #[serde(rename = "tool_call_id")]
    pub id: String,
    #[serde(default)]
    pub tool_type: ToolType,
    pub function: ToolFunction,
}

impl ToolCall {
    pub fn function(
        id: impl Into<String>,
        name: impl Into<String>,
        arguments: Map<String, Value>,
    ) -> Self {
        Self {
            id: id.into(),
            tool_type: ToolType::Function,
            function: ToolFunction {
                name: name.into(),
                arguments,
            },
        }
    }

    pub fn function_name(&self) -> &str {
        &self.function.name
    }

    pub fn arguments(&self) -> &Map<String, Value> {
        &self.function.arguments
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolCallsContent {
    pub tool_calls: Vec<ToolCall>,
}

/// Result of a tool: plain text, a JSON object or a JSON array.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ToolResponse {
    Text(String),
    Object(Map<String, Value>),
    Array(Vec<Value>),
}

impl From<String> for ToolResponse {
    fn from(text: String) -> Self {
        ToolResponse::Text(text)
    }
}

impl From<&str> for ToolResponse {
    fn from(text: &str) -> Self {
        ToolResponse::Text(text.to_string())
    }
}

impl From<Map<String, Value>> for ToolResponse {
    fn from(object: Map<String, Value>) -> Self {
        ToolResponse::Object(object)
    }
}

impl From<Vec<Value>> for ToolResponse {
    fn from(items: Vec<Value>) -> Self {
        ToolResponse::Array(items)
    }
}

/// Tool result (response to tool call)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolResponseContent {
    pub tool_call_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tool_name: Option<String>,
    pub tool_response: ToolResponse,
}
