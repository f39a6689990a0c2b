//! Message content: a closed union keyed by the `data_type` discriminator.
//!
//! On the wire every payload is an object of the form
//! `{"data_type": "<kind>", "content": <payload>}`. Text carries a bare string,
//! every other kind an object. Decoding an unknown `data_type` fails.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::dialogue::StopReason;
use super::file::Base64File;
use super::tool::{ToolCall, ToolCallsContent, ToolResponse, ToolResponseContent};
use crate::{Error, ErrorContext, Result};

/// Discriminator values of [`MessageContent`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContentType {
    Text,
    Image,
    Audio,
    ToolCalls,
    ToolResponse,
    /// Dialogue state changes (stopped, resumed)
    Event,
}

impl ContentType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ContentType::Text => "text",
            ContentType::Image => "image",
            ContentType::Audio => "audio",
            ContentType::ToolCalls => "tool_calls",
            ContentType::ToolResponse => "tool_response",
            ContentType::Event => "event",
        }
    }
}

impl fmt::Display for ContentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImageContent {
    pub base64_file: Base64File,
    /// Text the service recognised in the image.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub found_file_text: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AudioContent {
    pub base64_file: Base64File,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transcribed_text: Option<String>,
}

/// Dialogue state change, keyed by `event_type`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event_type", rename_all = "snake_case")]
pub enum EventContent {
    #[serde(rename = "dialogue_stopped")]
    Stopped { reason: StopReason },
    #[serde(rename = "dialogue_resumed")]
    Resumed,
}

/// Message payload, one variant per [`ContentType`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "data_type", content = "content", rename_all = "snake_case")]
pub enum MessageContent {
    Text(String),
    Image(ImageContent),
    Audio(AudioContent),
    ToolCalls(ToolCallsContent),
    ToolResponse(ToolResponseContent),
    Event(EventContent),
}

impl MessageContent {
    pub fn text(text: impl Into<String>) -> Self {
        MessageContent::Text(text.into())
    }

    pub fn image(file: Base64File) -> Self {
        MessageContent::Image(ImageContent {
            base64_file: file,
            found_file_text: None,
        })
    }

    pub fn audio(file: Base64File) -> Self {
        MessageContent::Audio(AudioContent {
            base64_file: file,
            transcribed_text: None,
        })
    }

    pub fn tool_calls(calls: Vec<ToolCall>) -> Self {
        MessageContent::ToolCalls(ToolCallsContent { tool_calls: calls })
    }

    pub fn tool_response(
        tool_call_id: impl Into<String>,
        tool_name: Option<String>,
        response: impl Into<ToolResponse>,
    ) -> Self {
        MessageContent::ToolResponse(ToolResponseContent {
            tool_call_id: tool_call_id.into(),
            tool_name,
            tool_response: response.into(),
        })
    }

    pub fn content_type(&self) -> ContentType {
        match self {
            MessageContent::Text(_) => ContentType::Text,
            MessageContent::Image(_) => ContentType::Image,
            MessageContent::Audio(_) => ContentType::Audio,
            MessageContent::ToolCalls(_) => ContentType::ToolCalls,
            MessageContent::ToolResponse(_) => ContentType::ToolResponse,
            MessageContent::Event(_) => ContentType::Event,
        }
    }

    /// Text of a text message, `None` for every other kind.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            MessageContent::Text(text) => Some(text),
            _ => None,
        }
    }

    /// Decode a `{"data_type", "content"}` object.
    pub fn from_json(value: serde_json::Value) -> Result<Self> {
        serde_json::from_value(value).map_err(|e| {
            Error::malformed_with_context(
                "Invalid message content",
                ErrorContext::new()
                    .with_field_path("message_data")
                    .with_details(e.to_string()),
            )
        })
    }

    /// Encode into a `{"data_type", "content"}` object.
    pub fn to_json(&self) -> Result<serde_json::Value> {
        serde_json::to_value(self).map_err(|e| {
            Error::validation_with_context(
                "Message content is not serializable",
                ErrorContext::new().with_details(e.to_string()),
            )
        })
    }
}

impl From<String> for MessageContent {
    fn from(text: String) -> Self {
        MessageContent::Text(text)
    }
}

impl From<&str> for MessageContent {
    fn from(text: &str) -> Self {
        MessageContent::Text(text.to_string())
    }
}

impl From<EventContent> for MessageContent {
    fn from(event: EventContent) -> Self {
        MessageContent::Event(event)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_text_wire_shape() {
        let value = MessageContent::text("hi").to_json().unwrap();
        assert_eq!(value, json!({"data_type": "text", "content": "hi"}));
    }

    #[test]
    fn test_event_wire_shape() {
        let content = MessageContent::Event(EventContent::Stopped {
            reason: StopReason::Manual,
        });
        assert_eq!(
            content.to_json().unwrap(),
            json!({
                "data_type": "event",
                "content": {"event_type": "dialogue_stopped", "reason": "manual"}
            })
        );
        let resumed = MessageContent::from_json(json!({
            "data_type": "event",
            "content": {"event_type": "dialogue_resumed"}
        }))
        .unwrap();
        assert_eq!(resumed, MessageContent::Event(EventContent::Resumed));
    }

    #[test]
    fn test_unknown_data_type_is_malformed() {
        let err = MessageContent::from_json(json!({"data_type": "video", "content": {}}))
            .unwrap_err();
        assert_eq!(err.kind(), crate::error_code::ErrorKind::MalformedResponse);
    }

    #[test]
    fn test_optional_fields_are_omitted() {
        let value = MessageContent::audio(Base64File::from_bytes(b"ogg"))
            .to_json()
            .unwrap();
        assert_eq!(value["content"], json!({"base64_file": "b2dn"}));
    }
}
