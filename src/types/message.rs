//! Message envelopes: who sent it and what it carries.
//!
//! [`RequestMessage`] is what a client may submit. [`DialogueMessage`] is what
//! the service stores and echoes back, with server-assigned fields.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

use super::content::MessageContent;
use crate::{Error, ErrorContext, Result};

/// Message sender role
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SenderRole {
    Customer,
    Ai,
    /// Instructions or tool results
    System,
    Employee,
    /// Notice shown in the UI only, never sent to the model
    Information,
}

impl SenderRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            SenderRole::Customer => "customer",
            SenderRole::Ai => "ai",
            SenderRole::System => "system",
            SenderRole::Employee => "employee",
            SenderRole::Information => "information",
        }
    }

    /// Roles a client is allowed to submit.
    pub fn is_client_role(&self) -> bool {
        matches!(self, SenderRole::Customer | SenderRole::Employee)
    }
}

impl fmt::Display for SenderRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Sender plus content, with any role.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    #[serde(rename = "message_sender")]
    pub sender: SenderRole,
    #[serde(rename = "message_data")]
    pub content: MessageContent,
}

impl Message {
    pub fn new(sender: SenderRole, content: impl Into<MessageContent>) -> Self {
        Self {
            sender,
            content: content.into(),
        }
    }
}

/// Message a client submits. The sender is always `customer` or `employee`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Message", into = "Message")]
pub struct RequestMessage {
    sender: SenderRole,
    content: MessageContent,
}

impl RequestMessage {
    /// Fails with [`Error::Validation`] for server-authored roles.
    pub fn new(sender: SenderRole, content: impl Into<MessageContent>) -> Result<Self> {
        if !sender.is_client_role() {
            return Err(Error::validation_with_context(
                format!("Sender role '{}' cannot be submitted by a client", sender),
                ErrorContext::new()
                    .with_field_path("message_sender")
                    .with_details("allowed: customer, employee"),
            ));
        }
        Ok(Self {
            sender,
            content: content.into(),
        })
    }

    pub fn customer(content: impl Into<MessageContent>) -> Self {
        Self {
            sender: SenderRole::Customer,
            content: content.into(),
        }
    }

    pub fn employee(content: impl Into<MessageContent>) -> Self {
        Self {
            sender: SenderRole::Employee,
            content: content.into(),
        }
    }

    /// Customer text message.
    pub fn text(text: impl Into<String>) -> Self {
        Self::customer(MessageContent::Text(text.into()))
    }

    pub fn sender(&self) -> SenderRole {
        self.sender
    }

    pub fn content(&self) -> &MessageContent {
        &self.content
    }
}

impl TryFrom<Message> for RequestMessage {
    type Error = Error;

    fn try_from(message: Message) -> Result<Self> {
        Self::new(message.sender, message.content)
    }
}

impl From<RequestMessage> for Message {
    fn from(message: RequestMessage) -> Self {
        Message {
            sender: message.sender,
            content: message.content,
        }
    }
}

/// Message as stored by the service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DialogueMessage {
    #[serde(rename = "message_id")]
    pub id: Uuid,
    #[serde(rename = "tokens", default)]
    pub token_count: u64,
    #[serde(with = "super::timestamp")]
    pub created_at: DateTime<Utc>,
    #[serde(rename = "message_sender")]
    pub sender: SenderRole,
    #[serde(rename = "message_data")]
    pub content: MessageContent,
}

impl DialogueMessage {
    pub fn text(&self) -> Option<&str> {
        self.content.as_text()
    }

    /// Drop the server-assigned fields.
    pub fn to_message(&self) -> Message {
        Message {
            sender: self.sender,
            content: self.content.clone(),
        }
    }
}

/// One or many messages to submit in a single call.
///
/// A single message, a vector, or a plain string (sent as a customer text
/// message) all convert into the same uniform list.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MessageBatch(Vec<RequestMessage>);

impl MessageBatch {
    pub fn new(messages: Vec<RequestMessage>) -> Self {
        Self(messages)
    }

    pub fn messages(&self) -> &[RequestMessage] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn into_inner(self) -> Vec<RequestMessage> {
        self.0
    }
}

impl From<RequestMessage> for MessageBatch {
    fn from(message: RequestMessage) -> Self {
        Self(vec![message])
    }
}

impl From<Vec<RequestMessage>> for MessageBatch {
    fn from(messages: Vec<RequestMessage>) -> Self {
        Self(messages)
    }
}

impl From<&[RequestMessage]> for MessageBatch {
    fn from(messages: &[RequestMessage]) -> Self {
        Self(messages.to_vec())
    }
}

impl<const N: usize> From<[RequestMessage; N]> for MessageBatch {
    fn from(messages: [RequestMessage; N]) -> Self {
        Self(messages.into())
    }
}

impl From<&str> for MessageBatch {
    fn from(text: &str) -> Self {
        Self(vec![RequestMessage::text(text)])
    }
}

impl From<String> for MessageBatch {
    fn from(text: String) -> Self {
        Self(vec![RequestMessage::text(text)])
    }
}
