//! 类型系统模块：对话、消息、内容与用量的强类型表示。
//!
//! # Types Module
//!
//! Strongly-typed representations of everything the dialogue service sends and
//! receives. Field names follow the wire (snake_case) through serde renames.
//!
//! ## Key Types
//!
//! | Type | Description |
//! |------|-------------|
//! | [`MessageContent`] | Payload union keyed by `data_type` |
//! | [`Base64File`] | Validated base64 file content |
//! | [`RequestMessage`] | Message a client may submit (customer / employee) |
//! | [`DialogueMessage`] | Message as stored by the service |
//! | [`Dialogue`] | Conversation snapshot |
//! | [`Prediction`] | New messages plus [`Usage`] |
//!
//! ## Example
//!
//! ```rust
//! use suvvy_api::types::{Base64File, MessageContent, RequestMessage, SenderRole};
//!
//! let greeting = RequestMessage::text("Hello!");
//! let photo = RequestMessage::customer(MessageContent::image(Base64File::from_bytes(b"png")));
//! assert!(RequestMessage::new(SenderRole::Ai, "not allowed").is_err());
//! # let _ = (greeting, photo);
//! ```

pub mod content;
pub mod dialogue;
pub mod file;
pub mod message;
pub(crate) mod timestamp;
pub mod tool;
pub mod usage;

pub use content::{AudioContent, ContentType, EventContent, ImageContent, MessageContent};
pub use dialogue::{Channel, Dialogue, StopReason};
pub use file::Base64File;
pub use message::{DialogueMessage, Message, MessageBatch, RequestMessage, SenderRole};
pub use tool::{ToolCall, ToolCallsContent, ToolFunction, ToolResponse, ToolResponseContent, ToolType};
pub use usage::{AddedMessages, BalanceUsage, Prediction, TokenUsage, Usage};
