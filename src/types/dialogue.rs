//! Server-side dialogue snapshot

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::message::DialogueMessage;
use crate::{Error, ErrorContext, Result};

/// Why automated prediction was halted for a dialogue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StopReason {
    /// A control phrase appeared in a customer or employee message
    ControlPhrase,
    Other,
    InterceptedByEmployee,
    Manual,
    /// A file marked as stopping the dialogue was triggered
    StopFileTriggered,
}

/// Integration channel the dialogue belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Channel {
    Api,
    TelegramBot,
    Jivo,
    Bitrix,
    Amocrm,
    Whatsapp,
    Usedesk,
    Kommo,
    Planfix,
    TestChat,
    #[serde(other)]
    Unknown,
}

/// Conversation tracked by the service under a caller-chosen `unique_id`.
///
/// A read-only snapshot: every fetch returns a new value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Dialogue {
    #[serde(rename = "dialogue_id", alias = "_id")]
    pub id: String,
    #[serde(default)]
    pub messages: Vec<DialogueMessage>,
    pub unique_id: String,
    pub user_id: i64,
    #[serde(default)]
    pub instance_id: Option<i64>,
    #[serde(default)]
    pub source: Option<String>,
    pub is_stopped: bool,
    #[serde(default, with = "super::timestamp::option")]
    pub stopped_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub stop_reason: Option<StopReason>,
    #[serde(default)]
    pub is_deleted: bool,
    #[serde(default, with = "super::timestamp::option")]
    pub deleted_at: Option<DateTime<Utc>>,
    #[serde(with = "super::timestamp")]
    pub created_at: DateTime<Utc>,
    #[serde(rename = "channel_name")]
    pub channel: Channel,
}

impl Dialogue {
    /// A stopped dialogue must say why.
    pub fn validate(&self) -> Result<()> {
        if self.is_stopped && self.stop_reason.is_none() {
            return Err(Error::malformed_with_context(
                "Stopped dialogue has no stop reason",
                ErrorContext::new()
                    .with_field_path("stop_reason")
                    .with_details(format!("unique_id: {}", self.unique_id)),
            ));
        }
        Ok(())
    }

    /// Not stopped and not deleted.
    pub fn is_active(&self) -> bool {
        !self.is_stopped && !self.is_deleted
    }

    pub fn last_message(&self) -> Option<&DialogueMessage> {
        self.messages.last()
    }
}
