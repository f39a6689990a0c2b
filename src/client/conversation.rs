//! A client bound to one dialogue key.

use super::config::PredictOptions;
use super::core::DialogueClient;
use crate::types::{AddedMessages, Dialogue, MessageBatch, Prediction};
use crate::Result;

/// Shorthand for calling [`DialogueClient`] with a fixed `unique_id`.
#[derive(Debug, Clone)]
pub struct Conversation {
    client: DialogueClient,
    unique_id: String,
}

impl Conversation {
    pub(crate) fn new(client: DialogueClient, unique_id: String) -> Self {
        Self { client, unique_id }
    }

    pub fn unique_id(&self) -> &str {
        &self.unique_id
    }

    pub async fn get(&self) -> Result<Dialogue> {
        self.client.get_dialogue(&self.unique_id).await
    }

    pub async fn reset(&self) -> Result<Option<Dialogue>> {
        self.client.reset_dialogue(&self.unique_id).await
    }

    pub async fn add_messages(&self, messages: impl Into<MessageBatch>) -> Result<AddedMessages> {
        self.client.add_messages(&self.unique_id, messages).await
    }

    pub async fn predict(&self, options: &PredictOptions) -> Result<Prediction> {
        self.client.predict(&self.unique_id, options).await
    }

    pub async fn predict_add_message(
        &self,
        messages: impl Into<MessageBatch>,
        options: &PredictOptions,
    ) -> Result<Prediction> {
        self.client
            .predict_add_message(&self.unique_id, messages, options)
            .await
    }
}

#[cfg(feature = "blocking")]
#[derive(Debug, Clone)]
pub struct BlockingConversation {
    client: super::blocking::DialogueClient,
    unique_id: String,
}

#[cfg(feature = "blocking")]
impl BlockingConversation {
    pub(crate) fn new(client: super::blocking::DialogueClient, unique_id: String) -> Self {
        Self { client, unique_id }
    }

    pub fn unique_id(&self) -> &str {
        &self.unique_id
    }

    pub fn get(&self) -> Result<Dialogue> {
        self.client.get_dialogue(&self.unique_id)
    }

    pub fn reset(&self) -> Result<Option<Dialogue>> {
        self.client.reset_dialogue(&self.unique_id)
    }

    pub fn add_messages(&self, messages: impl Into<MessageBatch>) -> Result<AddedMessages> {
        self.client.add_messages(&self.unique_id, messages)
    }

    pub fn predict(&self, options: &PredictOptions) -> Result<Prediction> {
        self.client.predict(&self.unique_id, options)
    }

    pub fn predict_add_message(
        &self,
        messages: impl Into<MessageBatch>,
        options: &PredictOptions,
    ) -> Result<Prediction> {
        self.client
            .predict_add_message(&self.unique_id, messages, options)
    }
}
