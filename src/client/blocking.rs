//! Blocking client. Same contract as the async [`DialogueClient`](super::DialogueClient),
//! same requests, same error mapping.

use std::sync::Arc;
use tracing::debug;

use super::builder::DialogueClientBuilder;
use super::config::{ClientConfig, PredictOptions};
use super::conversation::BlockingConversation;
use super::core::missing_body;
use super::endpoint::{self, Operation};
use super::error_classification::{classify_response, decode_outcome};
use crate::transport::{ApiRequest, ApiResponse, BlockingTransport};
use crate::types::{AddedMessages, Dialogue, MessageBatch, Prediction};
use crate::Result;

#[derive(Clone)]
pub struct DialogueClient {
    pub(crate) config: Arc<ClientConfig>,
    pub(crate) transport: Arc<dyn BlockingTransport>,
}

impl std::fmt::Debug for DialogueClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("blocking::DialogueClient")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl DialogueClient {
    pub fn builder() -> DialogueClientBuilder {
        DialogueClientBuilder::new()
    }

    pub fn new(api_token: impl Into<String>) -> Result<Self> {
        DialogueClientBuilder::new().api_token(api_token).build_blocking()
    }

    pub fn with_transport(config: ClientConfig, transport: Arc<dyn BlockingTransport>) -> Self {
        Self {
            config: Arc::new(config),
            transport,
        }
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn transport(&self) -> &dyn BlockingTransport {
        self.transport.as_ref()
    }

    pub fn conversation(&self, unique_id: impl Into<String>) -> BlockingConversation {
        BlockingConversation::new(self.clone(), unique_id.into())
    }

    fn send(&self, operation: Operation, request: ApiRequest) -> Result<ApiResponse> {
        debug!(%operation, method = %request.method, path = request.url.path(), "dispatching request");
        self.transport.execute(request)
    }

    pub fn check_connection(&self) -> Result<bool> {
        let request = endpoint::check_connection(&self.config)?;
        let response = self.send(Operation::CheckConnection, request)?;
        classify_response(Operation::CheckConnection, response.status, &response.body)?;
        Ok(true)
    }

    pub fn get_dialogue(&self, unique_id: &str) -> Result<Dialogue> {
        let request = endpoint::get_dialogue(&self.config, unique_id)?;
        let response = self.send(Operation::GetDialogue, request)?;
        let dialogue: Dialogue = decode_outcome(Operation::GetDialogue, &response)?
            .ok_or_else(|| missing_body(Operation::GetDialogue))?;
        dialogue.validate()?;
        Ok(dialogue)
    }

    pub fn reset_dialogue(&self, unique_id: &str) -> Result<Option<Dialogue>> {
        let request = endpoint::reset_dialogue(&self.config, unique_id)?;
        let response = self.send(Operation::ResetDialogue, request)?;
        let previous: Option<Dialogue> = decode_outcome(Operation::ResetDialogue, &response)?;
        if let Some(dialogue) = &previous {
            dialogue.validate()?;
        }
        Ok(previous)
    }

    pub fn add_messages(
        &self,
        unique_id: &str,
        messages: impl Into<MessageBatch>,
    ) -> Result<AddedMessages> {
        let request = endpoint::add_messages(&self.config, unique_id, &messages.into())?;
        let response = self.send(Operation::AddMessages, request)?;
        decode_outcome(Operation::AddMessages, &response)?
            .ok_or_else(|| missing_body(Operation::AddMessages))
    }

    pub fn predict(&self, unique_id: &str, options: &PredictOptions) -> Result<Prediction> {
        let request = endpoint::predict(&self.config, unique_id, options)?;
        let response = self.send(Operation::Predict, request)?;
        Ok(decode_outcome(Operation::Predict, &response)?.unwrap_or_default())
    }

    pub fn predict_add_message(
        &self,
        unique_id: &str,
        messages: impl Into<MessageBatch>,
        options: &PredictOptions,
    ) -> Result<Prediction> {
        let request =
            endpoint::predict_add_message(&self.config, unique_id, &messages.into(), options)?;
        let response = self.send(Operation::PredictAddMessage, request)?;
        Ok(decode_outcome(Operation::PredictAddMessage, &response)?.unwrap_or_default())
    }
}
