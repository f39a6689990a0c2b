//! Asynchronous client over a pluggable [`Transport`](crate::transport::Transport).

use std::sync::Arc;
use tracing::debug;

use super::builder::DialogueClientBuilder;
use super::config::{ClientConfig, PredictOptions};
use super::conversation::Conversation;
use super::endpoint::{self, Operation};
use super::error_classification::{classify_response, decode_outcome};
use crate::transport::{ApiRequest, ApiResponse, Transport};
use crate::types::{AddedMessages, Dialogue, MessageBatch, Prediction};
use crate::{Error, ErrorContext, Result};

/// Asynchronous client for the dialogue API.
///
/// Every method is a single request/response exchange. Nothing is cached and
/// nothing is retried; concurrent calls against the same `unique_id` race on
/// the server, so callers order them when it matters.
#[derive(Clone)]
pub struct DialogueClient {
    pub(crate) config: Arc<ClientConfig>,
    pub(crate) transport: Arc<dyn Transport>,
}

impl std::fmt::Debug for DialogueClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DialogueClient")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl DialogueClient {
    pub fn builder() -> DialogueClientBuilder {
        DialogueClientBuilder::new()
    }

    /// Client with default settings and the given token.
    pub fn new(api_token: impl Into<String>) -> Result<Self> {
        DialogueClientBuilder::new().api_token(api_token).build()
    }

    /// Assemble a client from parts, e.g. to inject a custom transport.
    pub fn with_transport(config: ClientConfig, transport: Arc<dyn Transport>) -> Self {
        Self {
            config: Arc::new(config),
            transport,
        }
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn transport(&self) -> &dyn Transport {
        self.transport.as_ref()
    }

    /// Bind this client to one dialogue.
    pub fn conversation(&self, unique_id: impl Into<String>) -> Conversation {
        Conversation::new(self.clone(), unique_id.into())
    }

    async fn send(&self, operation: Operation, request: ApiRequest) -> Result<ApiResponse> {
        debug!(%operation, method = %request.method, path = request.url.path(), "dispatching request");
        self.transport.execute(request).await
    }

    /// Probe connectivity and credentials.
    pub async fn check_connection(&self) -> Result<bool> {
        let request = endpoint::check_connection(&self.config)?;
        let response = self.send(Operation::CheckConnection, request).await?;
        classify_response(Operation::CheckConnection, response.status, &response.body)?;
        Ok(true)
    }

    pub async fn get_dialogue(&self, unique_id: &str) -> Result<Dialogue> {
        let request = endpoint::get_dialogue(&self.config, unique_id)?;
        let response = self.send(Operation::GetDialogue, request).await?;
        let dialogue: Dialogue = decode_outcome(Operation::GetDialogue, &response)?
            .ok_or_else(|| missing_body(Operation::GetDialogue))?;
        dialogue.validate()?;
        Ok(dialogue)
    }

    /// Reset the dialogue and return its state before the reset.
    ///
    /// `Ok(None)` when the service accepted the call but had nothing to reset (HTTP 202).
    pub async fn reset_dialogue(&self, unique_id: &str) -> Result<Option<Dialogue>> {
        let request = endpoint::reset_dialogue(&self.config, unique_id)?;
        let response = self.send(Operation::ResetDialogue, request).await?;
        let previous: Option<Dialogue> = decode_outcome(Operation::ResetDialogue, &response)?;
        if let Some(dialogue) = &previous {
            dialogue.validate()?;
        }
        Ok(previous)
    }

    /// Append one or many messages. A plain string is sent as a customer text message.
    pub async fn add_messages(
        &self,
        unique_id: &str,
        messages: impl Into<MessageBatch>,
    ) -> Result<AddedMessages> {
        let request = endpoint::add_messages(&self.config, unique_id, &messages.into())?;
        let response = self.send(Operation::AddMessages, request).await?;
        decode_outcome(Operation::AddMessages, &response)?
            .ok_or_else(|| missing_body(Operation::AddMessages))
    }

    /// Ask the model for new messages.
    ///
    /// An empty [`Prediction`] means the service declined to answer.
    pub async fn predict(&self, unique_id: &str, options: &PredictOptions) -> Result<Prediction> {
        let request = endpoint::predict(&self.config, unique_id, options)?;
        let response = self.send(Operation::Predict, request).await?;
        Ok(decode_outcome(Operation::Predict, &response)?.unwrap_or_default())
    }

    /// Append messages and predict in one server-side step.
    pub async fn predict_add_message(
        &self,
        unique_id: &str,
        messages: impl Into<MessageBatch>,
        options: &PredictOptions,
    ) -> Result<Prediction> {
        let request =
            endpoint::predict_add_message(&self.config, unique_id, &messages.into(), options)?;
        let response = self.send(Operation::PredictAddMessage, request).await?;
        Ok(decode_outcome(Operation::PredictAddMessage, &response)?.unwrap_or_default())
    }
}

pub(crate) fn missing_body(operation: Operation) -> Error {
    Error::malformed_with_context(
        "Response carried no body to decode",
        ErrorContext::new().with_source(operation.name()),
    )
}
