//! Endpoint table and request construction.
//!
//! Both the async and the blocking client build their requests here, so the
//! wire shape of every call is identical between the two.

use serde_json::{json, Value};
use std::fmt;
use url::Url;

use super::config::{ClientConfig, PredictOptions};
use crate::transport::{ApiRequest, HttpMethod};
use crate::types::MessageBatch;
use crate::{Error, ErrorContext, Result};

/// Every call the client can make.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    CheckConnection,
    GetDialogue,
    ResetDialogue,
    AddMessages,
    Predict,
    PredictAddMessage,
}

impl Operation {
    pub fn name(&self) -> &'static str {
        match self {
            Operation::CheckConnection => "check_connection",
            Operation::GetDialogue => "get_dialogue",
            Operation::ResetDialogue => "reset_dialogue",
            Operation::AddMessages => "add_messages",
            Operation::Predict => "predict",
            Operation::PredictAddMessage => "predict_add_message",
        }
    }

    pub fn method(&self) -> HttpMethod {
        match self {
            Operation::CheckConnection | Operation::GetDialogue => HttpMethod::Get,
            Operation::ResetDialogue => HttpMethod::Put,
            Operation::AddMessages | Operation::Predict | Operation::PredictAddMessage => {
                HttpMethod::Post
            }
        }
    }

    /// Whether HTTP 202 means "nothing produced" rather than a body to decode.
    pub fn accepts_no_answer(&self) -> bool {
        matches!(
            self,
            Operation::Predict | Operation::PredictAddMessage | Operation::ResetDialogue
        )
    }

    /// Path segments after `/api/dialogue/{unique_id}`.
    fn dialogue_suffix(&self) -> &'static [&'static str] {
        match self {
            Operation::CheckConnection => &[],
            Operation::GetDialogue => &["get"],
            Operation::ResetDialogue => &["delete"],
            Operation::AddMessages => &["messages", "add"],
            Operation::Predict => &["predict"],
            Operation::PredictAddMessage => &["predict", "add_message"],
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Build the absolute URL of an operation. `unique_id` is percent-encoded as a
/// single path segment.
pub fn endpoint_url(base: &Url, operation: Operation, unique_id: Option<&str>) -> Result<Url> {
    let mut url = base.clone();
    {
        let mut segments = url.path_segments_mut().map_err(|_| {
            Error::configuration_with_context(
                "Base URL cannot carry a path",
                ErrorContext::new().with_details(base.as_str().to_string()),
            )
        })?;
        segments.pop_if_empty();
        match operation {
            Operation::CheckConnection => {
                segments.extend(["api", "check"]);
            }
            _ => {
                let unique_id = checked_unique_id(operation, unique_id)?;
                segments.extend(["api", "dialogue", unique_id]);
                segments.extend(operation.dialogue_suffix());
            }
        }
    }
    url.set_query(None);
    url.set_fragment(None);
    Ok(url)
}

/// `url` skips `.` and `..` path segments, so those ids are rejected along with
/// the empty one.
fn checked_unique_id(operation: Operation, unique_id: Option<&str>) -> Result<&str> {
    let unique_id = unique_id
        .ok_or_else(|| Error::validation(format!("{} requires a unique id", operation)))?;
    if matches!(unique_id, "" | "." | "..") {
        return Err(Error::validation_with_context(
            format!("Unique id {:?} cannot be used as a path segment", unique_id),
            ErrorContext::new()
                .with_field_path("unique_id")
                .with_source(operation.name()),
        ));
    }
    Ok(unique_id)
}

fn messages_value(messages: &MessageBatch) -> Result<Value> {
    serde_json::to_value(messages.messages()).map_err(|e| {
        Error::validation_with_context(
            "Messages are not serializable",
            ErrorContext::new()
                .with_field_path("messages")
                .with_details(e.to_string()),
        )
    })
}

fn predict_body(config: &ClientConfig, options: &PredictOptions) -> serde_json::Map<String, Value> {
    let effective = config.effective_options(options);
    let mut body = serde_json::Map::new();
    body.insert("placeholders".into(), Value::Object(effective.placeholders));
    body.insert("custom_log_info".into(), Value::Object(effective.custom_log_info));
    body.insert("source".into(), Value::String(effective.source));
    body
}

fn request(
    config: &ClientConfig,
    operation: Operation,
    unique_id: Option<&str>,
    body: Option<Value>,
) -> Result<ApiRequest> {
    Ok(ApiRequest {
        method: operation.method(),
        url: endpoint_url(&config.base_url, operation, unique_id)?,
        bearer_token: config.api_token.clone(),
        body,
    })
}

pub fn check_connection(config: &ClientConfig) -> Result<ApiRequest> {
    request(config, Operation::CheckConnection, None, None)
}

pub fn get_dialogue(config: &ClientConfig, unique_id: &str) -> Result<ApiRequest> {
    request(config, Operation::GetDialogue, Some(unique_id), None)
}

pub fn reset_dialogue(config: &ClientConfig, unique_id: &str) -> Result<ApiRequest> {
    request(config, Operation::ResetDialogue, Some(unique_id), None)
}

pub fn add_messages(
    config: &ClientConfig,
    unique_id: &str,
    messages: &MessageBatch,
) -> Result<ApiRequest> {
    let body = json!({ "messages": messages_value(messages)? });
    request(config, Operation::AddMessages, Some(unique_id), Some(body))
}

pub fn predict(
    config: &ClientConfig,
    unique_id: &str,
    options: &PredictOptions,
) -> Result<ApiRequest> {
    let body = Value::Object(predict_body(config, options));
    request(config, Operation::Predict, Some(unique_id), Some(body))
}

pub fn predict_add_message(
    config: &ClientConfig,
    unique_id: &str,
    messages: &MessageBatch,
    options: &PredictOptions,
) -> Result<ApiRequest> {
    let mut body = predict_body(config, options);
    body.insert("messages".into(), messages_value(messages)?);
    request(
        config,
        Operation::PredictAddMessage,
        Some(unique_id),
        Some(Value::Object(body)),
    )
}
