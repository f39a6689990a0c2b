//! # suvvy-api
//!
//! 对话预测服务的强类型客户端。
//!
//! Typed client for the Suvvy dialogue prediction API.
//!
//! ## Overview
//!
//! The service keeps one message history ("dialogue") per caller-chosen
//! `unique_id`. This crate encodes messages for it, asks it for predictions,
//! and maps its HTTP answers onto a closed set of typed results and errors.
//!
//! ## Core Philosophy
//!
//! - **Typed wire contract**: message payloads are a tagged union keyed by `data_type`; unknown kinds fail to decode
//! - **No hidden state**: instance settings are merged with per-call options by a pure function
//! - **No surprises**: "no answer" (HTTP 202) is a value, every failure is an [`Error`], nothing is retried
//! - **Two flavours**: async [`DialogueClient`] and [`blocking::DialogueClient`] share request building and error mapping
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use suvvy_api::{DialogueClient, PredictOptions, RequestMessage};
//!
//! #[tokio::main]
//! async fn main() -> suvvy_api::Result<()> {
//!     let client = DialogueClient::builder()
//!         .api_token("your-api-token")
//!         .build()?;
//!
//!     let prediction = client
//!         .predict_add_message("customer-42", RequestMessage::text("Hello!"), &PredictOptions::new())
//!         .await?;
//!
//!     match prediction.latest_text() {
//!         Some(answer) => println!("{answer}"),
//!         None => println!("no answer (dialogue stopped?)"),
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Module Organization
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`client`] | Async and blocking clients, builder, configuration, status mapping |
//! | [`types`] | Messages, content union, dialogue, usage |
//! | [`transport`] | HTTP seam and `reqwest`-based transports |
//! | [`error_code`] | Payload-free error kinds |

pub mod client;
pub mod error_code;
pub mod transport;
pub mod types;

pub use client::{Conversation, DialogueClient, DialogueClientBuilder, PredictOptions};
pub use error_code::ErrorKind;
pub use types::{
    Base64File, Dialogue, DialogueMessage, Message, MessageContent, Prediction, RequestMessage,
    SenderRole, Usage,
};

/// Blocking flavour of the client.
#[cfg(feature = "blocking")]
pub mod blocking {
    pub use crate::client::blocking::DialogueClient;
    pub use crate::client::conversation::BlockingConversation as Conversation;
}

/// Default `source` reported to the service and HTTP user agent.
pub const DEFAULT_SOURCE: &str = concat!("suvvy-api-rs/", env!("CARGO_PKG_VERSION"));

/// Result type alias for the library
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for the library
pub mod error;
pub use error::{Error, ErrorContext};
