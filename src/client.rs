//! Dialogue client.
//!
//! Developer-friendly goal: keep the public surface small and predictable.
//! Implementation details are split into submodules under `src/client/`:
//! request construction ([`endpoint`]) and status handling
//! ([`error_classification`]) are shared by the async and blocking clients.

pub mod builder;
pub mod config;
pub mod conversation;
pub mod core;
pub mod endpoint;
pub mod error_classification;

#[cfg(feature = "blocking")]
pub mod blocking;

pub use builder::DialogueClientBuilder;
pub use config::{merge_overlay, ClientConfig, ConfigFile, LogMetadata, PredictOptions, Placeholders};
pub use conversation::Conversation;
pub use self::core::DialogueClient;
pub use endpoint::Operation;

#[cfg(feature = "blocking")]
pub use conversation::BlockingConversation;
