//! 错误类别：与 [`Error`](crate::Error) 一一对应的无负载枚举。
//!
//! Payload-free error kinds.
//!
//! [`ErrorKind`] mirrors every variant of [`Error`](crate::Error) without the
//! attached data, so callers can branch, count or log on the kind alone.
//!
//! ## Categories
//!
//! | Category     | Kinds                                                                  |
//! |--------------|------------------------------------------------------------------------|
//! | `auth`       | `InvalidCredentials`                                                   |
//! | `billing`    | `NegativeBalance`                                                      |
//! | `dialogue`   | `DialogueNotFound`, `InvalidMessageSubmission`, `HistoryTooLong`, `MessageLimitExceeded` |
//! | `server`     | `InternalServiceError`, `UnknownServiceError`, `MalformedResponse`      |
//! | `client`     | `InvalidFileEncoding`, `Validation`, `Configuration`                   |
//! | `network`    | `Transport`                                                            |
//!
//! ## Example
//!
//! ```rust
//! use suvvy_api::error_code::ErrorKind;
//!
//! let kind = ErrorKind::from_http_status(402).unwrap();
//! assert_eq!(kind, ErrorKind::NegativeBalance);
//! assert_eq!(kind.name(), "negative_balance");
//! assert!(!kind.retryable());
//! ```

use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// HTTP 401: the bearer token was rejected
    InvalidCredentials,
    /// HTTP 402: the account balance is below zero
    NegativeBalance,
    /// HTTP 404: no dialogue exists for the unique id
    DialogueNotFound,
    /// HTTP 406: a message with a server-only role or field was submitted
    InvalidMessageSubmission,
    /// HTTP 413 with a "Maximum token limit" detail
    HistoryTooLong,
    /// HTTP 413 with any other detail
    MessageLimitExceeded,
    /// HTTP 500
    InternalServiceError,
    /// Any other non-success status
    UnknownServiceError,
    /// A file payload is not valid base64
    InvalidFileEncoding,
    /// A success body could not be decoded
    MalformedResponse,
    /// A value failed local validation before any request was sent
    Validation,
    /// The client could not be configured
    Configuration,
    /// The transport failed before a response was received
    Transport,
}

impl ErrorKind {
    /// Returns the snake_case name (e.g., `"dialogue_not_found"`).
    #[inline]
    pub fn name(&self) -> &'static str {
        match self {
            Self::InvalidCredentials => "invalid_credentials",
            Self::NegativeBalance => "negative_balance",
            Self::DialogueNotFound => "dialogue_not_found",
            Self::InvalidMessageSubmission => "invalid_message_submission",
            Self::HistoryTooLong => "history_too_long",
            Self::MessageLimitExceeded => "message_limit_exceeded",
            Self::InternalServiceError => "internal_service_error",
            Self::UnknownServiceError => "unknown_service_error",
            Self::InvalidFileEncoding => "invalid_file_encoding",
            Self::MalformedResponse => "malformed_response",
            Self::Validation => "validation",
            Self::Configuration => "configuration",
            Self::Transport => "transport",
        }
    }

    /// Returns the category: `"auth"`, `"billing"`, `"dialogue"`, `"server"`, `"client"` or `"network"`.
    #[inline]
    pub fn category(&self) -> &'static str {
        match self {
            Self::InvalidCredentials => "auth",
            Self::NegativeBalance => "billing",
            Self::DialogueNotFound
            | Self::InvalidMessageSubmission
            | Self::HistoryTooLong
            | Self::MessageLimitExceeded => "dialogue",
            Self::InternalServiceError | Self::UnknownServiceError | Self::MalformedResponse => {
                "server"
            }
            Self::InvalidFileEncoding | Self::Validation | Self::Configuration => "client",
            Self::Transport => "network",
        }
    }

    /// Whether an external retry layer could reasonably try the call again.
    ///
    /// Advisory only. The client itself never retries.
    #[inline]
    pub fn retryable(&self) -> bool {
        matches!(self, Self::InternalServiceError | Self::Transport)
    }

    /// Whether this kind is raised from a service response, as opposed to local checks.
    #[inline]
    pub fn is_service_error(&self) -> bool {
        self.http_status().is_some() || matches!(self, Self::UnknownServiceError)
    }

    /// The status code this kind is mapped from, when the mapping is one-to-one.
    pub fn http_status(&self) -> Option<u16> {
        match self {
            Self::InvalidCredentials => Some(401),
            Self::NegativeBalance => Some(402),
            Self::DialogueNotFound => Some(404),
            Self::InvalidMessageSubmission => Some(406),
            Self::HistoryTooLong | Self::MessageLimitExceeded => Some(413),
            Self::InternalServiceError => Some(500),
            _ => None,
        }
    }

    /// Maps an error status code to its kind.
    ///
    /// 413 maps to `MessageLimitExceeded`; telling it apart from `HistoryTooLong`
    /// needs the response detail, see
    /// [`classify_response`](crate::client::error_classification::classify_response).
    /// Success statuses (below 300) return `None`.
    pub fn from_http_status(status: u16) -> Option<Self> {
        let kind = match status {
            0..=299 => return None,
            401 => Self::InvalidCredentials,
            402 => Self::NegativeBalance,
            404 => Self::DialogueNotFound,
            406 => Self::InvalidMessageSubmission,
            413 => Self::MessageLimitExceeded,
            500 => Self::InternalServiceError,
            _ => Self::UnknownServiceError,
        };
        Some(kind)
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}
