use crate::error_code::ErrorKind;
use crate::transport::TransportError;
use thiserror::Error;

/// Structured error context for better error handling and debugging.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorContext {
    /// Field path or configuration key that caused the error (e.g., "new_messages[0].message_data", "api_url")
    pub field_path: Option<String>,
    /// Additional context about the error (e.g., the serde message, the offending value)
    pub details: Option<String>,
    /// Source of the error (e.g., "predict", "client_builder")
    pub source: Option<String>,
}

impl ErrorContext {
    pub fn new() -> Self {
        Self {
            field_path: None,
            details: None,
            source: None,
        }
    }

    pub fn with_field_path(mut self, path: impl Into<String>) -> Self {
        self.field_path = Some(path.into());
        self
    }

    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }

    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }
}

impl Default for ErrorContext {
    fn default() -> Self {
        Self::new()
    }
}

/// Unified error type for the dialogue client.
///
/// Service variants carry the `detail` text the server sent, when there was one.
/// Every variant is terminal for the call that produced it: nothing is retried.
#[derive(Debug, Error)]
pub enum Error {
    #[error("API token is invalid{}", format_detail(.detail))]
    InvalidCredentials { detail: Option<String> },

    #[error("Balance is negative{}", format_balance(.balance))]
    NegativeBalance {
        balance: Option<i64>,
        detail: Option<String>,
    },

    #[error("Dialogue not found{}", format_detail(.detail))]
    DialogueNotFound { detail: Option<String> },

    #[error("Message with a server-only role or field was submitted{}", format_detail(.detail))]
    InvalidMessageSubmission { detail: Option<String> },

    #[error("History is too long to process{}", format_detail(.detail))]
    HistoryTooLong { detail: Option<String> },

    #[error("Message limit for the instance is exceeded{}", format_detail(.detail))]
    MessageLimitExceeded { detail: Option<String> },

    #[error("Internal service error{}", format_detail(.detail))]
    InternalServiceError { detail: Option<String> },

    #[error("Unexpected service response: HTTP {status}: {body}")]
    UnknownServiceError { status: u16, body: String },

    #[error("Invalid base64 file content ({len} bytes): {reason}")]
    InvalidFileEncoding { len: usize, reason: String },

    #[error("Malformed service response: {message}{}", format_context(.context))]
    MalformedResponse {
        message: String,
        context: ErrorContext,
    },

    #[error("Validation error: {message}{}", format_context(.context))]
    Validation {
        message: String,
        context: ErrorContext,
    },

    #[error("Configuration error: {message}{}", format_context(.context))]
    Configuration {
        message: String,
        context: ErrorContext,
    },

    #[error("Network transport error: {0}")]
    Transport(#[from] TransportError),
}

fn format_detail(detail: &Option<String>) -> String {
    match detail {
        Some(d) if !d.is_empty() => format!(": {}", d),
        _ => String::new(),
    }
}

fn format_balance(balance: &Option<i64>) -> String {
    match balance {
        Some(b) => format!(" ({})", b),
        None => String::new(),
    }
}

// Helper function to format error context for display
fn format_context(ctx: &ErrorContext) -> String {
    let mut parts = Vec::new();
    if let Some(ref field) = ctx.field_path {
        parts.push(format!("field: {}", field));
    }
    if let Some(ref details) = ctx.details {
        parts.push(format!("details: {}", details));
    }
    if let Some(ref source) = ctx.source {
        parts.push(format!("source: {}", source));
    }
    if parts.is_empty() {
        String::new()
    } else {
        format!(" ({})", parts.join(", "))
    }
}

impl Error {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::validation_with_context(msg, ErrorContext::new())
    }

    /// Create a new validation error with structured context
    pub fn validation_with_context(msg: impl Into<String>, context: ErrorContext) -> Self {
        Error::Validation {
            message: msg.into(),
            context,
        }
    }

    pub fn configuration(msg: impl Into<String>) -> Self {
        Self::configuration_with_context(msg, ErrorContext::new())
    }

    /// Create a new configuration error with structured context
    pub fn configuration_with_context(msg: impl Into<String>, context: ErrorContext) -> Self {
        Error::Configuration {
            message: msg.into(),
            context,
        }
    }

    /// Create a new malformed-response error with structured context
    pub fn malformed_with_context(msg: impl Into<String>, context: ErrorContext) -> Self {
        Error::MalformedResponse {
            message: msg.into(),
            context,
        }
    }

    /// Payload-free discriminant of this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::InvalidCredentials { .. } => ErrorKind::InvalidCredentials,
            Error::NegativeBalance { .. } => ErrorKind::NegativeBalance,
            Error::DialogueNotFound { .. } => ErrorKind::DialogueNotFound,
            Error::InvalidMessageSubmission { .. } => ErrorKind::InvalidMessageSubmission,
            Error::HistoryTooLong { .. } => ErrorKind::HistoryTooLong,
            Error::MessageLimitExceeded { .. } => ErrorKind::MessageLimitExceeded,
            Error::InternalServiceError { .. } => ErrorKind::InternalServiceError,
            Error::UnknownServiceError { .. } => ErrorKind::UnknownServiceError,
            Error::InvalidFileEncoding { .. } => ErrorKind::InvalidFileEncoding,
            Error::MalformedResponse { .. } => ErrorKind::MalformedResponse,
            Error::Validation { .. } => ErrorKind::Validation,
            Error::Configuration { .. } => ErrorKind::Configuration,
            Error::Transport(_) => ErrorKind::Transport,
        }
    }

    /// HTTP status the service answered with, for errors raised from a response.
    pub fn status(&self) -> Option<u16> {
        match self {
            Error::UnknownServiceError { status, .. } => Some(*status),
            other => other.kind().http_status(),
        }
    }

    /// Extract error context if available
    pub fn context(&self) -> Option<&ErrorContext> {
        match self {
            Error::MalformedResponse { context, .. }
            | Error::Validation { context, .. }
            | Error::Configuration { context, .. } => Some(context),
            _ => None,
        }
    }
}
