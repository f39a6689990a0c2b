//! Status classification: turn a completed HTTP exchange into exactly one outcome.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{debug, warn};

use super::endpoint::Operation;
use crate::transport::ApiResponse;
use crate::{Error, ErrorContext, Result};

static BALANCE_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\((-?\d+)\)").expect("balance pattern is valid"));

const TOKEN_LIMIT_PREFIX: &str = "Maximum token limit";

/// Non-error outcome of a response.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResponseOutcome {
    /// Decode the body.
    Success,
    /// HTTP 202 on an operation where it means "nothing produced".
    NoAnswer,
}

/// Human-readable detail of an error body.
///
/// The `detail` field of a JSON body when present (rendered as JSON when it is
/// not a string), otherwise the raw body.
pub fn extract_detail(body: &str) -> Option<String> {
    let trimmed = body.trim();
    if trimmed.is_empty() {
        return None;
    }
    match serde_json::from_str::<Value>(trimmed) {
        Ok(Value::Object(map)) => match map.get("detail") {
            Some(Value::String(s)) => Some(s.clone()),
            Some(Value::Null) | None => None,
            Some(other) => Some(other.to_string()),
        },
        _ => Some(trimmed.to_string()),
    }
}

/// Balance figure from a 402 detail such as `"Balance is negative (-42)"`.
pub fn parse_balance(detail: &str) -> Option<i64> {
    BALANCE_PATTERN
        .captures(detail)
        .and_then(|caps| caps.get(1))
        .and_then(|m| m.as_str().parse::<i64>().ok())
}

/// Decide the outcome of a response for `operation`.
///
/// | status | outcome |
/// |---|---|
/// | 202 on predict / predict-add / reset | [`ResponseOutcome::NoAnswer`] |
/// | other < 300 | [`ResponseOutcome::Success`] |
/// | 401 | [`Error::InvalidCredentials`] |
/// | 402 | [`Error::NegativeBalance`] |
/// | 404 | [`Error::DialogueNotFound`] |
/// | 406 | [`Error::InvalidMessageSubmission`] |
/// | 413 | [`Error::HistoryTooLong`] or [`Error::MessageLimitExceeded`] |
/// | 500 | [`Error::InternalServiceError`] |
/// | anything else | [`Error::UnknownServiceError`] |
pub fn classify_response(operation: Operation, status: u16, body: &str) -> Result<ResponseOutcome> {
    if status == 202 && operation.accepts_no_answer() {
        debug!(%operation, "service produced no answer");
        return Ok(ResponseOutcome::NoAnswer);
    }
    if status < 300 {
        return Ok(ResponseOutcome::Success);
    }

    let detail = extract_detail(body);
    let error = match status {
        401 => Error::InvalidCredentials { detail },
        402 => Error::NegativeBalance {
            balance: detail.as_deref().and_then(parse_balance),
            detail,
        },
        404 => Error::DialogueNotFound { detail },
        406 => Error::InvalidMessageSubmission { detail },
        413 => {
            if detail
                .as_deref()
                .is_some_and(|d| d.starts_with(TOKEN_LIMIT_PREFIX))
            {
                Error::HistoryTooLong { detail }
            } else {
                Error::MessageLimitExceeded { detail }
            }
        }
        500 => Error::InternalServiceError { detail },
        _ => Error::UnknownServiceError {
            status,
            body: body.to_string(),
        },
    };
    warn!(%operation, status, kind = %error.kind(), "service returned an error");
    Err(error)
}

/// Classify `response` and decode its body on success.
///
/// Returns `Ok(None)` for [`ResponseOutcome::NoAnswer`].
pub fn decode_outcome<T: DeserializeOwned>(
    operation: Operation,
    response: &ApiResponse,
) -> Result<Option<T>> {
    match classify_response(operation, response.status, &response.body)? {
        ResponseOutcome::NoAnswer => Ok(None),
        ResponseOutcome::Success => decode_body(operation, &response.body).map(Some),
    }
}

pub(crate) fn decode_body<T: DeserializeOwned>(operation: Operation, body: &str) -> Result<T> {
    serde_json::from_str(body).map_err(|e| {
        Error::malformed_with_context(
            format!("Cannot decode {} response", operation),
            ErrorContext::new()
                .with_source(operation.name())
                .with_details(e.to_string()),
        )
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error_code::ErrorKind;

    fn kind(status: u16, body: &str) -> ErrorKind {
        classify_response(Operation::GetDialogue, status, body)
            .unwrap_err()
            .kind()
    }

    #[test]
    fn test_status_table() {
        assert_eq!(kind(401, r#"{"detail":"bad token"}"#), ErrorKind::InvalidCredentials);
        assert_eq!(kind(402, r#"{"detail":"no money"}"#), ErrorKind::NegativeBalance);
        assert_eq!(kind(404, r#"{"detail":"nope"}"#), ErrorKind::DialogueNotFound);
        assert_eq!(kind(406, "{}"), ErrorKind::InvalidMessageSubmission);
        assert_eq!(kind(500, ""), ErrorKind::InternalServiceError);
        assert_eq!(kind(418, "teapot"), ErrorKind::UnknownServiceError);
        assert_eq!(kind(302, ""), ErrorKind::UnknownServiceError);
    }

    #[test]
    fn test_413_split_on_detail() {
        assert_eq!(
            kind(413, r#"{"detail":"Maximum token limit reached"}"#),
            ErrorKind::HistoryTooLong
        );
        assert_eq!(
            kind(413, r#"{"detail":"Message limit exceeded"}"#),
            ErrorKind::MessageLimitExceeded
        );
        assert_eq!(kind(413, ""), ErrorKind::MessageLimitExceeded);
    }

    #[test]
    fn test_202_depends_on_operation() {
        for op in [Operation::Predict, Operation::PredictAddMessage, Operation::ResetDialogue] {
            assert_eq!(classify_response(op, 202, "").unwrap(), ResponseOutcome::NoAnswer);
        }
        for op in [Operation::GetDialogue, Operation::AddMessages, Operation::CheckConnection] {
            assert_eq!(classify_response(op, 202, "{}").unwrap(), ResponseOutcome::Success);
        }
    }

    #[test]
    fn test_parse_balance() {
        assert_eq!(parse_balance("Balance is negative (42)"), Some(42));
        assert_eq!(parse_balance("Balance is negative (-7) today"), Some(-7));
        assert_eq!(parse_balance("Balance is negative"), None);
        assert_eq!(parse_balance("Balance is negative ()"), None);
    }

    #[test]
    fn test_negative_balance_keeps_detail() {
        let err = classify_response(
            Operation::Predict,
            402,
            r#"{"detail":"Balance is negative (42)"}"#,
        )
        .unwrap_err();
        match err {
            Error::NegativeBalance { balance, detail } => {
                assert_eq!(balance, Some(42));
                assert_eq!(detail.as_deref(), Some("Balance is negative (42)"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_extract_detail_variants() {
        assert_eq!(extract_detail(r#"{"detail":"x"}"#).as_deref(), Some("x"));
        assert_eq!(
            extract_detail(r#"{"detail":[{"msg":"bad"}]}"#).as_deref(),
            Some(r#"[{"msg":"bad"}]"#)
        );
        assert_eq!(extract_detail("plain text").as_deref(), Some("plain text"));
        assert_eq!(extract_detail(r#"{"other":1}"#), None);
        assert_eq!(extract_detail("  "), None);
    }

    #[test]
    fn test_unknown_keeps_status_and_body() {
        let err = classify_response(Operation::Predict, 503, "down").unwrap_err();
        match err {
            Error::UnknownServiceError { status, body } => {
                assert_eq!((status, body.as_str()), (503, "down"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
