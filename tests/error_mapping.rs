//! Status-to-error mapping through an injected transport.

use async_trait::async_trait;
use bytes::Bytes;
use std::sync::{Arc, Mutex};
use suvvy_api::client::ClientConfig;
use suvvy_api::transport::{ApiRequest, ApiResponse, HttpMethod, Transport, TransportError};
use suvvy_api::{DialogueClient, Error, ErrorKind, PredictOptions, RequestMessage};

/// Answers every request with the same canned response and records what it saw.
#[derive(Default)]
struct CannedTransport {
    response: Option<ApiResponse>,
    seen: Mutex<Vec<ApiRequest>>,
}

impl CannedTransport {
    fn answering(status: u16, body: &str) -> Arc<Self> {
        Arc::new(Self {
            response: Some(ApiResponse::new(status, body)),
            seen: Mutex::new(Vec::new()),
        })
    }

    fn unreachable() -> Arc<Self> {
        Arc::new(Self::default())
    }

    fn requests(&self) -> Vec<ApiRequest> {
        self.seen.lock().unwrap().clone()
    }
}

#[async_trait]
impl Transport for CannedTransport {
    async fn execute(&self, request: ApiRequest) -> suvvy_api::Result<ApiResponse> {
        self.seen.lock().unwrap().push(request);
        self.response
            .clone()
            .ok_or_else(|| Error::Transport(TransportError::Other("connection refused".into())))
    }

    async fn fetch_bytes(&self, _url: &str) -> suvvy_api::Result<Bytes> {
        Ok(Bytes::new())
    }
}

fn client_with(transport: Arc<CannedTransport>) -> DialogueClient {
    DialogueClient::with_transport(ClientConfig::new("secret"), transport)
}

async fn predict_error(status: u16, body: &str) -> Error {
    client_with(CannedTransport::answering(status, body))
        .predict("u1", &PredictOptions::new())
        .await
        .unwrap_err()
}

#[tokio::test]
async fn test_status_table() {
    let cases = [
        (401, r#"{"detail":"bad token"}"#, ErrorKind::InvalidCredentials),
        (402, r#"{"detail":"Balance is negative (-3)"}"#, ErrorKind::NegativeBalance),
        (404, r#"{"detail":"not found"}"#, ErrorKind::DialogueNotFound),
        (406, r#"{"detail":"ai messages are not allowed"}"#, ErrorKind::InvalidMessageSubmission),
        (413, r#"{"detail":"Maximum token limit reached"}"#, ErrorKind::HistoryTooLong),
        (413, r#"{"detail":"Too many messages"}"#, ErrorKind::MessageLimitExceeded),
        (413, "", ErrorKind::MessageLimitExceeded),
        (500, "oops", ErrorKind::InternalServiceError),
        (418, "teapot", ErrorKind::UnknownServiceError),
        (503, "", ErrorKind::UnknownServiceError),
    ];

    for (status, body, expected) in cases {
        let err = predict_error(status, body).await;
        assert_eq!(err.kind(), expected, "HTTP {status} {body}");
    }
}

#[tokio::test]
async fn test_error_payloads() {
    match predict_error(402, r#"{"detail":"Balance is negative"}"#).await {
        Error::NegativeBalance { balance, detail } => {
            assert_eq!(balance, None);
            assert_eq!(detail.as_deref(), Some("Balance is negative"));
        }
        other => panic!("unexpected error: {other:?}"),
    }

    match predict_error(418, "<html>teapot</html>").await {
        Error::UnknownServiceError { status, body } => {
            assert_eq!(status, 418);
            assert_eq!(body, "<html>teapot</html>");
        }
        other => panic!("unexpected error: {other:?}"),
    }

    match predict_error(500, "plain failure").await {
        Error::InternalServiceError { detail } => {
            assert_eq!(detail.as_deref(), Some("plain failure"))
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn test_202_outside_prediction_is_success() {
    let transport = CannedTransport::answering(202, "{}");
    let client = client_with(transport.clone());

    assert!(client.check_connection().await.unwrap());

    let err = client.get_dialogue("u1").await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::MalformedResponse);
    assert_eq!(transport.requests().len(), 2);
}

#[tokio::test]
async fn test_requests_carry_method_and_token() {
    let transport = CannedTransport::answering(202, "");
    let client = client_with(transport.clone());

    client.reset_dialogue("u 1").await.unwrap();
    client
        .predict_add_message("u 1", RequestMessage::text("hi"), &PredictOptions::new())
        .await
        .unwrap();

    let seen = transport.requests();
    assert_eq!(seen[0].method, HttpMethod::Put);
    assert_eq!(seen[0].url.path(), "/api/dialogue/u%201/delete");
    assert!(seen[0].body.is_none());
    assert_eq!(seen[1].method, HttpMethod::Post);
    assert_eq!(seen[1].bearer_token, "secret");
    let body = seen[1].body.as_ref().unwrap();
    assert_eq!(body["source"], suvvy_api::DEFAULT_SOURCE);
    assert_eq!(body["messages"][0]["message_sender"], "customer");
}

#[tokio::test]
async fn test_transport_failure_is_not_retried() {
    let transport = CannedTransport::unreachable();
    let client = client_with(transport.clone());

    let err = client.predict("u1", &PredictOptions::new()).await.unwrap_err();

    assert_eq!(err.kind(), ErrorKind::Transport);
    assert_eq!(transport.requests().len(), 1);
}

#[tokio::test]
async fn test_invalid_configuration_fails_before_any_request() {
    let transport = CannedTransport::unreachable();

    let err = DialogueClient::builder()
        .without_env()
        .api_token("secret")
        .base_url("ftp://example.com")
        .transport(transport.clone())
        .build()
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Configuration);

    let err = DialogueClient::builder()
        .without_env()
        .base_url("https://api.example.com")
        .transport(transport.clone())
        .build()
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Configuration);

    assert!(RequestMessage::new(suvvy_api::SenderRole::Ai, "forged").is_err());
    assert!(transport.requests().is_empty());
}

#[tokio::test]
async fn test_dot_segment_unique_id_is_rejected_locally() {
    let transport = CannedTransport::answering(200, "{}");
    let client = client_with(transport.clone());

    for id in ["..", ".", ""] {
        let err = client.reset_dialogue(id).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Validation, "{id:?}");
        let err = client.get_dialogue(id).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Validation, "{id:?}");
    }
    assert!(transport.requests().is_empty());
}

#[test]
fn test_error_kind_metadata() {
    assert!(ErrorKind::InternalServiceError.retryable());
    assert!(ErrorKind::Transport.retryable());
    assert!(!ErrorKind::NegativeBalance.retryable());
    assert_eq!(ErrorKind::from_http_status(200), None);
    assert_eq!(ErrorKind::from_http_status(404), Some(ErrorKind::DialogueNotFound));
    assert_eq!(ErrorKind::from_http_status(429), Some(ErrorKind::UnknownServiceError));

    let err = Error::DialogueNotFound {
        detail: Some("no such dialogue".into()),
    };
    assert_eq!(err.to_string(), "Dialogue not found: no such dialogue");
}
