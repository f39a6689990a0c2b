//! Mock HTTP server setup for integration tests

use mockito::{Mock, Server, ServerGuard};
use suvvy_api::DialogueClient;

pub const TOKEN: &str = "test-token";

/// Test fixture that manages a mock server
pub struct MockServerFixture {
    pub server: ServerGuard,
    pub base_url: String,
}

impl MockServerFixture {
    pub async fn new_async() -> Self {
        let server = Server::new_async().await;
        let base_url = server.url();
        Self { server, base_url }
    }

    /// For blocking tests; must not run inside an async runtime.
    pub fn new() -> Self {
        let server = Server::new();
        let base_url = server.url();
        Self { server, base_url }
    }

    /// Create a test client with the mock server as base URL
    pub fn client(&self) -> DialogueClient {
        DialogueClient::builder()
            .without_env()
            .api_token(TOKEN)
            .base_url(&self.base_url)
            .source("tests")
            .build()
            .expect("client builds")
    }

    #[cfg(feature = "blocking")]
    pub fn blocking_client(&self) -> suvvy_api::blocking::DialogueClient {
        DialogueClient::builder()
            .without_env()
            .api_token(TOKEN)
            .base_url(&self.base_url)
            .source("tests")
            .build_blocking()
            .expect("blocking client builds")
    }

    /// Create a mock answering `method path` with a JSON body
    pub async fn mock_json(&mut self, method: &str, path: &str, status: usize, body: &str) -> Mock {
        self.server
            .mock(method, path)
            .match_header("authorization", format!("Bearer {}", TOKEN).as_str())
            .with_status(status)
            .with_header("content-type", "application/json")
            .with_body(body)
            .create_async()
            .await
    }

    pub fn mock_json_blocking(&mut self, method: &str, path: &str, status: usize, body: &str) -> Mock {
        self.server
            .mock(method, path)
            .match_header("authorization", format!("Bearer {}", TOKEN).as_str())
            .with_status(status)
            .with_header("content-type", "application/json")
            .with_body(body)
            .create()
    }
}

pub fn dialogue_json(unique_id: &str) -> String {
    serde_json::json!({
        "dialogue_id": "65f0c0a1b2c3d4e5f6a7b8c9",
        "messages": [message_json("6f1c2a3e-8a44-4b8e-9a7c-1d2e3f4a5b6c", "customer", "Привет!")],
        "unique_id": unique_id,
        "user_id": 7,
        "instance_id": 3,
        "source": "tests",
        "is_stopped": false,
        "stopped_at": null,
        "stop_reason": null,
        "is_deleted": false,
        "deleted_at": null,
        "created_at": "2024-03-01T12:00:00.000000",
        "channel_name": "api"
    })
    .to_string()
}

pub fn message_json(id: &str, sender: &str, text: &str) -> serde_json::Value {
    serde_json::json!({
        "message_id": id,
        "tokens": 12,
        "created_at": "2024-03-01T12:00:01+00:00",
        "message_sender": sender,
        "message_data": {"data_type": "text", "content": text}
    })
}

pub fn prediction_json(texts: &[&str]) -> String {
    let messages: Vec<_> = texts
        .iter()
        .enumerate()
        .map(|(i, t)| message_json(&format!("00000000-0000-4000-8000-00000000000{}", i), "ai", t))
        .collect();
    serde_json::json!({
        "token_usage": {"prompt_tokens": 100, "completion_tokens": 20, "total_tokens": 120},
        "balance_usage": {
            "prompt_tokens": 100,
            "completion_tokens": 20,
            "knowledge_usage": 5,
            "function_usage": 0,
            "total_tokens": 125,
            "token_multiplier": 1.5
        },
        "new_messages": messages
    })
    .to_string()
}
