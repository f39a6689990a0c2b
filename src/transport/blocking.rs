use bytes::Bytes;
use std::time::Duration;
use tracing::debug;

use super::{ApiRequest, ApiResponse, BlockingTransport, HttpMethod, TransportError};
use crate::Result;

/// Default blocking transport backed by `reqwest::blocking`.
///
/// Must not be constructed or dropped inside an async runtime.
#[derive(Debug, Clone)]
pub struct BlockingHttpTransport {
    client: reqwest::blocking::Client,
}

impl BlockingHttpTransport {
    pub fn new(timeout: Duration) -> Result<Self> {
        let client = reqwest::blocking::Client::builder()
            .timeout(timeout)
            .pool_idle_timeout(Some(Duration::from_secs(90)))
            .user_agent(crate::DEFAULT_SOURCE)
            .build()
            .map_err(|e| crate::Error::Transport(TransportError::Other(e.to_string())))?;
        Ok(Self { client })
    }

    pub fn from_client(client: reqwest::blocking::Client) -> Self {
        Self { client }
    }
}

impl BlockingTransport for BlockingHttpTransport {
    fn execute(&self, request: ApiRequest) -> Result<ApiResponse> {
        let mut req = match request.method {
            HttpMethod::Get => self.client.get(request.url.clone()),
            HttpMethod::Put => self.client.put(request.url.clone()),
            HttpMethod::Post => self.client.post(request.url.clone()),
        };
        req = req.bearer_auth(&request.bearer_token);
        if let Some(body) = &request.body {
            req = req.json(body);
        }

        let response = req
            .send()
            .map_err(|e| crate::Error::Transport(TransportError::Http(e)))?;
        let status = response.status().as_u16();
        let body = response
            .text()
            .map_err(|e| crate::Error::Transport(TransportError::Http(e)))?;
        debug!(method = %request.method, status, "response received");

        Ok(ApiResponse { status, body })
    }

    fn fetch_bytes(&self, url: &str) -> Result<Bytes> {
        let response = self
            .client
            .get(url)
            .send()
            .map_err(|e| crate::Error::Transport(TransportError::Http(e)))?;
        let status = response.status();
        if !status.is_success() {
            return Err(crate::Error::Transport(TransportError::Status {
                status: status.as_u16(),
                url: url.to_string(),
            }));
        }
        response
            .bytes()
            .map_err(|e| crate::Error::Transport(TransportError::Http(e)))
    }
}
