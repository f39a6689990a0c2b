//! 传输层：可注入的 HTTP 抽象及其基于 reqwest 的默认实现。
//!
//! HTTP transport seam.
//!
//! The client never talks to `reqwest` directly. It hands an [`ApiRequest`] to a
//! [`Transport`] (or [`BlockingTransport`]) and classifies the [`ApiResponse`] it
//! gets back. Timeouts, TLS and connection pooling belong to the transport;
//! retries, if any, belong to whoever wraps it.

mod http;

#[cfg(feature = "blocking")]
mod blocking;

pub use http::HttpTransport;

#[cfg(feature = "blocking")]
pub use blocking::BlockingHttpTransport;

use async_trait::async_trait;
use bytes::Bytes;
use std::fmt;
use url::Url;

use crate::Result;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HttpMethod {
    Get,
    Put,
    Post,
}

impl HttpMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Put => "PUT",
            HttpMethod::Post => "POST",
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A fully built request: absolute URL, credentials and optional JSON body.
#[derive(Clone, PartialEq)]
pub struct ApiRequest {
    pub method: HttpMethod,
    pub url: Url,
    pub bearer_token: String,
    pub body: Option<serde_json::Value>,
}

// Keeps the token out of logs and panic messages.
impl fmt::Debug for ApiRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ApiRequest")
            .field("method", &self.method)
            .field("url", &self.url.as_str())
            .field("bearer_token", &"<redacted>")
            .field("body", &self.body)
            .finish()
    }
}

/// A completed HTTP exchange, whatever its status.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiResponse {
    pub status: u16,
    pub body: String,
}

impl ApiResponse {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }
}

/// Asynchronous request issuance.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Send the request and return the response for any status.
    ///
    /// Errors are reserved for failures where no response arrived.
    async fn execute(&self, request: ApiRequest) -> Result<ApiResponse>;

    /// Download a resource without credentials.
    async fn fetch_bytes(&self, url: &str) -> Result<Bytes>;
}

/// Blocking request issuance, same contract as [`Transport`].
#[cfg(feature = "blocking")]
pub trait BlockingTransport: Send + Sync {
    fn execute(&self, request: ApiRequest) -> Result<ApiResponse>;

    fn fetch_bytes(&self, url: &str) -> Result<Bytes>;
}

#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Download of {url} failed with HTTP {status}")]
    Status { status: u16, url: String },

    #[error("Transport error: {0}")]
    Other(String),
}
