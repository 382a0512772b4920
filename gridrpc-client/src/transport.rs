//! Transport seam and the HTTP implementation
//!
//! A [`Transport`] moves one already-numbered [`RpcRequest`] to the daemon
//! and reduces the reply to its `result`, classifying every failure into a
//! [`gridrpc_core::Error`]. It never assigns ids and never retries; both are
//! the client's concern.
//!
//! # Failure Classification
//!
//! [`HttpTransport`] applies this order:
//!
//! 1. Connection could not be established → `Error::Connection`
//! 2. Timeout exceeded → `Error::Timeout`
//! 3. Non-2xx status → `Error::HttpStatus`
//! 4. Body is not a JSON-RPC object → `Error::Decode`
//! 5. Non-null `error` member → `Error::Protocol`
//! 6. Otherwise the `result` member
//!
//! Any other failure of the HTTP stack is reported as `Error::Http` with the
//! library's message preserved.

use crate::config::RpcConfig;
use async_trait::async_trait;
use gridrpc_core::{codec, Error, Result, RpcRequest};
use reqwest::header::CONTENT_TYPE;
use serde_json::Value;
use std::fmt;
use std::sync::Arc;
use std::time::Duration;

/// Carries one JSON-RPC request to the daemon
///
/// Implementations must be safe to call concurrently.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Send the request and return the daemon's `result` member
    async fn dispatch(&self, request: &RpcRequest) -> Result<Value>;
}

#[async_trait]
impl<T: Transport + ?Sized> Transport for Arc<T> {
    async fn dispatch(&self, request: &RpcRequest) -> Result<Value> {
        (**self).dispatch(request).await
    }
}

#[async_trait]
impl<T: Transport + ?Sized> Transport for Box<T> {
    async fn dispatch(&self, request: &RpcRequest) -> Result<Value> {
        (**self).dispatch(request).await
    }
}

/// JSON-RPC over HTTP POST with Basic authentication
///
/// Wraps a pooled `reqwest::Client`. Pooling only reuses sockets; no session
/// state is kept between calls.
pub struct HttpTransport {
    http_client: reqwest::Client,
    url: String,
    username: String,
    password: String,
    timeout: Duration,
}

impl HttpTransport {
    pub fn new(config: &RpcConfig) -> Result<Self> {
        let http_client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| Error::Http(format!("failed to build HTTP client: {}", e)))?;

        Ok(Self {
            http_client,
            url: config.url(),
            username: config.username.clone(),
            password: config.password.clone(),
            timeout: config.timeout,
        })
    }

    /// Endpoint requests are posted to
    pub fn url(&self) -> &str {
        &self.url
    }

    fn classify(&self, error: reqwest::Error) -> Error {
        if error.is_connect() {
            Error::Connection(error.to_string())
        } else if error.is_timeout() {
            Error::Timeout(self.timeout)
        } else {
            Error::Http(error.to_string())
        }
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn dispatch(&self, request: &RpcRequest) -> Result<Value> {
        let body = codec::encode_request(request)?;

        let response = self
            .http_client
            .post(&self.url)
            .basic_auth(&self.username, Some(&self.password))
            .header(CONTENT_TYPE, "application/json")
            .body(body)
            .send()
            .await
            .map_err(|e| self.classify(e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(Error::HttpStatus {
                status: status.as_u16(),
                reason: status.canonical_reason().unwrap_or_default().to_string(),
            });
        }

        let text = response.text().await.map_err(|e| self.classify(e))?;
        codec::decode_reply(&text)
    }
}

impl fmt::Debug for HttpTransport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HttpTransport")
            .field("url", &self.url)
            .field("username", &self.username)
            .field("timeout", &self.timeout)
            .finish_non_exhaustive()
    }
}
