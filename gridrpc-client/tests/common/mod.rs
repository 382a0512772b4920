//! Common test utilities for gridrpc-client integration tests
//!
//! This module provides simulated daemons and a scripted transport so client
//! behavior can be tested without a running Gridcoin node.

#![allow(dead_code)]

use async_trait::async_trait;
use gridrpc_client::{RpcClient, RpcConfig, Transport};
use gridrpc_core::{Error, Result, RpcRequest};
use mockito::{Matcher, Mock, ServerGuard};
use serde_json::{json, Value};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;
use tokio::net::TcpListener;

pub const RPC_USER: &str = "user";
pub const RPC_PASSWORD: &str = "pass";
/// `Basic base64("user:pass")`
pub const BASIC_AUTH: &str = "Basic dXNlcjpwYXNz";

/// Simulated daemon speaking HTTP, backed by mockito
pub struct MockDaemon {
    pub server: ServerGuard,
}

impl MockDaemon {
    pub async fn start() -> Self {
        Self {
            server: mockito::Server::new_async().await,
        }
    }

    /// Connection settings pointing at this daemon
    pub fn config(&self) -> RpcConfig {
        let host_with_port = self.server.host_with_port();
        let (host, port) = host_with_port
            .rsplit_once(':')
            .expect("mockito address has a port");
        RpcConfig::new(host, port.parse().expect("numeric port"))
            .with_credentials(RPC_USER, RPC_PASSWORD)
            .with_timeout(Duration::from_secs(5))
    }

    pub fn client(&self) -> RpcClient {
        RpcClient::new(self.config()).unwrap()
    }

    /// Answer calls to `method` with a successful result
    pub async fn on_method(&mut self, method: &str, result: Value) -> Mock {
        self.server
            .mock("POST", "/")
            .match_body(Matcher::PartialJson(json!({"method": method})))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(result_body(result))
            .create_async()
            .await
    }

    /// Answer calls to `method` with a JSON-RPC error object
    pub async fn on_method_error(&mut self, method: &str, code: i64, message: &str) -> Mock {
        self.server
            .mock("POST", "/")
            .match_body(Matcher::PartialJson(json!({"method": method})))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(error_body(code, message))
            .create_async()
            .await
    }

    /// Answer every call with a raw status and body
    pub async fn respond_raw(&mut self, status: usize, body: &str) -> Mock {
        self.server
            .mock("POST", "/")
            .with_status(status)
            .with_body(body)
            .create_async()
            .await
    }
}

/// Success reply in the daemon's format
pub fn result_body(result: Value) -> String {
    json!({"result": result, "error": null, "id": 1}).to_string()
}

/// Error reply in the daemon's format
pub fn error_body(code: i64, message: &str) -> String {
    json!({"result": null, "error": {"code": code, "message": message}, "id": 1}).to_string()
}

/// Settings for a port nobody listens on
pub fn refused_config() -> RpcConfig {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let port = listener.local_addr().unwrap().port();
    drop(listener);

    RpcConfig::new("127.0.0.1", port)
        .with_credentials(RPC_USER, RPC_PASSWORD)
        .with_timeout(Duration::from_secs(5))
}

/// Daemon that accepts connections and never answers
///
/// Returns settings with the given timeout pointing at it. Accepted sockets
/// are held open for the life of the runtime.
pub async fn silent_daemon(timeout: Duration) -> RpcConfig {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let port = listener.local_addr().unwrap().port();

    tokio::spawn(async move {
        let mut held = Vec::new();
        while let Ok((stream, _)) = listener.accept().await {
            held.push(stream);
        }
    });

    RpcConfig::new("127.0.0.1", port)
        .with_credentials(RPC_USER, RPC_PASSWORD)
        .with_timeout(timeout)
}

type Responder = Box<dyn Fn(&RpcRequest) -> Result<Value> + Send + Sync>;

/// In-memory transport answering from a closure and recording every request
pub struct ScriptedTransport {
    responder: Responder,
    requests: Mutex<Vec<RpcRequest>>,
    calls: AtomicUsize,
}

impl ScriptedTransport {
    pub fn new<F>(responder: F) -> Self
    where
        F: Fn(&RpcRequest) -> Result<Value> + Send + Sync + 'static,
    {
        Self {
            responder: Box::new(responder),
            requests: Mutex::new(Vec::new()),
            calls: AtomicUsize::new(0),
        }
    }

    /// Echo the method name back as the result
    pub fn echo() -> Self {
        Self::new(|request| Ok(json!(request.method)))
    }

    /// Fail calls to the listed methods with a refused connection
    pub fn failing(methods: &'static [&'static str]) -> Self {
        Self::new(move |request| {
            if methods.iter().any(|m| *m == request.method) {
                Err(Error::Connection("connection refused".to_string()))
            } else {
                Ok(json!({"method": request.method}))
            }
        })
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn requests(&self) -> Vec<RpcRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub fn ids(&self) -> Vec<u64> {
        self.requests().iter().map(|r| r.id).collect()
    }

    pub fn last_request(&self) -> Option<RpcRequest> {
        self.requests.lock().unwrap().last().cloned()
    }
}

#[async_trait]
impl Transport for ScriptedTransport {
    async fn dispatch(&self, request: &RpcRequest) -> Result<Value> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.requests.lock().unwrap().push(request.clone());
        // Give other in-flight calls a chance to interleave
        tokio::task::yield_now().await;
        (self.responder)(request)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_result_body_format() {
        let body: Value = serde_json::from_str(&result_body(json!({"blocks": 1}))).unwrap();
        assert_eq!(body["result"]["blocks"], 1);
        assert!(body["error"].is_null());
    }

    #[test]
    fn test_error_body_format() {
        let body: Value = serde_json::from_str(&error_body(-1, "x")).unwrap();
        assert_eq!(body["error"], json!({"code": -1, "message": "x"}));
    }
}
