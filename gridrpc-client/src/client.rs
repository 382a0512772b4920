//! RPC client handle
//!
//! `RpcClient` owns the transport and the request id counter. Every public
//! call returns an [`RpcOutcome`]; transport, protocol and decode failures
//! are data, never `Err` and never panics.
//!
//! # Request Ids
//!
//! Ids start at 1 and come from one atomic counter per client instance.
//! Each transport call consumes exactly one id whether it succeeds or not,
//! and concurrent calls always get distinct ids.
//!
//! # Cloning
//!
//! `RpcClient` is cheaply cloneable. All clones share the same transport and
//! counter, so one instance can be created at startup and handed to every
//! request handler of the embedding application.

use crate::config::{RpcConfig, DEFAULT_MAX_IN_FLIGHT};
use crate::metrics::ClientMetrics;
use crate::transport::{HttpTransport, Transport};
use crate::ClientBuilder;
use gridrpc_core::{params::parse_params, Error, ErrorKind, Result, RpcOutcome, RpcRequest};
use serde_json::Value;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Instant;

/// JSON-RPC client for one daemon
pub struct RpcClient<T = HttpTransport> {
    transport: Arc<T>,
    /// Last id handed out; the next call uses this plus one
    last_id: Arc<AtomicU64>,
    max_in_flight: usize,
    metrics: Option<Arc<ClientMetrics>>,
}

impl<T> Clone for RpcClient<T> {
    fn clone(&self) -> Self {
        Self {
            transport: self.transport.clone(),
            last_id: self.last_id.clone(),
            max_in_flight: self.max_in_flight,
            metrics: self.metrics.clone(),
        }
    }
}

impl RpcClient<HttpTransport> {
    /// Create an HTTP client without observability
    pub fn new(config: RpcConfig) -> Result<Self> {
        ClientBuilder::new(config).build()
    }

    /// Start configuring a client
    pub fn builder(config: RpcConfig) -> ClientBuilder {
        ClientBuilder::new(config)
    }
}

impl<T: Transport> RpcClient<T> {
    /// Wrap an arbitrary transport with default settings
    pub fn with_transport(transport: T) -> Self {
        Self::from_parts(transport, DEFAULT_MAX_IN_FLIGHT, None)
    }

    pub(crate) fn from_parts(
        transport: T,
        max_in_flight: usize,
        metrics: Option<Arc<ClientMetrics>>,
    ) -> Self {
        Self {
            transport: Arc::new(transport),
            last_id: Arc::new(AtomicU64::new(0)),
            max_in_flight: max_in_flight.max(1),
            metrics,
        }
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Bound on concurrently dispatched bundle calls
    pub fn max_in_flight(&self) -> usize {
        self.max_in_flight
    }

    pub(crate) fn metrics(&self) -> Option<&ClientMetrics> {
        self.metrics.as_deref()
    }

    fn next_id(&self) -> u64 {
        self.last_id.fetch_add(1, Ordering::SeqCst) + 1
    }

    /// Send one JSON-RPC call and wrap the reply in an outcome
    #[tracing::instrument(skip(self, params), fields(id = tracing::field::Empty))]
    pub async fn send(&self, method: &str, params: Vec<Value>) -> RpcOutcome {
        let start = Instant::now();
        let id = self.next_id();
        tracing::Span::current().record("id", id);

        let request = RpcRequest::new(id, method, params);
        let result = self.transport.dispatch(&request).await;
        let duration = start.elapsed().as_secs_f64();

        match &result {
            Ok(_) => {
                if let Some(m) = self.metrics() {
                    m.record_request(method, "success", duration);
                }
                tracing::debug!(duration_secs = duration, "RPC call completed");
            }
            Err(error) => {
                if let Some(m) = self.metrics() {
                    m.record_request(method, "error", duration);
                    m.record_error(error.kind());
                }
                tracing::warn!(kind = %error.kind(), error = %error, "RPC call failed");
            }
        }

        RpcOutcome::from(result)
    }

    /// Run an operator-entered command
    ///
    /// `raw_params` may be an array or free text (see
    /// [`parse_params`](gridrpc_core::params::parse_params)). An empty method
    /// name fails with `invocation-error` before anything is sent, and no
    /// request id is consumed. Any other name goes on the wire unchanged.
    pub async fn execute_ad_hoc(&self, method: &str, raw_params: &Value) -> RpcOutcome {
        if method.is_empty() {
            if let Some(m) = self.metrics() {
                m.record_error(ErrorKind::InvocationError);
            }
            tracing::warn!("Rejected ad-hoc call without a method name");
            return RpcOutcome::failure(Error::Invocation("Method is required".to_string()));
        }

        let params = parse_params(raw_params);
        self.send(method, params).await
    }
}
