//! Client builder for configuring observability and the transport
//!
//! The `ClientBuilder` provides a fluent API for configuring client behavior
//! before construction. It allows you to:
//! - Initialize logging, tracing and metrics export (OpenTelemetry)
//! - Record client metrics against an already installed meter provider
//! - Set the service name used for telemetry
//! - Swap the HTTP transport for another [`Transport`]
//!
//! # Examples
//!
//! ```rust,no_run
//! use gridrpc_client::{ClientBuilder, RpcConfig};
//!
//! # fn plain() -> gridrpc_core::Result<()> {
//! // Plain client, usable from sync code
//! let client = ClientBuilder::new(RpcConfig::from_env()?).build()?;
//! # Ok(())
//! # }
//!
//! // OTLP export runs on tokio, so build observed clients inside a runtime
//! #[tokio::main]
//! async fn main() -> gridrpc_core::Result<()> {
//!     let observed = ClientBuilder::new(RpcConfig::from_env()?)
//!         .with_default_observability()
//!         .service_name("wallet-dashboard")
//!         .build()?;
//!     Ok(())
//! }
//! ```

use crate::config::RpcConfig;
use crate::metrics::ClientMetrics;
use crate::transport::{HttpTransport, Transport};
use crate::RpcClient;
use gridrpc_core::{Error, ObservabilityConfig, Result};
use std::sync::Arc;

/// Builder for configuring and creating an RpcClient
pub struct ClientBuilder {
    config: RpcConfig,
    observability_config: Option<ObservabilityConfig>,
    enable_metrics: bool,
    service_name: Option<String>,
}

impl ClientBuilder {
    pub fn new(config: RpcConfig) -> Self {
        Self {
            config,
            observability_config: None,
            enable_metrics: false,
            service_name: None,
        }
    }

    /// Initialize observability with a custom configuration on build
    ///
    /// Installs the global tracing subscriber, so at most one client per
    /// process should be built this way. With traces or metrics enabled,
    /// `build` must run inside a tokio runtime or it fails with
    /// [`Error::Config`].
    pub fn with_observability(mut self, config: ObservabilityConfig) -> Self {
        self.observability_config = Some(config);
        self
    }

    /// Initialize observability with the default configuration on build
    pub fn with_default_observability(mut self) -> Self {
        self.observability_config = Some(ObservabilityConfig::default());
        self
    }

    /// Record client metrics without initializing observability
    ///
    /// For applications that install their own subscriber and meter provider.
    pub fn with_metrics(mut self) -> Self {
        self.enable_metrics = true;
        self
    }

    /// Set service name for observability (used if observability is enabled)
    pub fn service_name(mut self, name: impl Into<String>) -> Self {
        self.service_name = Some(name.into());
        self
    }

    /// Build a client talking HTTP to the configured daemon
    pub fn build(self) -> Result<RpcClient<HttpTransport>> {
        let transport = HttpTransport::new(&self.config)?;
        self.build_with_transport(transport)
    }

    /// Build a client over a custom transport
    ///
    /// Connection settings other than `max_in_flight` are ignored; the
    /// transport brings its own.
    pub fn build_with_transport<T: Transport>(self, transport: T) -> Result<RpcClient<T>> {
        let metrics = self.init_metrics()?;

        tracing::info!(
            daemon = %self.config.url(),
            timeout_secs = self.config.timeout.as_secs_f64(),
            max_in_flight = self.config.max_in_flight,
            "RPC client created"
        );

        Ok(RpcClient::from_parts(
            transport,
            self.config.max_in_flight,
            metrics,
        ))
    }

    fn init_metrics(&self) -> Result<Option<Arc<ClientMetrics>>> {
        match &self.observability_config {
            Some(config) => {
                let mut config = config.clone();
                if let Some(name) = &self.service_name {
                    config.service_name = name.clone();
                }

                gridrpc_core::init_observability(config.clone()).map_err(|e| {
                    Error::Config(format!("failed to initialize observability: {}", e))
                })?;

                Ok(Some(Arc::new(ClientMetrics::new(config.service_name))))
            }
            None if self.enable_metrics => {
                let name = self
                    .service_name
                    .clone()
                    .unwrap_or_else(|| "gridrpc".to_string());
                Ok(Some(Arc::new(ClientMetrics::new(name))))
            }
            None => Ok(None),
        }
    }
}
