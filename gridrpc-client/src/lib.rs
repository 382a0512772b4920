//! JSON-RPC client for Gridcoin daemons over authenticated HTTP
//!
//! This crate provides the client half of gridrpc: a shared client handle,
//! the catalog of daemon operations, and bundles that fetch several
//! operations for one view at once.
//!
//! # Core Features
//!
//! - **HTTP Transport**: JSON-RPC 2.0 POST with Basic auth and a per-call timeout
//! - **Outcome Envelope**: every call returns an `RpcOutcome`; failures are data
//! - **Request Catalog**: typed wrappers for the daemon methods the views use
//! - **Bundles**: concurrent multi-call fetches with per-key failure isolation
//! - **Ad-hoc Calls**: operator-entered commands with free-text parameters
//! - **Observability**: tracing spans plus optional OpenTelemetry metrics
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use gridrpc_client::{RpcClient, RpcConfig};
//! use serde_json::json;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = RpcConfig::new("127.0.0.1", 15715).with_credentials("rpcuser", "rpcpass");
//!     let client = RpcClient::new(config)?;
//!
//!     // One catalog call
//!     let balance = client.get_balance().await;
//!     println!("{}", serde_json::to_string(&balance)?);
//!
//!     // The whole dashboard, failures isolated per key
//!     let dashboard = client.fetch_dashboard_bundle().await;
//!     println!("{}", serde_json::to_string_pretty(&dashboard)?);
//!
//!     // An operator command from the console
//!     let block = client.execute_ad_hoc("getblockbynumber", &json!("1000000")).await;
//!     println!("{}", serde_json::to_string(&block)?);
//!
//!     Ok(())
//! }
//! ```

mod bundle;
mod catalog;
mod client;
mod client_builder;
mod config;
mod metrics;
mod transport;

pub use bundle::{AggregatedResult, Bundle};
pub use catalog::{
    Query, UnspentFilter, DEFAULT_MAX_CONF, DEFAULT_MIN_CONF, DEFAULT_TRANSACTION_COUNT,
};
pub use client::RpcClient;
pub use client_builder::ClientBuilder;
pub use config::{RpcConfig, DEFAULT_HOST, DEFAULT_MAX_IN_FLIGHT, DEFAULT_PORT, DEFAULT_TIMEOUT};
pub use metrics::ClientMetrics;
pub use transport::{HttpTransport, Transport};
