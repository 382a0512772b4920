//! gridrpc - JSON-RPC client toolkit for Gridcoin wallet daemons
//!
//! This is the main convenience crate that re-exports the gridrpc sub-crates.
//!
//! # Architecture
//!
//! - **gridrpc-core**: wire types, codec, outcome envelope, error taxonomy,
//!   parameter parsing, observability
//! - **gridrpc-client**: HTTP transport, request catalog, bundles, ad-hoc calls
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use gridrpc::{RpcClient, RpcConfig};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = RpcClient::new(RpcConfig::from_env()?)?;
//!
//!     let dashboard = client.fetch_dashboard_bundle().await;
//!     println!("{}", serde_json::to_string_pretty(&dashboard)?);
//!
//!     Ok(())
//! }
//! ```

pub use gridrpc_client as client;
pub use gridrpc_core as core;

pub use gridrpc_client::{AggregatedResult, Bundle, ClientBuilder, Query, RpcClient, RpcConfig};
pub use gridrpc_core::{Error, ErrorKind, RpcOutcome};
