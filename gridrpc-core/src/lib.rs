//! Core JSON-RPC types, outcome envelope and parameter parsing for gridrpc
//!
//! This crate holds everything about talking to a Gridcoin daemon that does
//! not depend on a transport:
//!
//! - **Types**: the JSON-RPC request/reply envelopes and the [`RpcOutcome`]
//!   envelope handed back to callers
//! - **Codec**: request encoding and body-level reply classification
//! - **Error handling**: the failure taxonomy ([`ErrorKind`]) and the
//!   internal [`Error`] type
//! - **Params**: best-effort parsing of operator-entered parameters
//! - **Observability**: tracing subscriber and OpenTelemetry setup
//!
//! # Example
//!
//! ```rust
//! use gridrpc_core::{codec, params::parse_params, RpcOutcome, RpcRequest};
//!
//! let params = parse_params(&serde_json::json!("* 20"));
//! let request = RpcRequest::new(1, "listtransactions", params);
//! let body = codec::encode_request(&request).unwrap();
//! assert!(body.contains("\"params\":[\"*\",\"20\"]"));
//!
//! let outcome = RpcOutcome::from(codec::decode_reply(r#"{"result": [], "error": null, "id": 1}"#));
//! assert!(outcome.is_success());
//! ```

pub mod codec;
pub mod error;
pub mod observability;
pub mod params;
pub mod types;

pub use error::{Error, ErrorKind, JsonRpcErrorData, Result};
pub use observability::{init_observability, shutdown_observability, ObservabilityConfig};
pub use types::{ErrorDetail, RpcOutcome, RpcRequest, RpcResponse, JSONRPC_VERSION};
