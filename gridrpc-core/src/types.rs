//! JSON-RPC message types and the outcome envelope
//!
//! This module provides the data structures exchanged with the daemon and
//! handed back to callers:
//!
//! - [`RpcRequest`]: the JSON-RPC 2.0 request envelope
//! - [`RpcResponse`]: the daemon's reply envelope
//! - [`RpcOutcome`]: the uniform success/failure envelope every call returns
//! - [`ErrorDetail`]: the failure half of the envelope
//!
//! # Outcome Envelope
//!
//! Callers never see a raised fault for an expected failure. Every call
//! returns an `RpcOutcome`, which serializes to the shape the presentation
//! layer renders:
//!
//! ```json
//! {"success": true, "data": {"blocks": 3123456}}
//! {"success": false, "error": {"kind": "transport-timeout", "message": "..."}}
//! ```

use crate::error::{Error, ErrorKind, JsonRpcErrorData};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// JSON-RPC protocol version sent with every request
pub const JSONRPC_VERSION: &str = "2.0";

/// JSON-RPC 2.0 request envelope
///
/// Gridcoin takes positional parameters only, so `params` is always an
/// array (possibly empty) and is always serialized.
///
/// # Examples
///
/// ```rust
/// use gridrpc_core::RpcRequest;
/// use serde_json::json;
///
/// let request = RpcRequest::new(7, "listtransactions", vec![json!("*"), json!(10)]);
/// let body = serde_json::to_value(&request).unwrap();
/// assert_eq!(body, json!({"jsonrpc": "2.0", "id": 7, "method": "listtransactions", "params": ["*", 10]}));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RpcRequest {
    /// Protocol version, always "2.0"
    pub jsonrpc: String,
    /// Request id, unique per client instance
    pub id: u64,
    /// Daemon method name
    pub method: String,
    /// Positional parameters
    pub params: Vec<Value>,
}

impl RpcRequest {
    pub fn new(id: u64, method: impl Into<String>, params: Vec<Value>) -> Self {
        Self {
            jsonrpc: JSONRPC_VERSION.to_string(),
            id,
            method: method.into(),
            params,
        }
    }
}

/// Reply envelope as sent by the daemon
///
/// Every member is optional: Bitcoin-derived daemons omit `jsonrpc` and may
/// echo `id` as `null`. Decoding does not validate the version.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RpcResponse {
    #[serde(default)]
    pub result: Option<Value>,
    #[serde(default)]
    pub error: Option<Value>,
    #[serde(default)]
    pub id: Option<Value>,
}

impl RpcResponse {
    /// Reduce the reply to its result, or to a protocol error when the
    /// daemon reported one
    ///
    /// A missing `result` member reads as `null`.
    pub fn into_result(self) -> crate::Result<Value> {
        match self.error {
            Some(error) if !error.is_null() => Err(Error::protocol(error)),
            _ => Ok(self.result.unwrap_or(Value::Null)),
        }
    }
}

/// Failure half of the outcome envelope
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorDetail {
    /// Failure classification
    pub kind: ErrorKind,
    /// Human-readable description
    pub message: String,
    /// Original daemon `error` payload, present only for protocol errors
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub raw: Option<Value>,
}

impl ErrorDetail {
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            raw: None,
        }
    }

    /// Typed view of the daemon's error object, when this is a protocol
    /// error with the standard `{code, message}` shape
    pub fn protocol_error(&self) -> Option<JsonRpcErrorData> {
        self.raw.as_ref().and_then(JsonRpcErrorData::from_value)
    }
}

impl From<Error> for ErrorDetail {
    fn from(error: Error) -> Self {
        let kind = error.kind();
        match error {
            Error::Protocol { message, raw } => Self {
                kind,
                message,
                raw: Some(raw),
            },
            other => Self::new(kind, other.to_string()),
        }
    }
}

/// Uniform result of one RPC call
///
/// Exactly one of `data` and `error` is populated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(into = "OutcomeRepr", try_from = "OutcomeRepr")]
pub enum RpcOutcome {
    Success { data: Value },
    Failure { error: ErrorDetail },
}

impl RpcOutcome {
    pub fn success(data: Value) -> Self {
        RpcOutcome::Success { data }
    }

    pub fn failure(error: impl Into<ErrorDetail>) -> Self {
        RpcOutcome::Failure {
            error: error.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, RpcOutcome::Success { .. })
    }

    pub fn is_failure(&self) -> bool {
        matches!(self, RpcOutcome::Failure { .. })
    }

    /// The result payload of a successful call
    pub fn data(&self) -> Option<&Value> {
        match self {
            RpcOutcome::Success { data } => Some(data),
            RpcOutcome::Failure { .. } => None,
        }
    }

    /// The error detail of a failed call
    pub fn error(&self) -> Option<&ErrorDetail> {
        match self {
            RpcOutcome::Success { .. } => None,
            RpcOutcome::Failure { error } => Some(error),
        }
    }

    /// Failure classification, `None` on success
    pub fn kind(&self) -> Option<ErrorKind> {
        self.error().map(|e| e.kind)
    }

    pub fn into_result(self) -> std::result::Result<Value, ErrorDetail> {
        match self {
            RpcOutcome::Success { data } => Ok(data),
            RpcOutcome::Failure { error } => Err(error),
        }
    }
}

impl From<crate::Result<Value>> for RpcOutcome {
    fn from(result: crate::Result<Value>) -> Self {
        match result {
            Ok(data) => RpcOutcome::success(data),
            Err(error) => RpcOutcome::failure(error),
        }
    }
}

/// Wire shape of [`RpcOutcome`]
#[derive(Serialize, Deserialize)]
struct OutcomeRepr {
    success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    data: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    error: Option<ErrorDetail>,
}

impl From<RpcOutcome> for OutcomeRepr {
    fn from(outcome: RpcOutcome) -> Self {
        match outcome {
            // `data` is kept even when null so a null result stays visible
            RpcOutcome::Success { data } => Self {
                success: true,
                data: Some(data),
                error: None,
            },
            RpcOutcome::Failure { error } => Self {
                success: false,
                data: None,
                error: Some(error),
            },
        }
    }
}

impl TryFrom<OutcomeRepr> for RpcOutcome {
    type Error = String;

    fn try_from(repr: OutcomeRepr) -> std::result::Result<Self, Self::Error> {
        match (repr.success, repr.error) {
            (true, None) => Ok(RpcOutcome::success(repr.data.unwrap_or(Value::Null))),
            (false, Some(error)) => Ok(RpcOutcome::Failure { error }),
            (true, Some(_)) => Err("successful outcome must not carry an error".to_string()),
            (false, None) => Err("failed outcome must carry an error".to_string()),
        }
    }
}
