//! Error types for gridrpc
//!
//! This module defines the failure vocabulary shared by every gridrpc crate:
//!
//! - **Error**: internal error type used with `?` while a call is in flight
//!   (uses thiserror)
//! - **ErrorKind**: the closed classification every failure is reduced to
//! - **JsonRpcErrorData**: typed view of the `error` object a daemon returns
//!
//! # Error Taxonomy
//!
//! Failures are classified in the order the transport encounters them:
//! - `transport-connection`: the daemon could not be reached
//! - `transport-timeout`: the call exceeded the configured timeout
//! - `transport-http-status`: the daemon answered with a non-2xx status
//! - `decode-error`: the body was not a JSON-RPC object
//! - `protocol-error`: the daemon reported an RPC-level error
//! - `invocation-error`: the caller supplied an invalid request
//! - `unexpected`: anything else, with its message preserved
//!
//! `Error` values never cross the client's public call surface. They are
//! converted into an [`ErrorDetail`](crate::ErrorDetail) inside an
//! [`RpcOutcome::Failure`](crate::RpcOutcome) at the boundary.
//!
//! # Examples
//!
//! ```rust
//! use gridrpc_core::{Error, ErrorKind};
//!
//! let error = Error::HttpStatus { status: 401, reason: "Unauthorized".into() };
//! assert_eq!(error.kind(), ErrorKind::TransportHttpStatus);
//! assert!(error.to_string().contains("401"));
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Result type for gridrpc operations
pub type Result<T> = std::result::Result<T, Error>;

/// Internal error type for gridrpc operations
///
/// Each variant maps onto exactly one [`ErrorKind`] through [`Error::kind`].
/// Variants carry strings rather than foreign error types so the enum stays
/// `Clone` and independent of the HTTP library.
#[derive(Debug, Clone, Error)]
pub enum Error {
    /// The TCP/HTTP connection to the daemon could not be established
    #[error("Connection failed - is the daemon running? ({0})")]
    Connection(String),

    /// The call did not complete within the configured timeout
    #[error("Request timed out after {0:?}")]
    Timeout(std::time::Duration),

    /// The daemon answered with a non-success HTTP status
    #[error("HTTP error: {status} {reason}")]
    HttpStatus {
        /// Numeric HTTP status code
        status: u16,
        /// Canonical reason phrase, empty when unknown
        reason: String,
    },

    /// The response body was not a JSON-RPC object
    #[error("Invalid JSON response from daemon: {0}")]
    Decode(String),

    /// The daemon returned a non-null `error` member
    ///
    /// `raw` is the payload exactly as received, whatever its shape.
    #[error("RPC error: {message}")]
    Protocol {
        /// Human-readable summary of the daemon error
        message: String,
        /// The original `error` member
        raw: serde_json::Value,
    },

    /// The caller supplied a request that cannot be sent
    #[error("Invalid invocation: {0}")]
    Invocation(String),

    /// Serialization of an outgoing message failed
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Invalid client configuration
    #[error("Invalid configuration: {0}")]
    Config(String),

    /// Any other failure of the HTTP stack
    #[error("HTTP client error: {0}")]
    Http(String),
}

impl Error {
    /// Build a protocol error from the daemon's `error` member
    ///
    /// When the payload is a well-formed JSON-RPC error object its code and
    /// message are used for the summary; otherwise the raw JSON text is.
    pub fn protocol(raw: serde_json::Value) -> Self {
        let message = match JsonRpcErrorData::from_value(&raw) {
            Some(data) => data.to_string(),
            None => raw.to_string(),
        };
        Error::Protocol { message, raw }
    }

    /// Classification of this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::Connection(_) => ErrorKind::TransportConnection,
            Error::Timeout(_) => ErrorKind::TransportTimeout,
            Error::HttpStatus { .. } => ErrorKind::TransportHttpStatus,
            Error::Decode(_) => ErrorKind::DecodeError,
            Error::Protocol { .. } => ErrorKind::ProtocolError,
            Error::Invocation(_) => ErrorKind::InvocationError,
            Error::Serialization(_) | Error::Config(_) | Error::Http(_) => ErrorKind::Unexpected,
        }
    }
}

/// Closed classification of call failures
///
/// Serialized in kebab-case (`"transport-timeout"`, `"protocol-error"`, ...)
/// so the presentation layer can switch on it directly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ErrorKind {
    TransportConnection,
    TransportTimeout,
    TransportHttpStatus,
    ProtocolError,
    DecodeError,
    InvocationError,
    Unexpected,
}

impl ErrorKind {
    /// Wire name of the kind, also used as a metric attribute
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::TransportConnection => "transport-connection",
            ErrorKind::TransportTimeout => "transport-timeout",
            ErrorKind::TransportHttpStatus => "transport-http-status",
            ErrorKind::ProtocolError => "protocol-error",
            ErrorKind::DecodeError => "decode-error",
            ErrorKind::InvocationError => "invocation-error",
            ErrorKind::Unexpected => "unexpected",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// JSON-RPC error object as returned by the daemon
///
/// Gridcoin follows the Bitcoin Core conventions: `code` is negative,
/// `message` is a short sentence. Some daemons attach a `data` member.
///
/// # Examples
///
/// ```rust
/// use gridrpc_core::JsonRpcErrorData;
/// use serde_json::json;
///
/// let raw = json!({"code": -5, "message": "Invalid Gridcoin address"});
/// let error = JsonRpcErrorData::from_value(&raw).unwrap();
/// assert_eq!(error.code, -5);
/// assert_eq!(error.to_string(), "[-5] Invalid Gridcoin address");
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JsonRpcErrorData {
    /// Numeric error code
    pub code: i32,

    /// Human-readable error message
    pub message: String,

    /// Optional additional error information
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<serde_json::Value>,
}

impl JsonRpcErrorData {
    /// Create a new JSON-RPC error with code and message
    pub fn new(code: i32, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            data: None,
        }
    }

    /// Create a new JSON-RPC error with additional data
    pub fn with_data(code: i32, message: impl Into<String>, data: serde_json::Value) -> Self {
        Self {
            code,
            message: message.into(),
            data: Some(data),
        }
    }

    /// Interpret a raw `error` member, if it has the standard shape
    pub fn from_value(raw: &serde_json::Value) -> Option<Self> {
        serde_json::from_value(raw.clone()).ok()
    }
}

impl fmt::Display for JsonRpcErrorData {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.code, self.message)
    }
}

impl std::error::Error for JsonRpcErrorData {}
