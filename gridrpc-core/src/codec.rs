//! Codec for JSON-RPC request encoding and reply classification
//!
//! Encoding is plain serde. Decoding does more than deserialize: it applies
//! the body-level part of the failure classification, in order:
//!
//! 1. Body does not parse as JSON → `Error::Decode`
//! 2. Body parses but is not an object → `Error::Decode`
//! 3. Body carries a non-null `error` member → `Error::Protocol`
//! 4. Otherwise → the `result` member (`null` when absent)
//!
//! HTTP-level failures are classified by the transport before the body is
//! ever handed to this module.
//!
//! # Examples
//!
//! ```rust
//! use gridrpc_core::{codec, ErrorKind, RpcRequest};
//!
//! let request = RpcRequest::new(1, "getbalance", vec![]);
//! let body = codec::encode_request(&request).unwrap();
//! assert!(body.contains("\"method\":\"getbalance\""));
//!
//! let result = codec::decode_reply(r#"{"result": 42.5, "error": null, "id": 1}"#).unwrap();
//! assert_eq!(result, serde_json::json!(42.5));
//!
//! let error = codec::decode_reply("<html>").unwrap_err();
//! assert_eq!(error.kind(), ErrorKind::DecodeError);
//! ```

use crate::error::{Error, Result};
use crate::types::{RpcRequest, RpcResponse};
use serde::Serialize;
use serde_json::Value;

/// Encode any serializable message to a JSON string
pub fn encode<T: Serialize>(msg: &T) -> Result<String> {
    serde_json::to_string(msg).map_err(|e| Error::Serialization(e.to_string()))
}

/// Encode a JSON-RPC request to JSON
pub fn encode_request(req: &RpcRequest) -> Result<String> {
    encode(req)
}

/// Decode a daemon reply body into its result value
///
/// See the module documentation for the classification order.
pub fn decode_reply(body: &str) -> Result<Value> {
    let value: Value = serde_json::from_str(body).map_err(|e| Error::Decode(e.to_string()))?;
    decode_reply_value(value)
}

/// Classify an already-parsed reply body
pub fn decode_reply_value(value: Value) -> Result<Value> {
    if !value.is_object() {
        return Err(Error::Decode(format!(
            "expected a JSON-RPC response object, got {}",
            json_type_name(&value)
        )));
    }

    let response: RpcResponse =
        serde_json::from_value(value).map_err(|e| Error::Decode(e.to_string()))?;

    response.into_result()
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
