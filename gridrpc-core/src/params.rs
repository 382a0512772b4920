//! Best-effort parsing of operator-entered RPC parameters
//!
//! The RPC console lets an operator type parameters the same way they would
//! on the daemon's own command line. The payload may already be structured,
//! or it may be a string that is either JSON or plain words.
//!
//! Strings are interpreted in a fixed order:
//!
//! 1. Empty or whitespace-only → no parameters, nothing is parsed
//! 2. Strict JSON parse of the whole string
//! 3. Whitespace split, every token kept as a string
//!
//! Operators rely on both paths (`["addr", 6]` vs. `addr 6`), so the order is
//! part of the observable behavior. The fallback never coerces tokens:
//! `listtransactions * 5` sends `"5"`, not `5`.

use serde_json::Value;

/// Convert a raw parameter payload into positional parameters
///
/// - arrays are returned unchanged
/// - `null` yields no parameters
/// - strings follow the JSON-then-split order described in the module docs
/// - any other value (or a string whose JSON is not an array) becomes a
///   single parameter
///
/// # Examples
///
/// ```rust
/// use gridrpc_core::params::parse_params;
/// use serde_json::json;
///
/// assert_eq!(parse_params(&json!(r#"["a", 1, true]"#)), vec![json!("a"), json!(1), json!(true)]);
/// assert_eq!(parse_params(&json!("foo bar")), vec![json!("foo"), json!("bar")]);
/// assert_eq!(parse_params(&json!("{bad json")), vec![json!("{bad"), json!("json")]);
/// assert!(parse_params(&json!("")).is_empty());
/// ```
pub fn parse_params(raw: &Value) -> Vec<Value> {
    match raw {
        Value::Array(items) => items.clone(),
        Value::String(text) => parse_text(text),
        other => into_sequence(other.clone()),
    }
}

fn parse_text(text: &str) -> Vec<Value> {
    if text.trim().is_empty() {
        return Vec::new();
    }

    match serde_json::from_str::<Value>(text) {
        Ok(parsed) => into_sequence(parsed),
        Err(_) => text
            .split_whitespace()
            .map(|token| Value::String(token.to_string()))
            .collect(),
    }
}

fn into_sequence(value: Value) -> Vec<Value> {
    match value {
        Value::Array(items) => items,
        Value::Null => Vec::new(),
        single => vec![single],
    }
}
