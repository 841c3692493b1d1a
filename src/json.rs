//! Canonical JSON.
//!
//! The header and payload segments are signed as bytes, so serialization
//! always uses the compact form: no whitespace around `,` or `:`.

use serde::Serialize;
use serde_json::Value;

use crate::error::JWTError;

/// Serialize `value` without insignificant whitespace.
pub fn dumps<T: Serialize + ?Sized>(value: &T) -> Result<String, JWTError> {
    Ok(serde_json::to_string(value)?)
}

/// Parse untrusted JSON text.
pub fn loads(json: &str) -> Result<Value, JWTError> {
    serde_json::from_str(json).map_err(|_| {
        tracing::debug!(len = json.len(), "rejecting unparsable JSON");
        JWTError::InvalidJson
    })
}
