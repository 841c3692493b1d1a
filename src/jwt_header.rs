use serde::Serialize;
use serde_json::Value;

use crate::algorithm::Algorithm;
use crate::error::JWTError;
use crate::json;

#[derive(Debug, Clone, Serialize)]
pub(crate) struct JWTHeader {
    #[serde(rename = "alg")]
    pub(crate) algorithm: &'static str,
}

impl JWTHeader {
    pub(crate) fn new(algorithm: Algorithm) -> Self {
        JWTHeader {
            algorithm: algorithm.as_str(),
        }
    }
}

/// Build the canonical JSON header for `algorithm`, e.g. `{"alg":"HS256"}`.
pub fn build_header(algorithm: &str) -> Result<String, JWTError> {
    let algorithm: Algorithm = algorithm.parse()?;
    json::dumps(&JWTHeader::new(algorithm))
}

/// Check a decoded JSON header against the algorithm the caller verifies with.
///
/// The header's "alg" is compared case-insensitively. A "typ" property is
/// optional, but if present it must be "JWT" (in any case).
pub fn validate_header(header_json: &str, expected_algorithm: &str) -> Result<(), JWTError> {
    let expected_algorithm: Algorithm = expected_algorithm.parse()?;
    let header = json::loads(header_json)?;
    let header = match header {
        Value::Object(header) => header,
        _ => {
            tracing::debug!("rejecting header that is not a JSON object");
            return Err(JWTError::InvalidToken);
        }
    };

    let algorithm = match header.get("alg") {
        None => "",
        Some(Value::String(algorithm)) => algorithm.as_str(),
        Some(_) => {
            tracing::debug!("rejecting header with a non-string algorithm");
            return Err(JWTError::AlgorithmMismatch);
        }
    };
    if algorithm.to_uppercase() != expected_algorithm.as_str() {
        tracing::debug!(expected = expected_algorithm.as_str(), "algorithm mismatch");
        return Err(JWTError::AlgorithmMismatch);
    }

    if let Some(signature_type) = header.get("typ") {
        match signature_type {
            Value::String(signature_type) if signature_type.to_uppercase() == "JWT" => {}
            _ => {
                tracing::debug!("rejecting header with an invalid type");
                return Err(JWTError::InvalidHeaderType);
            }
        }
    }
    Ok(())
}
