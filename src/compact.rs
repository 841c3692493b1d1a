//! Compact serialization: `base64url(header) "." base64url(payload) "." base64url(signature)`.

use std::fmt;
use std::str;

use crate::base64url;
use crate::common::ParseOptions;
use crate::error::JWTError;
use crate::jwt_header::build_header;

/// The `header.payload` prefix of a compact token.
///
/// These are the exact bytes a signature or authentication tag covers. A
/// value can only be obtained by creating a token or by splitting a
/// received one, never by re-encoding decoded JSON.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct UnsignedCompact(String);

impl UnsignedCompact {
    /// The bytes to sign or authenticate.
    pub fn as_bytes(&self) -> &[u8] {
        self.0.as_bytes()
    }

    /// The same bytes, as text. Only the base64url alphabet and a single `.` can appear.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl AsRef<[u8]> for UnsignedCompact {
    fn as_ref(&self) -> &[u8] {
        self.as_bytes()
    }
}

impl fmt::Debug for UnsignedCompact {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("UnsignedCompact").field(&self.0).finish()
    }
}

/// The components of a compact token, before any signature or claim verification.
///
/// Nothing here should be trusted until the signature over
/// `unsigned_compact` has been verified.
#[derive(Clone, PartialEq, Eq)]
pub struct SignedCompactParts {
    /// The signed `header.payload` bytes, exactly as received
    pub unsigned_compact: UnsignedCompact,
    /// Decoded header JSON text
    pub header_json: String,
    /// Decoded payload JSON text, not parsed by this crate
    pub payload_json: String,
    /// Decoded signature or authentication tag
    pub signature: Vec<u8>,
}

impl fmt::Debug for SignedCompactParts {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SignedCompactParts")
            .field("unsigned_compact", &self.unsigned_compact)
            .field("header_json", &self.header_json)
            .field("payload_json", &"[REDACTED]")
            .field("signature", &"[REDACTED]")
            .finish()
    }
}

/// Build the `header.payload` part of a new token.
///
/// `payload_json` is encoded as is; it should already be canonical JSON.
pub fn create_unsigned_compact(
    algorithm: &str,
    payload_json: &str,
) -> Result<UnsignedCompact, JWTError> {
    let header_json = build_header(algorithm)?;
    let mut unsigned_compact = base64url::encode(header_json);
    unsigned_compact.push('.');
    unsigned_compact.push_str(&base64url::encode(payload_json));
    Ok(UnsignedCompact(unsigned_compact))
}

/// Append the encoded signature to `unsigned_compact`.
pub fn create_signed_compact(unsigned_compact: &UnsignedCompact, signature: &[u8]) -> String {
    let encoded_signature = base64url::encode(signature);
    let mut token = String::with_capacity(unsigned_compact.len() + 1 + encoded_signature.len());
    token.push_str(unsigned_compact.as_str());
    token.push('.');
    token.push_str(&encoded_signature);
    token
}

/// Split a received token into its components.
pub fn split_signed_compact(token: impl AsRef<[u8]>) -> Result<SignedCompactParts, JWTError> {
    split_signed_compact_with_options(token, &ParseOptions::default())
}

/// Split a received token into its components, enforcing the limits set in `options`.
///
/// The signature is whatever follows the last `.`; what precedes it must
/// contain exactly one more `.`. Every structural or encoding failure is
/// reported as `JWTError::InvalidToken`.
pub fn split_signed_compact_with_options(
    token: impl AsRef<[u8]>,
    options: &ParseOptions,
) -> Result<SignedCompactParts, JWTError> {
    let token = token.as_ref();
    if let Some(max_token_length) = options.max_token_length {
        if token.len() > max_token_length {
            tracing::debug!(len = token.len(), max_token_length, "token is too long");
            return Err(JWTError::TokenTooLong);
        }
    }
    let token = str::from_utf8(token).map_err(|_| reject("token is not valid UTF-8"))?;

    let (unsigned_compact, encoded_signature) = token
        .rsplit_once('.')
        .ok_or_else(|| reject("missing signature separator"))?;
    let signature =
        base64url::decode(encoded_signature).map_err(|_| reject("invalid signature encoding"))?;

    let mut parts = unsigned_compact.split('.');
    let (encoded_header, encoded_payload) = match (parts.next(), parts.next(), parts.next()) {
        (Some(encoded_header), Some(encoded_payload), None) => (encoded_header, encoded_payload),
        _ => return Err(reject("wrong number of segments")),
    };
    if let Some(max_header_length) = options.max_header_length {
        if encoded_header.len() > max_header_length {
            tracing::debug!(len = encoded_header.len(), max_header_length, "header is too large");
            return Err(JWTError::HeaderTooLarge);
        }
    }
    let header_json = decode_json_text(encoded_header).map_err(|_| reject("invalid header"))?;
    let payload_json = decode_json_text(encoded_payload).map_err(|_| reject("invalid payload"))?;

    Ok(SignedCompactParts {
        unsigned_compact: UnsignedCompact(unsigned_compact.to_string()),
        header_json,
        payload_json,
        signature,
    })
}

fn decode_json_text(encoded: &str) -> Result<String, JWTError> {
    let bin = base64url::decode(encoded)?;
    String::from_utf8(bin).map_err(|_| JWTError::InvalidEncoding)
}

fn reject(gate: &'static str) -> JWTError {
    tracing::debug!(gate, "rejecting malformed token");
    JWTError::InvalidToken
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::json;
    use crate::jwt_header::validate_header;
    use serde_json::json;

    const RFC7515_HEADER: &str = "eyJ0eXAiOiJKV1QiLA0KICJhbGciOiJIUzI1NiJ9";
    const RFC7515_PAYLOAD: &str = "eyJpc3MiOiJqb2UiLA0KICJleHAiOjEzMDA4MTkzODAsDQogImh0dHA6Ly9leGFtcGxlLmNvbS9pc19yb290Ijp0cnVlfQ";
    const RFC7515_SIGNATURE: &str = "dBjftJeZ4CVP-mB92K27uhbUJU1p1r_wW1gFWFOEjXk";

    #[test]
    fn create_unsigned() {
        let unsigned_compact =
            create_unsigned_compact("HS256", r#"{"sub":"1234567890"}"#).unwrap();
        assert_eq!(
            unsigned_compact.as_str(),
            "eyJhbGciOiJIUzI1NiJ9.eyJzdWIiOiIxMjM0NTY3ODkwIn0"
        );
        assert_eq!(unsigned_compact.as_bytes(), unsigned_compact.as_str().as_bytes());
    }

    #[test]
    fn create_unsigned_rejects_unknown_algorithm() {
        assert_eq!(
            create_unsigned_compact("NONE", "{}"),
            Err(JWTError::InvalidAlgorithm)
        );
    }

    #[test]
    fn create_and_split() {
        let payload_json = json::dumps(&json!({"iss": "joe", "aud": ["a", "b"]})).unwrap();
        let signature = [0u8, 1, 2, 0xfe, 0xff];
        for alg in ["HS256", "ES384", "PS512"] {
            let unsigned_compact = create_unsigned_compact(alg, &payload_json).unwrap();
            let token = create_signed_compact(&unsigned_compact, &signature);
            let parts = split_signed_compact(&token).unwrap();
            assert_eq!(parts.unsigned_compact, unsigned_compact);
            assert_eq!(parts.header_json, format!(r#"{{"alg":"{}"}}"#, alg));
            assert_eq!(parts.payload_json, payload_json);
            assert_eq!(parts.signature, signature);
            validate_header(&parts.header_json, alg).unwrap();
        }
    }

    #[test]
    fn empty_signature() {
        let unsigned_compact = create_unsigned_compact("HS256", "{}").unwrap();
        let token = create_signed_compact(&unsigned_compact, b"");
        assert!(token.ends_with('.'));
        let parts = split_signed_compact(&token).unwrap();
        assert!(parts.signature.is_empty());
        assert_eq!(parts.payload_json, "{}");

        let parts = split_signed_compact("e30.e30.").unwrap();
        assert_eq!(parts.header_json, "{}");
        assert!(parts.signature.is_empty());
    }

    #[test]
    fn split_preserves_received_bytes() {
        let token = format!("{}.{}.{}", RFC7515_HEADER, RFC7515_PAYLOAD, RFC7515_SIGNATURE);
        let parts = split_signed_compact(&token).unwrap();
        assert_eq!(
            parts.unsigned_compact.as_str(),
            format!("{}.{}", RFC7515_HEADER, RFC7515_PAYLOAD)
        );
        assert_eq!(parts.header_json, "{\"typ\":\"JWT\",\r\n \"alg\":\"HS256\"}");
        assert_eq!(
            parts.payload_json,
            "{\"iss\":\"joe\",\r\n \"exp\":1300819380,\r\n \"http://example.com/is_root\":true}"
        );
        assert_eq!(parts.signature.len(), 32);
        validate_header(&parts.header_json, "HS256").unwrap();
    }

    #[test]
    fn split_rejects_malformed_tokens() {
        for token in [
            "",
            "abc",
            "e30",
            "e30.e30",
            "a.b.c.d",
            "e30.e30.e30.e30",
            "e30.e30.a",
            "e30.e30.e30=",
            "e30.e3+.e30",
            "e30.e30.e3/",
            "e30 .e30.e30",
            "e30.e30\n.e30",
            "e30.__4.e30",
        ] {
            assert_eq!(
                split_signed_compact(token),
                Err(JWTError::InvalidToken),
                "{:?}",
                token
            );
        }
    }

    #[test]
    fn split_rejects_non_utf8_tokens() {
        assert_eq!(
            split_signed_compact(b"e30.e30.\xff"),
            Err(JWTError::InvalidToken)
        );
        assert_eq!(
            split_signed_compact(b"e30.e\xc3\x28.e30"),
            Err(JWTError::InvalidToken)
        );
    }

    #[test]
    fn token_length_limit() {
        let token = format!("{}.{}.{}", RFC7515_HEADER, RFC7515_PAYLOAD, RFC7515_SIGNATURE);
        let options = ParseOptions::default().with_max_token_length(token.len());
        split_signed_compact_with_options(&token, &options).unwrap();

        let options = ParseOptions::default().with_max_token_length(token.len() - 1);
        assert_eq!(
            split_signed_compact_with_options(&token, &options),
            Err(JWTError::TokenTooLong)
        );
        assert_eq!(
            split_signed_compact_with_options("abc", &options.with_max_token_length(2)),
            Err(JWTError::TokenTooLong)
        );
    }

    #[test]
    fn header_length_limit() {
        let token = format!("{}.{}.{}", RFC7515_HEADER, RFC7515_PAYLOAD, RFC7515_SIGNATURE);
        let options = ParseOptions::default().with_max_header_length(RFC7515_HEADER.len());
        split_signed_compact_with_options(&token, &options).unwrap();

        let options = ParseOptions::default().with_max_header_length(8);
        assert_eq!(
            split_signed_compact_with_options(&token, &options),
            Err(JWTError::HeaderTooLarge)
        );
    }

    #[test]
    fn debug_redacts_payload_and_signature() {
        let unsigned_compact = create_unsigned_compact("HS256", r#"{"secret":"x"}"#).unwrap();
        let token = create_signed_compact(&unsigned_compact, b"tag");
        let debug = format!("{:?}", split_signed_compact(&token).unwrap());
        assert!(debug.contains("[REDACTED]"));
        assert!(!debug.contains("secret"));
    }
}
