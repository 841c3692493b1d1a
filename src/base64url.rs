//! Strict, unpadded URL-safe base64.
//!
//! Generic base64 decoders tend to skip characters they don't recognize,
//! which would let unauthenticated bytes ride along inside a token. The
//! decoder here rejects anything outside `[A-Za-z0-9_-]`.

use ct_codecs::{Base64UrlSafe, Base64UrlSafeNoPadding, Decoder, Encoder};

use crate::error::JWTError;

#[inline]
fn is_urlsafe_base64_char(c: u8) -> bool {
    c.is_ascii_alphanumeric() || c == b'-' || c == b'_'
}

/// Encode `bin` using the URL-safe alphabet, without padding.
pub fn encode(bin: impl AsRef<[u8]>) -> String {
    // The encoded length of an in-memory slice cannot overflow.
    Base64UrlSafeNoPadding::encode_to_string(bin).expect("base64 encoded length overflow")
}

/// Decode an unpadded URL-safe base64 string.
///
/// Padding, whitespace, and characters of the standard alphabet (`+`, `/`)
/// are all rejected with `JWTError::InvalidEncoding`.
pub fn decode(encoded: impl AsRef<[u8]>) -> Result<Vec<u8>, JWTError> {
    let encoded = encoded.as_ref();
    if !encoded.iter().copied().all(is_urlsafe_base64_char) {
        return Err(JWTError::InvalidEncoding);
    }
    let padding: &[u8] = match encoded.len() % 4 {
        0 => b"",
        2 => b"==",
        3 => b"=",
        _ => return Err(JWTError::InvalidEncoding),
    };
    let mut padded = Vec::with_capacity(encoded.len() + padding.len());
    padded.extend_from_slice(encoded);
    padded.extend_from_slice(padding);
    Ok(Base64UrlSafe::decode_to_vec(&padded, None)?)
}
