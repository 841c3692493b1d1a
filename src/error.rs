#[allow(unused)]
pub use anyhow::{anyhow, bail, ensure, Error};

/// Reasons a token, or one of its components, can be rejected.
///
/// Every variant is reported to callers as an invalid token; the variant
/// itself only tells which gate rejected it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum JWTError {
    #[error("Invalid token")]
    InvalidToken,
    #[error("Invalid base64url encoding")]
    InvalidEncoding,
    #[error("Invalid JSON")]
    InvalidJson,
    #[error("Unsupported JWT algorithm")]
    InvalidAlgorithm,
    #[error("Invalid algorithm")]
    AlgorithmMismatch,
    #[error("Invalid JWT header type")]
    InvalidHeaderType,
    #[error("Token is too long")]
    TokenTooLong,
    #[error("JWT header too large")]
    HeaderTooLarge,
    #[error("Key too short")]
    WeakKey,
    #[error("Authentication tag didn't verify")]
    InvalidAuthenticationTag,
}

impl JWTError {
    /// Returns `true` if the error means that a token was rejected.
    ///
    /// Only `WeakKey` is a problem with the caller's key rather than with the token.
    pub fn is_invalid_token(&self) -> bool {
        !matches!(self, JWTError::WeakKey)
    }
}

impl From<ct_codecs::Error> for JWTError {
    fn from(_: ct_codecs::Error) -> JWTError {
        JWTError::InvalidEncoding
    }
}

impl From<serde_json::Error> for JWTError {
    fn from(_: serde_json::Error) -> JWTError {
        JWTError::InvalidJson
    }
}
