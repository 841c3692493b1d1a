use hmac_sha512::sha384 as hmac_sha384;
use rand::RngCore;
use zeroize::Zeroize;

use crate::algorithm::Algorithm;
use crate::common::*;
use crate::compact::*;
use crate::error::*;
use crate::jwt_header::validate_header;

/// Minimum HMAC key length, in bytes.
pub const MIN_KEY_LENGTH: usize = 32;

#[doc(hidden)]
#[derive(Debug, Clone)]
pub struct HMACKey {
    raw_key: Vec<u8>,
}

impl Drop for HMACKey {
    fn drop(&mut self) {
        self.raw_key.zeroize();
    }
}

impl HMACKey {
    /// Create a HMAC key from a byte slice.
    pub fn from_bytes(raw_key: &[u8]) -> Self {
        HMACKey {
            raw_key: raw_key.to_vec(),
        }
    }

    /// Convert the HMAC key to a byte slice.
    pub fn to_bytes(&self) -> Vec<u8> {
        self.raw_key.clone()
    }

    /// Generate a random HMAC key.
    pub fn generate() -> Self {
        let mut raw_key = vec![0u8; MIN_KEY_LENGTH];
        rand::thread_rng().fill_bytes(&mut raw_key);
        HMACKey { raw_key }
    }
}

impl AsRef<[u8]> for HMACKey {
    /// Get the raw key, as a byte slice
    fn as_ref(&self) -> &[u8] {
        &self.raw_key
    }
}

pub trait MACLike {
    fn jwt_alg(&self) -> Algorithm;
    fn key(&self) -> &HMACKey;
    fn authentication_tag(&self, authenticated: &[u8]) -> Vec<u8>;

    /// Create a token carrying `payload_json`, authenticated with the key.
    fn compute_mac_and_encode(&self, payload_json: &str) -> Result<String, Error> {
        ensure!(
            self.key().as_ref().len() >= MIN_KEY_LENGTH,
            JWTError::WeakKey
        );
        let unsigned_compact = create_unsigned_compact(self.jwt_alg().as_str(), payload_json)?;
        let authentication_tag = self.authentication_tag(unsigned_compact.as_bytes());
        Ok(create_signed_compact(
            &unsigned_compact,
            &authentication_tag,
        ))
    }

    /// Verify a token, and return its payload.
    ///
    /// The returned JSON text has not been interpreted: claims such as
    /// expiration dates still have to be checked by the application.
    fn verify_mac_and_decode(
        &self,
        token: impl AsRef<[u8]>,
        options: Option<ParseOptions>,
    ) -> Result<String, Error> {
        ensure!(
            self.key().as_ref().len() >= MIN_KEY_LENGTH,
            JWTError::WeakKey
        );
        let options = options.unwrap_or_default();
        let parts = split_signed_compact_with_options(token, &options)?;
        ensure!(
            ct_codecs::verify(
                &self.authentication_tag(parts.unsigned_compact.as_bytes()),
                &parts.signature
            ),
            JWTError::InvalidAuthenticationTag
        );
        validate_header(&parts.header_json, self.jwt_alg().as_str())?;
        Ok(parts.payload_json)
    }
}

#[derive(Debug, Clone)]
pub struct HS256Key {
    key: HMACKey,
}

impl MACLike for HS256Key {
    fn jwt_alg(&self) -> Algorithm {
        Algorithm::HS256
    }

    fn key(&self) -> &HMACKey {
        &self.key
    }

    fn authentication_tag(&self, authenticated: &[u8]) -> Vec<u8> {
        hmac_sha256::HMAC::mac(authenticated, self.key().as_ref()).to_vec()
    }
}

impl HS256Key {
    pub fn from_bytes(raw_key: &[u8]) -> Self {
        HS256Key {
            key: HMACKey::from_bytes(raw_key),
        }
    }

    pub fn to_bytes(&self) -> Vec<u8> {
        self.key.to_bytes()
    }

    pub fn generate() -> Self {
        HS256Key {
            key: HMACKey::generate(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct HS384Key {
    key: HMACKey,
}

impl MACLike for HS384Key {
    fn jwt_alg(&self) -> Algorithm {
        Algorithm::HS384
    }

    fn key(&self) -> &HMACKey {
        &self.key
    }

    fn authentication_tag(&self, authenticated: &[u8]) -> Vec<u8> {
        hmac_sha384::HMAC::mac(authenticated, self.key().as_ref()).to_vec()
    }
}

impl HS384Key {
    pub fn from_bytes(raw_key: &[u8]) -> Self {
        HS384Key {
            key: HMACKey::from_bytes(raw_key),
        }
    }

    pub fn to_bytes(&self) -> Vec<u8> {
        self.key.to_bytes()
    }

    pub fn generate() -> Self {
        HS384Key {
            key: HMACKey::generate(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct HS512Key {
    key: HMACKey,
}

impl MACLike for HS512Key {
    fn jwt_alg(&self) -> Algorithm {
        Algorithm::HS512
    }

    fn key(&self) -> &HMACKey {
        &self.key
    }

    fn authentication_tag(&self, authenticated: &[u8]) -> Vec<u8> {
        hmac_sha512::HMAC::mac(authenticated, self.key().as_ref()).to_vec()
    }
}

impl HS512Key {
    pub fn from_bytes(raw_key: &[u8]) -> Self {
        HS512Key {
            key: HMACKey::from_bytes(raw_key),
        }
    }

    pub fn to_bytes(&self) -> Vec<u8> {
        self.key.to_bytes()
    }

    pub fn generate() -> Self {
        HS512Key {
            key: HMACKey::generate(),
        }
    }
}
