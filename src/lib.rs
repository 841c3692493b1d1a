//! Strict JWT compact serialization.
//!
//! This crate converts between a header/payload/signature triple and the
//! `header.payload.signature` compact form, rejecting anything that is not
//! strictly encoded before a signature is even looked at.
//!
//! Signature computation, key management and claim validation are left to
//! the application. `HS256Key`, `HS384Key` and `HS512Key` show how a MAC
//! plugs into the format layer.

#![forbid(unsafe_code)]

pub mod algorithm;
pub mod base64url;
pub mod common;
pub mod compact;
pub mod error;
pub mod hmac;
pub mod json;

mod jwt_header;

pub use crate::error::{Error, JWTError};
pub use crate::jwt_header::{build_header, validate_header};
pub use serde_json;

pub mod prelude {
    pub use crate::algorithm::*;
    pub use crate::common::*;
    pub use crate::compact::*;
    pub use crate::error::{Error, JWTError};
    pub use crate::hmac::*;
    pub use crate::jwt_header::{build_header, validate_header};
}
