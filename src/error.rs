use std::path::PathBuf;

use hex::FromHexError;
use thiserror::Error;

/// Top-level error returned by the signing and verification surface.
///
/// An invalid signature is not an error: `verify` reports it as `Ok(false)`.
#[derive(Debug, Error)]
pub enum BbsError {
    #[error(transparent)]
    Configuration(#[from] ConfigurationError),
    #[error("empty message batch")]
    EmptyBatch,
    #[error("message batch of {len} exceeds the maximum of {max}")]
    BatchTooLarge { len: usize, max: usize },
    #[error("message slot {slot} is out of range (maximum {max})")]
    SlotOutOfRange { slot: u32, max: usize },
    #[error("duplicate message slot {0}")]
    DuplicateSlot(u32),
    #[error("malformed signature: {0}")]
    MalformedSignature(&'static str),
}

/// Parameters or key material are missing or malformed.
#[derive(Debug, Error)]
pub enum ConfigurationError {
    #[error("failed to access {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("not valid hexadecimal: {0}")]
    InvalidHex(#[from] FromHexError),
    #[error("incorrect length for {field}: expected {expected} bytes, got {got}")]
    IncorrectLength {
        field: &'static str,
        expected: usize,
        got: usize,
    },
    #[error("{0} is not a valid curve point")]
    InvalidPoint(&'static str),
    #[error("{0} is not a canonical scalar")]
    InvalidScalar(&'static str),
    #[error("{0} must not be the identity")]
    IdentityGenerator(&'static str),
    #[error("{0} domain tag must not be empty")]
    EmptyDomainTag(&'static str),
    #[error("maximum batch size must be positive")]
    ZeroBatchSize,
    #[error("secret key must not be zero")]
    ZeroSecretKey,
    #[error("public key must not be the identity")]
    IdentityPublicKey,
    #[error("signature point A must not be the identity")]
    IdentitySignature,
    #[error("public key does not match the secret key")]
    KeyMismatch,
    #[error("malformed message file {path}: {reason}")]
    MalformedMessage { path: PathBuf, reason: String },
}

/// Failures of scalar arithmetic modulo the group order.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ArithmeticError {
    #[error("value is not invertible modulo the group order")]
    NonInvertible,
}
