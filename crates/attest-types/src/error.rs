//! Error types for the attest-types crate

use thiserror::Error;

/// Errors produced while building or parsing core data types
#[derive(Debug, Error)]
pub enum Error {
    /// JSON serialization or deserialization failed
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Base64 decoding failed
    #[error("invalid base64: {0}")]
    Base64(#[from] base64::DecodeError),

    /// The digest algorithm tag is not one this crate supports
    #[error("unsupported digest algorithm: {0}")]
    UnsupportedAlgorithm(String),

    /// A digest value is not valid lowercase hex of the expected length
    #[error("invalid digest value: {0}")]
    InvalidDigest(String),

    /// A required field is absent
    #[error("missing field: {0}")]
    MissingField(String),
}

pub type Result<T> = std::result::Result<T, Error>;
