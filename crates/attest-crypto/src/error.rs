//! Error types for the attest-crypto crate

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    /// Key material could not be decoded as PEM/DER SPKI
    #[error("invalid key material: {0}")]
    InvalidKey(String),

    /// The key's algorithm or curve is outside the supported set
    #[error("unsupported key type: {0}")]
    UnsupportedKey(String),

    /// The requested scheme does not match the key's kind
    #[error("signing scheme {scheme} does not match key type {key}")]
    SchemeMismatch {
        scheme: &'static str,
        key: &'static str,
    },

    /// The signature bytes are malformed for the scheme
    #[error("malformed signature: {0}")]
    MalformedSignature(String),

    /// The signature did not verify
    #[error("signature verification failed")]
    VerificationFailed,
}

pub type Result<T> = std::result::Result<T, Error>;
