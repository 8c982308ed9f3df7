//! The verification failure taxonomy
//!
//! One error value per failed call, naming exactly which contract was
//! violated. Callers map these to exit codes or remediation hints.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    /// A source (artifact, signature, bundle, root) was unreadable
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The artifact is larger than the configured ceiling
    #[error("size of blob exceeds allowed size of {limit} bytes")]
    SizeLimitExceeded { limit: u64 },

    /// Malformed envelope, bundle, statement, or encoding
    #[error("malformed input: {0}")]
    Format(String),

    /// Trust material is missing or unusable
    #[error("trust material error: {0}")]
    TrustMaterial(String),

    /// No attached signature verified, or a required transparency-log
    /// confirmation failed
    #[error("signature verification failed: {0}")]
    SignatureInvalid(String),

    /// The statement's predicate type does not satisfy the filter
    #[error("invalid predicate type {actual:?}, expected {expected:?}")]
    PredicateMismatch { expected: String, actual: String },

    /// The statement names no subjects to check claims against
    #[error("no subjects found in attestation")]
    SubjectAbsent,

    /// No subject digest matches the artifact's digest
    #[error("unable to match digest of blob to any subject in attestation")]
    SubjectDigestMismatch,

    /// The requested digest algorithm is outside the supported set
    #[error("unsupported digest algorithm: {0}")]
    DigestAlgorithmUnsupported(String),
}

pub type Result<T> = std::result::Result<T, Error>;

impl From<attest_types::Error> for Error {
    fn from(err: attest_types::Error) -> Self {
        match err {
            attest_types::Error::UnsupportedAlgorithm(alg) => Error::DigestAlgorithmUnsupported(alg),
            other => Error::Format(other.to_string()),
        }
    }
}

impl From<attest_bundle::Error> for Error {
    fn from(err: attest_bundle::Error) -> Self {
        match err {
            attest_bundle::Error::Io(e) => Error::Io(e),
            attest_bundle::Error::MissingTrustedRoot => {
                Error::TrustMaterial("the bundle format requires a trusted root".to_string())
            }
            attest_bundle::Error::Types(e) => e.into(),
            other => Error::Format(other.to_string()),
        }
    }
}

impl From<attest_crypto::Error> for Error {
    fn from(err: attest_crypto::Error) -> Self {
        match err {
            attest_crypto::Error::InvalidKey(_) | attest_crypto::Error::UnsupportedKey(_) => {
                Error::TrustMaterial(err.to_string())
            }
            other => Error::SignatureInvalid(other.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unsupported_algorithm_maps_to_digest_variant() {
        let err: Error = attest_types::Error::UnsupportedAlgorithm("md5".to_string()).into();
        assert!(matches!(err, Error::DigestAlgorithmUnsupported(_)));
    }

    #[test]
    fn test_missing_trusted_root_maps_to_trust_material() {
        let err: Error = attest_bundle::Error::MissingTrustedRoot.into();
        assert!(matches!(err, Error::TrustMaterial(_)));
    }

    #[test]
    fn test_crypto_failure_maps_to_signature_invalid() {
        let err: Error = attest_crypto::Error::VerificationFailed.into();
        assert!(matches!(err, Error::SignatureInvalid(_)));
    }
}
