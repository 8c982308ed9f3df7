//! Error types for the attest-bundle crate

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    /// A source file could not be read
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON parsing failed
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// The bundle's media type is not a recognized schema tag
    #[error("invalid media type: {0}")]
    InvalidMediaType(String),

    /// The bundle carries a content variant the attestation path
    /// cannot use (e.g. a bare message signature)
    #[error("unexpected bundle content: {0}")]
    UnexpectedContent(String),

    /// A required piece of the container is absent
    #[error("missing field: {0}")]
    MissingField(String),

    /// Bundle mode requires a trusted root source
    #[error("the bundle format requires a trusted root")]
    MissingTrustedRoot,

    /// Exactly one of the legacy and bundle sources must be given
    #[error("expected exactly one signature or bundle source")]
    AmbiguousSource,

    #[error(transparent)]
    Types(#[from] attest_types::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
