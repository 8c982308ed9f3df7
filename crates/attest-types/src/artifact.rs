//! Artifact references for verification
//!
//! The verification subject is either a local file that will be
//! digested under a size ceiling, or a pre-computed digest supplied by
//! the caller (no I/O needed).

use crate::hash::HashAlgorithm;
use std::path::PathBuf;

/// The artifact a statement is checked against
#[derive(Debug, Clone)]
pub enum Artifact {
    /// A local file; its digest is computed by streaming the contents
    Path(PathBuf),
    /// A pre-computed digest, trusted as-is after validation
    Digest {
        algorithm: HashAlgorithm,
        /// Lowercase hex digest value
        value: String,
    },
}

impl Artifact {
    pub fn from_path(path: impl Into<PathBuf>) -> Self {
        Artifact::Path(path.into())
    }

    pub fn from_digest(algorithm: HashAlgorithm, value: impl Into<String>) -> Self {
        Artifact::Digest {
            algorithm,
            value: value.into(),
        }
    }

    /// Whether resolving this artifact requires reading a file
    pub fn needs_io(&self) -> bool {
        matches!(self, Artifact::Path(_))
    }
}
