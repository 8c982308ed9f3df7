//! Trusted root document header
//!
//! The trusted root describes the trust anchors accepted for
//! verification. The public-key attestation path only gates on the
//! document's schema tag; the anchor contents matter to the
//! certificate collaborator, so a syntactically minimal document with
//! just the media type populated is valid here.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Recognized trusted root schema tag
pub const TRUSTED_ROOT_MEDIA_TYPE: &str =
    "application/vnd.dev.sigstore.trustedroot+json;version=0.1";

/// The header of a trusted root document
///
/// Anchor fields beyond the media type are preserved opaquely.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrustedRootDocument {
    pub media_type: String,
    #[serde(flatten)]
    pub anchors: serde_json::Map<String, serde_json::Value>,
}

impl TrustedRootDocument {
    /// Parse a trusted root from JSON, validating the schema tag
    pub fn from_json(json: &str) -> Result<Self> {
        let document: Self = serde_json::from_str(json)?;
        if document.media_type != TRUSTED_ROOT_MEDIA_TYPE {
            return Err(Error::InvalidMediaType(document.media_type));
        }
        Ok(document)
    }

    /// Load and validate a trusted root from a file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }
}
