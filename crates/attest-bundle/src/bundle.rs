//! Sigstore bundle format types
//!
//! The bundle is a portable container holding a signed envelope (or a
//! bare message signature) together with verification material. Only
//! the DSSE envelope variant carries a statement to check claims
//! against.

use crate::error::{Error, Result};
use attest_types::{DerBytes, DsseEnvelope, SignatureBytes};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Sigstore bundle media types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MediaType {
    /// Bundle format version 0.1
    Bundle0_1,
    /// Bundle format version 0.2
    Bundle0_2,
    /// Bundle format version 0.3
    Bundle0_3,
}

impl MediaType {
    /// Get the media type string
    pub fn as_str(&self) -> &'static str {
        match self {
            MediaType::Bundle0_1 => "application/vnd.dev.sigstore.bundle+json;version=0.1",
            MediaType::Bundle0_2 => "application/vnd.dev.sigstore.bundle+json;version=0.2",
            MediaType::Bundle0_3 => "application/vnd.dev.sigstore.bundle.v0.3+json",
        }
    }
}

impl FromStr for MediaType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "application/vnd.dev.sigstore.bundle+json;version=0.1" => Ok(MediaType::Bundle0_1),
            "application/vnd.dev.sigstore.bundle+json;version=0.2" => Ok(MediaType::Bundle0_2),
            "application/vnd.dev.sigstore.bundle.v0.3+json" => Ok(MediaType::Bundle0_3),
            // Also accept alternative v0.3 format
            "application/vnd.dev.sigstore.bundle+json;version=0.3" => Ok(MediaType::Bundle0_3),
            _ => Err(Error::InvalidMediaType(s.to_string())),
        }
    }
}

/// A parsed sigstore bundle
///
/// The wire format flattens the content union into sibling fields, so
/// the struct mirrors that and [`Bundle::content`] reconstructs the
/// tagged variant.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Bundle {
    pub media_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub verification_material: Option<VerificationMaterial>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dsse_envelope: Option<DsseEnvelope>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message_signature: Option<MessageSignature>,
}

/// The content union of a bundle
#[derive(Debug)]
pub enum BundleContent<'a> {
    DsseEnvelope(&'a DsseEnvelope),
    MessageSignature(&'a MessageSignature),
}

impl Bundle {
    /// Parse a bundle from JSON
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Serialize the bundle to JSON
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    /// Get the bundle version from the media type
    pub fn version(&self) -> Result<MediaType> {
        MediaType::from_str(&self.media_type)
    }

    /// Resolve the content union, rejecting malformed bundles
    pub fn content(&self) -> Result<BundleContent<'_>> {
        match (&self.dsse_envelope, &self.message_signature) {
            (Some(envelope), None) => Ok(BundleContent::DsseEnvelope(envelope)),
            (None, Some(signature)) => Ok(BundleContent::MessageSignature(signature)),
            (None, None) => Err(Error::MissingField("content".to_string())),
            (Some(_), Some(_)) => Err(Error::UnexpectedContent(
                "bundle carries both a DSSE envelope and a message signature".to_string(),
            )),
        }
    }

    /// Get the DSSE envelope, failing if the bundle holds a different
    /// content variant
    pub fn require_dsse_envelope(&self) -> Result<&DsseEnvelope> {
        match self.content()? {
            BundleContent::DsseEnvelope(envelope) => Ok(envelope),
            BundleContent::MessageSignature(_) => Err(Error::UnexpectedContent(
                "bundle carries a message signature, not a DSSE envelope".to_string(),
            )),
        }
    }
}

/// Verification material attached to a bundle
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VerificationMaterial {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub public_key: Option<PublicKeyHint>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub certificate: Option<EncodedCertificate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub x509_certificate_chain: Option<CertificateChain>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tlog_entries: Vec<serde_json::Value>,
}

/// The trust content a bundle's verification material resolves to
#[derive(Debug)]
pub enum VerificationMaterialContent<'a> {
    /// A hint naming a key the caller must already hold
    PublicKeyHint(&'a str),
    /// A single signing certificate (DER)
    Certificate(&'a DerBytes),
    /// A certificate chain, leaf first (DER)
    CertificateChain(&'a [EncodedCertificate]),
}

impl VerificationMaterial {
    /// Resolve the material union, if any variant is populated
    pub fn content(&self) -> Option<VerificationMaterialContent<'_>> {
        if let Some(cert) = &self.certificate {
            return Some(VerificationMaterialContent::Certificate(&cert.raw_bytes));
        }
        if let Some(chain) = &self.x509_certificate_chain {
            return Some(VerificationMaterialContent::CertificateChain(
                &chain.certificates,
            ));
        }
        if let Some(key) = &self.public_key {
            return Some(VerificationMaterialContent::PublicKeyHint(&key.hint));
        }
        None
    }
}

/// A reference to a key the verifier is expected to hold
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PublicKeyHint {
    #[serde(default)]
    pub hint: String,
}

/// A DER certificate carried as base64
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EncodedCertificate {
    #[serde(default)]
    pub raw_bytes: DerBytes,
}

/// A certificate chain, leaf first
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CertificateChain {
    #[serde(default)]
    pub certificates: Vec<EncodedCertificate>,
}

/// A bare signature over the artifact itself (no wrapped statement)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MessageSignature {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message_digest: Option<MessageDigest>,
    pub signature: SignatureBytes,
}

/// The digest a message signature was computed over
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MessageDigest {
    #[serde(default)]
    pub algorithm: String,
    pub digest: SignatureBytes,
}
