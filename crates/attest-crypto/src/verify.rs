//! Signature verification over the supported signing schemes

use crate::error::{Error, Result};
use crate::key::PublicKey;
use signature::Verifier;
use std::fmt;

/// The signing schemes accepted during verification
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SigningScheme {
    EcdsaP256Sha256,
    EcdsaP384Sha384,
    Ed25519,
}

impl SigningScheme {
    pub fn as_str(&self) -> &'static str {
        match self {
            SigningScheme::EcdsaP256Sha256 => "ecdsa-p256-sha256",
            SigningScheme::EcdsaP384Sha384 => "ecdsa-p384-sha384",
            SigningScheme::Ed25519 => "ed25519",
        }
    }

    /// The scheme a key of the given kind is expected to use
    pub fn for_key(key: &PublicKey) -> Self {
        match key {
            PublicKey::EcdsaP256(_) => SigningScheme::EcdsaP256Sha256,
            PublicKey::EcdsaP384(_) => SigningScheme::EcdsaP384Sha384,
            PublicKey::Ed25519(_) => SigningScheme::Ed25519,
        }
    }
}

impl fmt::Display for SigningScheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Verify `signature` over `message` with an explicit signing scheme
///
/// ECDSA signatures are accepted in ASN.1 DER form, falling back to
/// the fixed-size (r || s) encoding.
pub fn verify_signature(
    key: &PublicKey,
    message: &[u8],
    signature: &[u8],
    scheme: SigningScheme,
) -> Result<()> {
    match (key, scheme) {
        (PublicKey::EcdsaP256(vk), SigningScheme::EcdsaP256Sha256) => {
            let sig = p256::ecdsa::Signature::from_der(signature)
                .or_else(|_| p256::ecdsa::Signature::from_slice(signature))
                .map_err(|e| Error::MalformedSignature(e.to_string()))?;
            vk.verify(message, &sig)
                .map_err(|_| Error::VerificationFailed)
        }
        (PublicKey::EcdsaP384(vk), SigningScheme::EcdsaP384Sha384) => {
            let sig = p384::ecdsa::Signature::from_der(signature)
                .or_else(|_| p384::ecdsa::Signature::from_slice(signature))
                .map_err(|e| Error::MalformedSignature(e.to_string()))?;
            vk.verify(message, &sig)
                .map_err(|_| Error::VerificationFailed)
        }
        (PublicKey::Ed25519(vk), SigningScheme::Ed25519) => {
            let sig = ed25519_dalek::Signature::from_slice(signature)
                .map_err(|e| Error::MalformedSignature(e.to_string()))?;
            vk.verify(message, &sig)
                .map_err(|_| Error::VerificationFailed)
        }
        (key, scheme) => Err(Error::SchemeMismatch {
            scheme: scheme.as_str(),
            key: key.kind(),
        }),
    }
}

/// Verify a signature using the scheme implied by the key's kind
pub fn verify_signature_auto(key: &PublicKey, message: &[u8], signature: &[u8]) -> Result<()> {
    verify_signature(key, message, signature, SigningScheme::for_key(key))
}
