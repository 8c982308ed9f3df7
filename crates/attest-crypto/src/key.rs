//! Public key decoding
//!
//! Trust material arrives as SubjectPublicKeyInfo, either PEM-armored
//! or raw DER. The supported key kinds are a closed set: ECDSA P-256,
//! ECDSA P-384 and Ed25519.

use crate::error::{Error, Result};
use const_oid::db::rfc5912::{ID_EC_PUBLIC_KEY, SECP_256_R_1, SECP_384_R_1};
use const_oid::db::rfc8410::ID_ED_25519;
use const_oid::ObjectIdentifier;
use der::{Decode, Document};
use spki::SubjectPublicKeyInfoRef;

const PUBLIC_KEY_PEM_LABEL: &str = "PUBLIC KEY";

/// A decoded verification key
#[derive(Debug, Clone)]
pub enum PublicKey {
    EcdsaP256(p256::ecdsa::VerifyingKey),
    EcdsaP384(p384::ecdsa::VerifyingKey),
    Ed25519(ed25519_dalek::VerifyingKey),
}

impl PublicKey {
    /// Decode a PEM-armored SPKI public key
    pub fn from_pem(pem: &str) -> Result<Self> {
        let (label, document) = Document::from_pem(pem)
            .map_err(|e| Error::InvalidKey(format!("failed to parse PEM: {}", e)))?;

        if label != PUBLIC_KEY_PEM_LABEL {
            return Err(Error::InvalidKey(format!(
                "unexpected PEM label: {}",
                label
            )));
        }

        Self::from_der(document.as_bytes())
    }

    /// Decode a DER-encoded SPKI public key
    pub fn from_der(der: &[u8]) -> Result<Self> {
        let spki = SubjectPublicKeyInfoRef::from_der(der)
            .map_err(|e| Error::InvalidKey(format!("failed to parse SPKI: {}", e)))?;

        let key_bytes = spki
            .subject_public_key
            .as_bytes()
            .ok_or_else(|| Error::InvalidKey("public key has unused bits".to_string()))?;

        match spki.algorithm.oid {
            ID_EC_PUBLIC_KEY => {
                // For EC keys, the algorithm parameters carry the curve OID
                let params = spki.algorithm.parameters.as_ref().ok_or_else(|| {
                    Error::InvalidKey("EC public key missing curve parameters".to_string())
                })?;
                let curve = ObjectIdentifier::from_bytes(params.value())
                    .map_err(|e| Error::InvalidKey(format!("invalid EC curve OID: {}", e)))?;

                match curve {
                    SECP_256_R_1 => p256::ecdsa::VerifyingKey::from_sec1_bytes(key_bytes)
                        .map(PublicKey::EcdsaP256)
                        .map_err(|e| Error::InvalidKey(format!("invalid P-256 point: {}", e))),
                    SECP_384_R_1 => p384::ecdsa::VerifyingKey::from_sec1_bytes(key_bytes)
                        .map(PublicKey::EcdsaP384)
                        .map_err(|e| Error::InvalidKey(format!("invalid P-384 point: {}", e))),
                    other => Err(Error::UnsupportedKey(format!("EC curve {}", other))),
                }
            }
            ID_ED_25519 => {
                let bytes: &[u8; 32] = key_bytes
                    .try_into()
                    .map_err(|_| Error::InvalidKey("Ed25519 key must be 32 bytes".to_string()))?;
                ed25519_dalek::VerifyingKey::from_bytes(bytes)
                    .map(PublicKey::Ed25519)
                    .map_err(|e| Error::InvalidKey(format!("invalid Ed25519 key: {}", e)))
            }
            other => Err(Error::UnsupportedKey(format!("algorithm {}", other))),
        }
    }

    /// Short human-readable name of the key kind
    pub fn kind(&self) -> &'static str {
        match self {
            PublicKey::EcdsaP256(_) => "ecdsa-p256",
            PublicKey::EcdsaP384(_) => "ecdsa-p384",
            PublicKey::Ed25519(_) => "ed25519",
        }
    }
}
