//! Trust material
//!
//! The sources of verification trust form a closed set: a caller
//! supplied raw public key or a short-lived signing certificate
//! chain; a bundle's verification material resolves to one of the
//! two. Each exposes one capability, verifying a signature over a
//! message, plus the identity context that decides transparency-log
//! consultation.

use crate::error::{Error, Result};
use attest_bundle::{VerificationMaterial, VerificationMaterialContent};
use attest_crypto::PublicKey;
use der::{Decode, Encode};
use x509_cert::Certificate;

/// Trust material resolved for one verification call
#[derive(Debug, Clone)]
pub enum TrustMaterial {
    /// A long-lived raw public key
    PublicKey(PublicKey),
    /// A certificate chain, leaf first (DER); certificate trust is
    /// identity-based and short-lived
    CertificateChain(Vec<Vec<u8>>),
}

impl TrustMaterial {
    /// Build trust material from a PEM-armored public key
    pub fn from_pem_key(pem: &str) -> Result<Self> {
        Ok(TrustMaterial::PublicKey(PublicKey::from_pem(pem)?))
    }

    /// Build trust material from a bundle's verification material,
    /// falling back to the caller's key when the bundle only carries
    /// a key hint (the new-format public-key path re-uses caller
    /// supplied key material)
    pub fn from_bundle_material(
        material: Option<&VerificationMaterial>,
        caller_key: &TrustMaterial,
    ) -> Result<Self> {
        let Some(content) = material.and_then(VerificationMaterial::content) else {
            return Ok(caller_key.clone());
        };

        match content {
            VerificationMaterialContent::PublicKeyHint(hint) => {
                tracing::debug!(hint, "bundle names a key hint; using caller key material");
                Ok(caller_key.clone())
            }
            VerificationMaterialContent::Certificate(der) => {
                Ok(TrustMaterial::CertificateChain(vec![der.as_bytes().to_vec()]))
            }
            VerificationMaterialContent::CertificateChain(certs) => {
                if certs.is_empty() {
                    return Err(Error::TrustMaterial(
                        "no certificates in chain".to_string(),
                    ));
                }
                Ok(TrustMaterial::CertificateChain(
                    certs.iter().map(|c| c.raw_bytes.as_bytes().to_vec()).collect(),
                ))
            }
        }
    }

    /// Verify `signature` over `message` with this material's key
    pub fn verify(&self, message: &[u8], signature: &[u8]) -> Result<()> {
        match self {
            TrustMaterial::PublicKey(key) => {
                Ok(attest_crypto::verify_signature_auto(key, message, signature)?)
            }
            TrustMaterial::CertificateChain(chain) => {
                let key = leaf_public_key(chain)?;
                Ok(attest_crypto::verify_signature_auto(&key, message, signature)?)
            }
        }
    }

    /// Whether this material derives from a short-lived identity and
    /// therefore needs a transparency-log record to be trusted
    pub fn requires_transparency_log(&self) -> bool {
        matches!(self, TrustMaterial::CertificateChain(_))
    }
}

/// Extract the verification key from the leaf certificate of a chain
fn leaf_public_key(chain: &[Vec<u8>]) -> Result<PublicKey> {
    let leaf = chain
        .first()
        .ok_or_else(|| Error::TrustMaterial("no certificates in chain".to_string()))?;

    let certificate = Certificate::from_der(leaf)
        .map_err(|e| Error::TrustMaterial(format!("failed to parse leaf certificate: {}", e)))?;

    let spki_der = certificate
        .tbs_certificate
        .subject_public_key_info
        .to_der()
        .map_err(|e| Error::TrustMaterial(format!("failed to encode leaf SPKI: {}", e)))?;

    Ok(PublicKey::from_der(&spki_der)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use attest_bundle::{EncodedCertificate, PublicKeyHint};
    use attest_types::DerBytes;

    const P256_PEM: &str = "-----BEGIN PUBLIC KEY-----
MFkwEwYHKoZIzj0CAQYIKoZIzj0DAQcDQgAESF79b1ToAtoakhBOHEU5UjnEiihV
gZPFIp557+TOoDxf14FODWc+sIPETk0OgCplAk60doVXbCv33IU4rXZHrg==
-----END PUBLIC KEY-----
";

    #[test]
    fn test_raw_key_does_not_need_tlog() {
        let trust = TrustMaterial::from_pem_key(P256_PEM).unwrap();
        assert!(!trust.requires_transparency_log());
    }

    #[test]
    fn test_certificate_chain_needs_tlog() {
        let trust = TrustMaterial::CertificateChain(vec![vec![0x30]]);
        assert!(trust.requires_transparency_log());
    }

    #[test]
    fn test_key_hint_falls_back_to_caller_key() {
        let caller = TrustMaterial::from_pem_key(P256_PEM).unwrap();
        let material = VerificationMaterial {
            public_key: Some(PublicKeyHint {
                hint: "hint".to_string(),
            }),
            ..Default::default()
        };

        let resolved = TrustMaterial::from_bundle_material(Some(&material), &caller).unwrap();
        assert!(matches!(resolved, TrustMaterial::PublicKey(_)));
    }

    #[test]
    fn test_bundle_certificate_becomes_chain() {
        let caller = TrustMaterial::from_pem_key(P256_PEM).unwrap();
        let material = VerificationMaterial {
            certificate: Some(EncodedCertificate {
                raw_bytes: DerBytes::from_bytes(&[0x30, 0x00]),
            }),
            ..Default::default()
        };

        let resolved = TrustMaterial::from_bundle_material(Some(&material), &caller).unwrap();
        assert!(resolved.requires_transparency_log());
    }

    #[test]
    fn test_empty_chain_is_trust_error() {
        let caller = TrustMaterial::from_pem_key(P256_PEM).unwrap();
        let material = VerificationMaterial {
            x509_certificate_chain: Some(attest_bundle::CertificateChain {
                certificates: vec![],
            }),
            ..Default::default()
        };

        assert!(matches!(
            TrustMaterial::from_bundle_material(Some(&material), &caller),
            Err(Error::TrustMaterial(_))
        ));
    }

    #[test]
    fn test_unparsable_leaf_certificate() {
        let trust = TrustMaterial::CertificateChain(vec![vec![0xff, 0xff]]);
        assert!(matches!(
            trust.verify(b"msg", b"sig"),
            Err(Error::TrustMaterial(_))
        ));
    }
}
