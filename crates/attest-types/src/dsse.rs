//! Dead Simple Signing Envelope (DSSE) types
//!
//! DSSE is a signature envelope format used for signing arbitrary payloads.
//! Specification: https://github.com/secure-systems-lab/dsse

use crate::encoding::{KeyId, PayloadBytes, SignatureBytes};
use crate::error::Result;
use serde::{Deserialize, Serialize};

/// A DSSE envelope containing a signed payload
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DsseEnvelope {
    /// Type URI of the payload
    pub payload_type: String,
    /// Payload bytes
    pub payload: PayloadBytes,
    /// Signatures over the PAE (Pre-Authentication Encoding)
    pub signatures: Vec<DsseSignature>,
}

/// A signature in a DSSE envelope
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DsseSignature {
    /// Signature bytes
    pub sig: SignatureBytes,
    /// Key ID (optional hint for key lookup)
    #[serde(default)]
    pub keyid: KeyId,
}

impl DsseEnvelope {
    /// Parse an envelope from its JSON document form
    pub fn from_json(json: &[u8]) -> Result<Self> {
        Ok(serde_json::from_slice(json)?)
    }

    /// Serialize the envelope to JSON
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    /// Get the Pre-Authentication Encoding (PAE) for this envelope
    ///
    /// The PAE is what signatures are computed over, binding the
    /// payload to its declared type.
    pub fn pae(&self) -> Vec<u8> {
        pae(&self.payload_type, self.payload.as_bytes())
    }
}

/// Compute the Pre-Authentication Encoding (PAE)
///
/// Format: `DSSEv1 <len(type)> <type> <len(body)> <body>`
pub fn pae(payload_type: &str, payload: &[u8]) -> Vec<u8> {
    let header = format!("DSSEv1 {} {} {} ", payload_type.len(), payload_type, payload.len());
    let mut result = Vec::with_capacity(header.len() + payload.len());
    result.extend_from_slice(header.as_bytes());
    result.extend_from_slice(payload);
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pae() {
        // Test vector from DSSE spec
        let pae_result = pae("application/example", b"hello world");
        let expected = b"DSSEv1 19 application/example 11 hello world";
        assert_eq!(pae_result, expected);
    }

    #[test]
    fn test_pae_binds_payload_type() {
        assert_ne!(pae("a", b"body"), pae("b", b"body"));
    }

    #[test]
    fn test_envelope_parse_with_empty_keyid() {
        let json = br#"{"payloadType":"application/vnd.in-toto+json","payload":"dGVzdA==","signatures":[{"sig":"c2ln","keyid":""}]}"#;
        let envelope = DsseEnvelope::from_json(json).unwrap();
        assert_eq!(envelope.payload_type, "application/vnd.in-toto+json");
        assert_eq!(envelope.payload.as_bytes(), b"test");
        assert_eq!(envelope.signatures.len(), 1);
        assert!(envelope.signatures[0].keyid.is_empty());
    }

    #[test]
    fn test_envelope_parse_missing_keyid_defaults_empty() {
        let json = br#"{"payloadType":"t","payload":"dGVzdA==","signatures":[{"sig":"c2ln"}]}"#;
        let envelope = DsseEnvelope::from_json(json).unwrap();
        assert!(envelope.signatures[0].keyid.is_empty());
    }

    #[test]
    fn test_envelope_serde_roundtrip() {
        let envelope = DsseEnvelope {
            payload_type: "application/vnd.in-toto+json".to_string(),
            payload: PayloadBytes::from_bytes(b"{\"_type\":\"https://in-toto.io/Statement/v0.1\"}"),
            signatures: vec![DsseSignature {
                sig: SignatureBytes::from_bytes(b"\x30\x44\x02\x20"),
                keyid: KeyId::default(),
            }],
        };

        let json = envelope.to_json().unwrap();
        let parsed = DsseEnvelope::from_json(json.as_bytes()).unwrap();
        assert_eq!(envelope, parsed);
    }

    #[test]
    fn test_envelope_malformed_json() {
        assert!(DsseEnvelope::from_json(b"{not json").is_err());
    }
}
