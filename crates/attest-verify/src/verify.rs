//! The verification pipeline
//!
//! Stages run in a fixed order, each requiring its predecessor's
//! success: resolve the artifact digest, load the envelope, verify a
//! signature, then parse and match the statement. The first failing
//! stage's error is the call's result; no later stage executes and
//! nothing is retried.

use crate::artifact;
use crate::error::{Error, Result};
use crate::limits;
use crate::predicate::resolve_predicate_type;
use crate::tlog::TransparencyLog;
use crate::trust::TrustMaterial;
use attest_types::{Artifact, DsseEnvelope, HashAlgorithm, Statement, IN_TOTO_PAYLOAD_TYPE};
use std::path::{Path, PathBuf};

/// Policy inputs for one verification call
#[derive(Debug, Clone)]
pub struct VerificationPolicy {
    /// Predicate type filter; applies whenever non-empty, regardless
    /// of `check_claims`
    pub predicate_type: Option<String>,
    /// Whether to match the statement's subjects against the artifact
    pub check_claims: bool,
    /// Skip transparency-log consultation for identity-based trust
    pub ignore_tlog: bool,
    /// Artifact size ceiling in bytes
    pub max_artifact_bytes: u64,
}

impl Default for VerificationPolicy {
    fn default() -> Self {
        Self {
            predicate_type: None,
            check_claims: true,
            ignore_tlog: false,
            max_artifact_bytes: limits::DEFAULT_MAX_ARTIFACT_BYTES,
        }
    }
}

impl VerificationPolicy {
    /// A default policy with the size ceiling resolved from the
    /// environment override, consulted once here
    pub fn resolved() -> Self {
        Self {
            max_artifact_bytes: limits::max_artifact_bytes(),
            ..Self::default()
        }
    }

    pub fn with_predicate_type(mut self, predicate_type: impl Into<String>) -> Self {
        self.predicate_type = Some(predicate_type.into());
        self
    }

    pub fn check_claims(mut self, check: bool) -> Self {
        self.check_claims = check;
        self
    }

    pub fn ignore_tlog(mut self, ignore: bool) -> Self {
        self.ignore_tlog = ignore;
        self
    }

    pub fn max_artifact_bytes(mut self, limit: u64) -> Self {
        self.max_artifact_bytes = limit;
        self
    }
}

/// A verification request for one artifact and one detached
/// attestation
#[derive(Debug, Clone)]
pub struct VerifyBlobAttestation {
    /// Trust material the signature must verify under
    pub trust: TrustMaterial,
    /// Legacy signature source: a raw (or base64) DSSE envelope file
    pub signature_path: Option<PathBuf>,
    /// Bundle source; switches the loader into bundle mode
    pub bundle_path: Option<PathBuf>,
    /// Asserts the portable bundle format for `bundle_path`
    pub new_bundle_format: bool,
    /// Trusted root source, required in bundle mode
    pub trusted_root_path: Option<PathBuf>,
    /// Explicit artifact digest, used when no artifact path is given
    pub digest: Option<String>,
    /// Algorithm tag for `digest` (default "sha256")
    pub digest_algorithm: Option<String>,
    pub policy: VerificationPolicy,
}

impl VerifyBlobAttestation {
    pub fn new(trust: TrustMaterial) -> Self {
        Self {
            trust,
            signature_path: None,
            bundle_path: None,
            new_bundle_format: false,
            trusted_root_path: None,
            digest: None,
            digest_algorithm: None,
            policy: VerificationPolicy::default(),
        }
    }

    /// Run the verification pipeline against `blob_path`
    ///
    /// `blob_path` may be `None` (or empty) when an explicit digest is
    /// supplied; a supplied path always wins over the digest. The
    /// transparency log collaborator is only consulted for
    /// identity-based trust with `ignore_tlog` unset.
    pub fn exec(
        &self,
        blob_path: Option<&Path>,
        tlog: Option<&dyn TransparencyLog>,
    ) -> Result<()> {
        let algorithm = match self.digest_algorithm.as_deref() {
            Some(tag) => tag.parse::<HashAlgorithm>()?,
            None => HashAlgorithm::Sha256,
        };

        let artifact = match blob_path {
            Some(path) if !path.as_os_str().is_empty() => Some(Artifact::from_path(path)),
            _ => self
                .digest
                .as_ref()
                .map(|digest| Artifact::from_digest(algorithm, digest.clone())),
        };
        let artifact_digest =
            artifact::resolve(artifact.as_ref(), algorithm, self.policy.max_artifact_bytes)?;

        if self.bundle_path.is_some() && !self.new_bundle_format {
            return Err(Error::Format(
                "bundle sources require the new bundle format".to_string(),
            ));
        }
        let loaded = attest_bundle::load(
            self.signature_path.as_deref(),
            self.bundle_path.as_deref(),
            self.trusted_root_path.as_deref(),
        )?;

        let trust = match &loaded.bundle {
            Some(bundle) => TrustMaterial::from_bundle_material(
                bundle.verification_material.as_ref(),
                &self.trust,
            )?,
            None => self.trust.clone(),
        };

        verify_envelope(&loaded.envelope, &trust, &self.policy, tlog)?;
        match_statement(&loaded.envelope, &artifact_digest, algorithm, &self.policy)?;

        tracing::debug!(digest = %artifact_digest, "attestation verified");
        Ok(())
    }
}

/// Check that at least one attached signature verifies under the
/// trust material, consulting the transparency log when the trust's
/// identity context requires it
fn verify_envelope(
    envelope: &DsseEnvelope,
    trust: &TrustMaterial,
    policy: &VerificationPolicy,
    tlog: Option<&dyn TransparencyLog>,
) -> Result<()> {
    if envelope.payload_type != IN_TOTO_PAYLOAD_TYPE {
        tracing::debug!(payload_type = %envelope.payload_type, "unusual envelope payload type");
    }

    let message = envelope.pae();
    let mut verified = None;
    for (index, signature) in envelope.signatures.iter().enumerate() {
        match trust.verify(&message, signature.sig.as_bytes()) {
            Ok(()) => {
                verified = Some(signature);
                break;
            }
            Err(err) => tracing::debug!(index, %err, "attached signature did not verify"),
        }
    }

    let Some(signature) = verified else {
        return Err(Error::SignatureInvalid(
            "no attached signature verified against the trust material".to_string(),
        ));
    };

    confirm_transparency(trust, policy, tlog, &message, signature.sig.as_bytes())
}

/// Consult the transparency log when the trust's identity context
/// requires it
///
/// Key-based trust never consults the log; certificate-derived trust
/// must find a confirming record unless `ignore_tlog` is set, and a
/// missing log client counts as a failed confirmation.
fn confirm_transparency(
    trust: &TrustMaterial,
    policy: &VerificationPolicy,
    tlog: Option<&dyn TransparencyLog>,
    message: &[u8],
    signature: &[u8],
) -> Result<()> {
    if !trust.requires_transparency_log() || policy.ignore_tlog {
        return Ok(());
    }

    let log = tlog.ok_or_else(|| {
        Error::SignatureInvalid(
            "transparency log confirmation required but no log is available".to_string(),
        )
    })?;
    log.confirm_inclusion(message, signature)
}

/// Parse the payload as an in-toto statement and evaluate the policy:
/// predicate filter first, then (when enabled) subject claims with OR
/// semantics across subjects
fn match_statement(
    envelope: &DsseEnvelope,
    artifact_digest: &str,
    algorithm: HashAlgorithm,
    policy: &VerificationPolicy,
) -> Result<()> {
    let statement = Statement::from_payload(envelope.payload.as_bytes())?;

    if let Some(filter) = policy.predicate_type.as_deref().filter(|f| !f.is_empty()) {
        let expected = resolve_predicate_type(filter);
        if statement.predicate_type != expected {
            return Err(Error::PredicateMismatch {
                expected: expected.to_string(),
                actual: statement.predicate_type,
            });
        }
    }

    if !policy.check_claims {
        return Ok(());
    }

    if statement.subjects.is_empty() {
        return Err(Error::SubjectAbsent);
    }

    // A subject lacking the requested algorithm is skipped, not a
    // mismatch by itself.
    let matched = statement.subjects.iter().any(|subject| {
        subject
            .digest_for(algorithm.as_str())
            .map(|digest| digest.eq_ignore_ascii_case(artifact_digest))
            .unwrap_or(false)
    });

    if matched {
        Ok(())
    } else {
        Err(Error::SubjectDigestMismatch)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use attest_types::{DsseSignature, KeyId, PayloadBytes, SignatureBytes};

    fn envelope_with_payload(payload: &[u8]) -> DsseEnvelope {
        DsseEnvelope {
            payload_type: IN_TOTO_PAYLOAD_TYPE.to_string(),
            payload: PayloadBytes::from_bytes(payload),
            signatures: vec![DsseSignature {
                sig: SignatureBytes::from_bytes(b"unused"),
                keyid: KeyId::default(),
            }],
        }
    }

    const DIGEST: &str = "658781cd4ed9bca60dacd09f7bb914bb51502e8b5d619f57f39a1d652596cc24";

    fn provenance_payload(digest_entry: &str) -> Vec<u8> {
        format!(
            r#"{{"_type":"https://in-toto.io/Statement/v0.1","predicateType":"https://slsa.dev/provenance/v0.2","subject":[{{"name":"blob","digest":{}}}],"predicate":{{}}}}"#,
            digest_entry
        )
        .into_bytes()
    }

    #[test]
    fn test_match_statement_success() {
        let envelope =
            envelope_with_payload(&provenance_payload(&format!("{{\"sha256\":\"{}\"}}", DIGEST)));
        let policy = VerificationPolicy::default().with_predicate_type("slsaprovenance");
        match_statement(&envelope, DIGEST, HashAlgorithm::Sha256, &policy).unwrap();
    }

    #[test]
    fn test_predicate_filter_applies_without_claims() {
        let envelope =
            envelope_with_payload(&provenance_payload(&format!("{{\"sha256\":\"{}\"}}", DIGEST)));
        let policy = VerificationPolicy::default()
            .with_predicate_type("custom")
            .check_claims(false);
        assert!(matches!(
            match_statement(&envelope, DIGEST, HashAlgorithm::Sha256, &policy),
            Err(Error::PredicateMismatch { .. })
        ));
    }

    #[test]
    fn test_claims_skipped_when_disabled() {
        let envelope =
            envelope_with_payload(&provenance_payload(r#"{"sha256":"0000000000000000000000000000000000000000000000000000000000000000"}"#));
        let policy = VerificationPolicy::default().check_claims(false);
        match_statement(&envelope, DIGEST, HashAlgorithm::Sha256, &policy).unwrap();
    }

    #[test]
    fn test_empty_subjects() {
        let payload = br#"{"_type":"t","predicateType":"https://slsa.dev/provenance/v0.2","subject":[]}"#;
        let envelope = envelope_with_payload(payload);
        let policy = VerificationPolicy::default();
        assert!(matches!(
            match_statement(&envelope, DIGEST, HashAlgorithm::Sha256, &policy),
            Err(Error::SubjectAbsent)
        ));
    }

    #[test]
    fn test_subject_without_algorithm_is_skipped_not_fatal() {
        let envelope = envelope_with_payload(&provenance_payload(r#"{"sha512":"00"}"#));
        let policy = VerificationPolicy::default();
        assert!(matches!(
            match_statement(&envelope, DIGEST, HashAlgorithm::Sha256, &policy),
            Err(Error::SubjectDigestMismatch)
        ));
    }

    #[test]
    fn test_subject_digest_compared_case_insensitively() {
        let digest_entry = format!("{{\"sha256\":\"{}\"}}", DIGEST.to_uppercase());
        let envelope = envelope_with_payload(&provenance_payload(&digest_entry));
        let policy = VerificationPolicy::default();
        match_statement(&envelope, DIGEST, HashAlgorithm::Sha256, &policy).unwrap();
    }

    /// A log that accepts or rejects every inclusion query
    struct StaticLog(bool);

    impl TransparencyLog for StaticLog {
        fn confirm_inclusion(&self, _message: &[u8], _signature: &[u8]) -> Result<()> {
            if self.0 {
                Ok(())
            } else {
                Err(Error::SignatureInvalid(
                    "no matching inclusion record".to_string(),
                ))
            }
        }
    }

    fn certificate_trust() -> TrustMaterial {
        TrustMaterial::CertificateChain(vec![vec![0x30]])
    }

    #[test]
    fn test_certificate_trust_requires_a_log() {
        let policy = VerificationPolicy::default();
        assert!(matches!(
            confirm_transparency(&certificate_trust(), &policy, None, b"msg", b"sig"),
            Err(Error::SignatureInvalid(_))
        ));
    }

    #[test]
    fn test_failed_inclusion_confirmation_propagates() {
        let policy = VerificationPolicy::default();
        let log = StaticLog(false);
        assert!(matches!(
            confirm_transparency(&certificate_trust(), &policy, Some(&log), b"msg", b"sig"),
            Err(Error::SignatureInvalid(_))
        ));
    }

    #[test]
    fn test_confirmed_inclusion_passes() {
        let policy = VerificationPolicy::default();
        let log = StaticLog(true);
        confirm_transparency(&certificate_trust(), &policy, Some(&log), b"msg", b"sig").unwrap();
    }

    #[test]
    fn test_ignore_tlog_skips_consultation() {
        let policy = VerificationPolicy::default().ignore_tlog(true);
        confirm_transparency(&certificate_trust(), &policy, None, b"msg", b"sig").unwrap();
    }

    #[test]
    fn test_key_trust_never_consults_the_log() {
        let policy = VerificationPolicy::default();
        let trust = TrustMaterial::from_pem_key(
            "-----BEGIN PUBLIC KEY-----
MFkwEwYHKoZIzj0CAQYIKoZIzj0DAQcDQgAESF79b1ToAtoakhBOHEU5UjnEiihV
gZPFIp557+TOoDxf14FODWc+sIPETk0OgCplAk60doVXbCv33IU4rXZHrg==
-----END PUBLIC KEY-----
",
        )
        .unwrap();
        confirm_transparency(&trust, &policy, None, b"msg", b"sig").unwrap();
    }

    #[test]
    fn test_malformed_payload_is_format_error() {
        let envelope = envelope_with_payload(b"{not a statement");
        let policy = VerificationPolicy::default();
        assert!(matches!(
            match_statement(&envelope, DIGEST, HashAlgorithm::Sha256, &policy),
            Err(Error::Format(_))
        ));
    }
}
