//! Envelope/bundle loader
//!
//! Normalizes the two container formats into one in-memory shape: a
//! DSSE envelope plus, in bundle mode, the bundle's verification
//! material and the validated trusted root document.

use crate::bundle::Bundle;
use crate::error::{Error, Result};
use crate::trust_root::TrustedRootDocument;
use attest_types::DsseEnvelope;
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use std::path::Path;

/// The loader's normalized output
#[derive(Debug)]
pub struct LoadedAttestation {
    pub envelope: DsseEnvelope,
    /// Present when the attestation came from a bundle
    pub bundle: Option<Bundle>,
    /// Present when the attestation came from a bundle
    pub trusted_root: Option<TrustedRootDocument>,
}

/// Load a signed envelope from either container format
///
/// Exactly one of `signature_path` and `bundle_path` is expected; a
/// bundle source switches into bundle mode, which also requires a
/// trusted root.
pub fn load(
    signature_path: Option<&Path>,
    bundle_path: Option<&Path>,
    trusted_root_path: Option<&Path>,
) -> Result<LoadedAttestation> {
    match (signature_path, bundle_path) {
        (None, Some(bundle_path)) => load_bundle(bundle_path, trusted_root_path),
        (Some(signature_path), None) => load_legacy(signature_path),
        _ => Err(Error::AmbiguousSource),
    }
}

fn load_bundle(bundle_path: &Path, trusted_root_path: Option<&Path>) -> Result<LoadedAttestation> {
    let json = std::fs::read_to_string(bundle_path)?;
    let bundle = Bundle::from_json(&json)?;
    bundle.version()?;

    let envelope = bundle.require_dsse_envelope()?.clone();

    // The new bundle format asserts trusted-root based verification
    let trusted_root_path = trusted_root_path.ok_or(Error::MissingTrustedRoot)?;
    let trusted_root = TrustedRootDocument::from_file(trusted_root_path)?;

    tracing::debug!(media_type = %bundle.media_type, "loaded attestation bundle");

    Ok(LoadedAttestation {
        envelope,
        bundle: Some(bundle),
        trusted_root: Some(trusted_root),
    })
}

fn load_legacy(signature_path: &Path) -> Result<LoadedAttestation> {
    let raw = std::fs::read(signature_path)?;

    // The legacy source holds either the envelope JSON itself or its
    // base64 encoding; try the encoded form first.
    let decoded = std::str::from_utf8(&raw)
        .ok()
        .and_then(|text| STANDARD.decode(text.trim()).ok());

    let envelope = match decoded {
        Some(bytes) => DsseEnvelope::from_json(&bytes)?,
        None => DsseEnvelope::from_json(&raw)?,
    };

    Ok(LoadedAttestation {
        envelope,
        bundle: None,
        trusted_root: None,
    })
}
