//! Container format handling for blob attestation verification
//!
//! A detached attestation arrives in one of two container formats: a
//! legacy signature file carrying a raw DSSE envelope, or a portable
//! sigstore bundle that wraps the envelope together with verification
//! material. This crate parses both and normalizes them into a single
//! in-memory shape for the verifier.

pub mod bundle;
pub mod error;
pub mod loader;
pub mod trust_root;

pub use bundle::{
    Bundle, BundleContent, CertificateChain, EncodedCertificate, MediaType, MessageDigest,
    MessageSignature, PublicKeyHint, VerificationMaterial, VerificationMaterialContent,
};
pub use error::{Error, Result};
pub use loader::{load, LoadedAttestation};
pub use trust_root::{TrustedRootDocument, TRUSTED_ROOT_MEDIA_TYPE};
