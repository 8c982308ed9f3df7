//! Blob attestation verification
//!
//! This crate answers one question: is this signed statement
//! authentic, and does it legitimately describe this artifact under
//! the caller's policy?
//!
//! The pipeline is strictly fail-fast: resolve the artifact digest
//! (bounded by a size ceiling), load the envelope from a legacy
//! signature file or a sigstore bundle, verify at least one signature
//! against the trust material, then parse the in-toto statement and
//! match it against the policy.
//!
//! # Example
//!
//! ```no_run
//! use attest_verify::{TrustMaterial, VerificationPolicy, VerifyBlobAttestation};
//! use std::path::Path;
//!
//! # fn example() -> Result<(), attest_verify::Error> {
//! let pem = std::fs::read_to_string("cosign.pub")?;
//! let mut request = VerifyBlobAttestation::new(TrustMaterial::from_pem_key(&pem)?);
//! request.signature_path = Some("blob.att".into());
//! request.policy = VerificationPolicy::resolved().with_predicate_type("slsaprovenance");
//! request.exec(Some(Path::new("blob")), None)?;
//! # Ok(())
//! # }
//! ```

pub mod artifact;
pub mod error;
pub mod limits;
pub mod predicate;
pub mod tlog;
pub mod trust;
pub mod verify;

pub use error::{Error, Result};
pub use predicate::resolve_predicate_type;
pub use tlog::TransparencyLog;
pub use trust::TrustMaterial;
pub use verify::{VerificationPolicy, VerifyBlobAttestation};
