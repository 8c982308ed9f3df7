//! Core types and data structures for blob attestation verification
//!
//! This crate provides the fundamental data structures shared across the
//! verification pipeline: DSSE envelopes, in-toto statements, digest
//! algorithms, and artifact references.

pub mod artifact;
pub mod dsse;
pub mod encoding;
pub mod error;
pub mod hash;
pub mod intoto;

pub use artifact::Artifact;
pub use dsse::{pae, DsseEnvelope, DsseSignature};
pub use encoding::{DerBytes, KeyId, PayloadBytes, SignatureBytes};
pub use error::{Error, Result};
pub use hash::{Hasher, HashAlgorithm};
pub use intoto::{Statement, Subject, IN_TOTO_PAYLOAD_TYPE};
