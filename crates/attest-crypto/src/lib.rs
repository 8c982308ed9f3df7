//! Signature verification primitives for blob attestation verification
//!
//! This crate decodes SubjectPublicKeyInfo key material (PEM or DER)
//! into a closed set of supported key kinds and verifies signatures
//! under the matching signing scheme. Scheme selection can be explicit
//! or detected from the key's algorithm identifier.

pub mod error;
pub mod key;
pub mod verify;

pub use error::{Error, Result};
pub use key::PublicKey;
pub use verify::{verify_signature, verify_signature_auto, SigningScheme};
