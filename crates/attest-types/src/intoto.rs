//! In-toto statement types
//!
//! The in-toto statement is the JSON structure carried as a DSSE payload.
//! It declares a predicate type and the subjects the predicate describes.
//! Specification: https://github.com/in-toto/attestation

use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// The payload type declared by envelopes carrying in-toto statements
pub const IN_TOTO_PAYLOAD_TYPE: &str = "application/vnd.in-toto+json";

/// An in-toto attestation statement
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Statement {
    /// Statement type URI (e.g. `https://in-toto.io/Statement/v0.1`)
    #[serde(rename = "_type")]
    pub statement_type: String,
    /// Predicate type URI classifying the claim this statement makes
    pub predicate_type: String,
    /// Subjects the predicate describes
    #[serde(rename = "subject", default)]
    pub subjects: Vec<Subject>,
    /// Opaque predicate body
    #[serde(default)]
    pub predicate: serde_json::Value,
}

/// A named artifact reference plus its digests
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Subject {
    #[serde(default)]
    pub name: String,
    /// Map of digest algorithm name to lowercase hex digest value
    #[serde(default)]
    pub digest: BTreeMap<String, String>,
}

impl Statement {
    /// Parse a statement from decoded DSSE payload bytes
    ///
    /// Fails if the payload is not JSON or lacks a `predicateType`.
    pub fn from_payload(payload: &[u8]) -> Result<Self> {
        Ok(serde_json::from_slice(payload)?)
    }
}

impl Subject {
    /// Look up this subject's digest for the named algorithm
    ///
    /// A subject with no entry for the algorithm is simply not a
    /// match candidate; absence is never an error here.
    pub fn digest_for(&self, algorithm: &str) -> Option<&str> {
        self.digest.get(algorithm).map(String::as_str)
    }
}
