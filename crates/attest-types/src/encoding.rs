//! Byte newtypes with base64 JSON encoding
//!
//! The DSSE and bundle wire formats carry binary fields as standard
//! base64 strings. These wrappers keep the decoded bytes in memory and
//! handle the encoding at the serde boundary.

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

macro_rules! base64_newtype {
    ($(#[$doc:meta])* $name:ident) => {
        $(#[$doc])*
        #[derive(Debug, Clone, Default, PartialEq, Eq)]
        pub struct $name(Vec<u8>);

        impl $name {
            pub fn from_bytes(bytes: &[u8]) -> Self {
                Self(bytes.to_vec())
            }

            pub fn new(bytes: Vec<u8>) -> Self {
                Self(bytes)
            }

            pub fn as_bytes(&self) -> &[u8] {
                &self.0
            }

            pub fn into_vec(self) -> Vec<u8> {
                self.0
            }

            pub fn is_empty(&self) -> bool {
                self.0.is_empty()
            }
        }

        impl Serialize for $name {
            fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                serializer.serialize_str(&STANDARD.encode(&self.0))
            }
        }

        impl<'de> Deserialize<'de> for $name {
            fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
                let encoded = String::deserialize(deserializer)?;
                STANDARD
                    .decode(encoded.as_bytes())
                    .map($name)
                    .map_err(D::Error::custom)
            }
        }
    };
}

base64_newtype! {
    /// An opaque signed payload (e.g. an in-toto statement)
    PayloadBytes
}

base64_newtype! {
    /// Raw signature bytes
    SignatureBytes
}

base64_newtype! {
    /// DER-encoded material (e.g. an X.509 certificate)
    DerBytes
}

/// An optional key identifier hint attached to a signature
///
/// DSSE allows the keyid to be empty; it is a lookup hint, never trust
/// material on its own.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyId(String);

impl KeyId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}
