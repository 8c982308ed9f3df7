//! Artifact size ceiling configuration
//!
//! The ceiling is resolved once when the policy is constructed, never
//! read as ad-hoc global state mid-pipeline.

use std::env;

/// Built-in artifact size ceiling: 128 MiB
pub const DEFAULT_MAX_ARTIFACT_BYTES: u64 = 128 * 1024 * 1024;

/// Environment override for the artifact size ceiling
pub const MAX_ARTIFACT_BYTES_ENV: &str = "ATTEST_MAX_BLOB_SIZE";

/// Resolve the artifact size ceiling, consulting the environment
/// override
///
/// An unset or unparsable override falls back to the built-in default
/// rather than failing the call.
pub fn max_artifact_bytes() -> u64 {
    match env::var(MAX_ARTIFACT_BYTES_ENV) {
        Ok(raw) => match raw.trim().parse::<u64>() {
            Ok(limit) => limit,
            Err(_) => {
                tracing::warn!(
                    value = %raw,
                    "ignoring unparsable {} override",
                    MAX_ARTIFACT_BYTES_ENV
                );
                DEFAULT_MAX_ARTIFACT_BYTES
            }
        },
        Err(_) => DEFAULT_MAX_ARTIFACT_BYTES,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Serialized into one test since the process environment is shared.
    #[test]
    fn test_env_override_and_fallback() {
        env::remove_var(MAX_ARTIFACT_BYTES_ENV);
        assert_eq!(max_artifact_bytes(), DEFAULT_MAX_ARTIFACT_BYTES);

        env::set_var(MAX_ARTIFACT_BYTES_ENV, "128");
        assert_eq!(max_artifact_bytes(), 128);

        env::set_var(MAX_ARTIFACT_BYTES_ENV, "not-a-number");
        assert_eq!(max_artifact_bytes(), DEFAULT_MAX_ARTIFACT_BYTES);

        env::remove_var(MAX_ARTIFACT_BYTES_ENV);
    }
}
