//! Artifact digest resolution
//!
//! Resolves the verification subject to a lowercase hex digest:
//! either a bounded streaming hash of a local file, or a caller
//! supplied digest validated and passed through without I/O.

use crate::error::{Error, Result};
use attest_types::{Artifact, HashAlgorithm};
use std::fs::File;
use std::io::Read;

const READ_CHUNK_BYTES: usize = 64 * 1024;

/// Resolve an artifact reference to its digest under `algorithm`
///
/// Size enforcement happens while streaming, before any digest is
/// produced; it applies regardless of downstream policy. With no
/// artifact reference at all the digest of the empty input is
/// returned, which only ever matters when claims are checked.
pub fn resolve(artifact: Option<&Artifact>, algorithm: HashAlgorithm, limit: u64) -> Result<String> {
    match artifact {
        None => Ok(algorithm.digest_hex(b"")),
        Some(Artifact::Digest {
            algorithm: supplied,
            value,
        }) => {
            if *supplied != algorithm {
                return Err(Error::DigestAlgorithmUnsupported(format!(
                    "digest was computed with {} but {} was requested",
                    supplied, algorithm
                )));
            }
            let value = value.to_ascii_lowercase();
            algorithm.check_digest(&value)?;
            Ok(value)
        }
        Some(Artifact::Path(path)) => {
            let file = File::open(path)?;
            let digest = digest_bounded(file, algorithm, limit)?;
            tracing::debug!(path = %path.display(), %algorithm, digest, "resolved artifact digest");
            Ok(digest)
        }
    }
}

fn digest_bounded(mut reader: impl Read, algorithm: HashAlgorithm, limit: u64) -> Result<String> {
    let mut hasher = algorithm.hasher();
    let mut consumed: u64 = 0;
    let mut chunk = [0u8; READ_CHUNK_BYTES];

    loop {
        let n = reader.read(&mut chunk)?;
        if n == 0 {
            break;
        }
        consumed += n as u64;
        if consumed > limit {
            return Err(Error::SizeLimitExceeded { limit });
        }
        hasher.update(&chunk[..n]);
    }

    Ok(hasher.finalize_hex())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    const BLOB: &[u8] = b"some-payload";
    const BLOB_SHA256: &str = "658781cd4ed9bca60dacd09f7bb914bb51502e8b5d619f57f39a1d652596cc24";

    #[test]
    fn test_resolve_path() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(BLOB).unwrap();

        let artifact = Artifact::from_path(file.path());
        let digest = resolve(Some(&artifact), HashAlgorithm::Sha256, 1024).unwrap();
        assert_eq!(digest, BLOB_SHA256);
    }

    #[test]
    fn test_resolve_path_over_limit() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(&[0u8; 140]).unwrap();

        let artifact = Artifact::from_path(file.path());
        assert!(matches!(
            resolve(Some(&artifact), HashAlgorithm::Sha256, 128),
            Err(Error::SizeLimitExceeded { limit: 128 })
        ));
    }

    #[test]
    fn test_resolve_path_exactly_at_limit() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(&[0u8; 128]).unwrap();

        let artifact = Artifact::from_path(file.path());
        assert!(resolve(Some(&artifact), HashAlgorithm::Sha256, 128).is_ok());
    }

    #[test]
    fn test_resolve_digest_passthrough_no_io() {
        let artifact = Artifact::from_digest(HashAlgorithm::Sha256, BLOB_SHA256);
        let digest = resolve(Some(&artifact), HashAlgorithm::Sha256, 0).unwrap();
        assert_eq!(digest, BLOB_SHA256);
    }

    #[test]
    fn test_resolve_digest_normalizes_case() {
        let artifact = Artifact::from_digest(HashAlgorithm::Sha256, BLOB_SHA256.to_uppercase());
        let digest = resolve(Some(&artifact), HashAlgorithm::Sha256, 0).unwrap();
        assert_eq!(digest, BLOB_SHA256);
    }

    #[test]
    fn test_resolve_digest_bad_length() {
        let artifact = Artifact::from_digest(HashAlgorithm::Sha256, "abcd");
        assert!(matches!(
            resolve(Some(&artifact), HashAlgorithm::Sha256, 0),
            Err(Error::Format(_))
        ));
    }

    #[test]
    fn test_resolve_nothing_hashes_empty_input() {
        let digest = resolve(None, HashAlgorithm::Sha256, 0).unwrap();
        assert_eq!(
            digest,
            "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"
        );
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let artifact = Artifact::from_path("/nonexistent/blob");
        assert!(matches!(
            resolve(Some(&artifact), HashAlgorithm::Sha256, 128),
            Err(Error::Io(_))
        ));
    }
}
