//! Predicate type filter resolution
//!
//! The filter accepts short aliases for the well-known predicate
//! URIs, so callers can ask for `slsaprovenance` instead of spelling
//! out the full URI. Anything that is not an alias is compared
//! verbatim.

/// Well-known predicate type URIs
pub const PREDICATE_CUSTOM: &str = "https://cosign.sigstore.dev/attestation/v1";
pub const PREDICATE_SLSA_PROVENANCE_02: &str = "https://slsa.dev/provenance/v0.2";
pub const PREDICATE_SLSA_PROVENANCE_1: &str = "https://slsa.dev/provenance/v1";
pub const PREDICATE_SPDX: &str = "https://spdx.dev/Document";
pub const PREDICATE_CYCLONEDX: &str = "https://cyclonedx.org/bom";
pub const PREDICATE_LINK: &str = "https://in-toto.io/Link/v1";
pub const PREDICATE_VULN: &str = "https://cosign.sigstore.dev/attestation/vuln/v1";
pub const PREDICATE_OPENVEX: &str = "https://openvex.dev/ns";

/// Resolve a predicate type filter to the URI it should match
pub fn resolve_predicate_type(filter: &str) -> &str {
    match filter {
        "custom" => PREDICATE_CUSTOM,
        "slsaprovenance" | "slsaprovenance02" => PREDICATE_SLSA_PROVENANCE_02,
        "slsaprovenance1" => PREDICATE_SLSA_PROVENANCE_1,
        "spdx" | "spdxjson" => PREDICATE_SPDX,
        "cyclonedx" => PREDICATE_CYCLONEDX,
        "link" => PREDICATE_LINK,
        "vuln" => PREDICATE_VULN,
        "openvex" => PREDICATE_OPENVEX,
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_alias_resolution() {
        assert_eq!(
            resolve_predicate_type("slsaprovenance"),
            "https://slsa.dev/provenance/v0.2"
        );
        assert_eq!(
            resolve_predicate_type("custom"),
            "https://cosign.sigstore.dev/attestation/v1"
        );
        assert_eq!(
            resolve_predicate_type("vuln"),
            "https://cosign.sigstore.dev/attestation/vuln/v1"
        );
        assert_eq!(resolve_predicate_type("spdxjson"), resolve_predicate_type("spdx"));
    }

    #[test]
    fn test_non_alias_passes_through() {
        assert_eq!(
            resolve_predicate_type("https://example.com/predicate/v1"),
            "https://example.com/predicate/v1"
        );
        assert_eq!(
            resolve_predicate_type("notreallyslsaprovenance"),
            "notreallyslsaprovenance"
        );
    }
}
