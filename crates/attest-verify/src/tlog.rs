//! Transparency log collaborator seam
//!
//! The actual log client (network calls, inclusion-proof
//! cryptography, retry policy) lives outside this crate. The verifier
//! only decides whether consultation is required and treats the
//! collaborator as a fail/succeed black box.

use crate::error::Result;

/// An append-only public log that can confirm a signature and
/// identity were recorded
pub trait TransparencyLog {
    /// Confirm an inclusion record consistent with the given signed
    /// message and signature
    ///
    /// An error here is final; the verifier does not retry.
    fn confirm_inclusion(&self, message: &[u8], signature: &[u8]) -> Result<()>;
}
