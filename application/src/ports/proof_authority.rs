//! Proof authority port
//!
//! Issues, verifies, and shares proof records. The signing key is owned by
//! the implementation and never crosses this boundary.

use chrono::{DateTime, Utc};
use gavel_domain::{GovernanceResult, ProofRecord, ShareToken, VerificationStatus};

/// Authority over proof records.
///
/// Issuance is side-effect-free apart from producing (and remembering) the
/// record; verification is idempotent and mutates nothing.
pub trait ProofAuthority: Send + Sync {
    /// Bind a governance result and the admitted request's canonical bytes
    /// into a signed, time-boxed record.
    fn issue(&self, result: &GovernanceResult, canonical_bytes: &[u8]) -> ProofRecord;

    /// Re-derive and check a record against a claimed input hash, at `now`.
    fn verify_at(
        &self,
        proof_id: &str,
        input_hash: &str,
        now: DateTime<Utc>,
    ) -> VerificationStatus;

    /// Convenience: verify against the current clock
    fn verify(&self, proof_id: &str, input_hash: &str) -> VerificationStatus {
        self.verify_at(proof_id, input_hash, Utc::now())
    }

    /// Produce an opaque bearer token for an existing record.
    /// Returns `None` when the record does not exist.
    fn issue_share_token(&self, proof_id: &str) -> Option<ShareToken>;

    /// Resolve a bearer token back to its record, honoring the token's own
    /// validity window. Resolution is by lookup; the token is never parsed.
    fn redeem_share_token(&self, token: &str, now: DateTime<Utc>) -> Option<ProofRecord>;
}
