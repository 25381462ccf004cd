//! Verify Proof use case
//!
//! Re-checks a previously issued proof record against a claimed input hash
//! and reports the outcome as a caller-facing check.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::debug;

use gavel_domain::ProofCheck;

use crate::ports::proof_authority::ProofAuthority;

/// Use case for verifying a proof record
pub struct VerifyProofUseCase {
    authority: Arc<dyn ProofAuthority>,
}

impl VerifyProofUseCase {
    pub fn new(authority: Arc<dyn ProofAuthority>) -> Self {
        Self { authority }
    }

    /// Check a proof against the current clock
    pub fn execute(&self, proof_id: &str, input_hash: &str) -> ProofCheck {
        self.execute_at(proof_id, input_hash, Utc::now())
    }

    /// Check a proof at an explicit instant. Verification mutates nothing
    /// and always returns a check, even for unknown ids.
    pub fn execute_at(&self, proof_id: &str, input_hash: &str, now: DateTime<Utc>) -> ProofCheck {
        let status = self.authority.verify_at(proof_id, input_hash, now);
        debug!(proof_id, %status, "proof verification");
        ProofCheck::from(status)
    }
}
