//! Proof record - the externally stable attestation shape.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::governance::Verdict;

/// A signed attestation binding a verdict to the exact admitted request and
/// a policy version. Read-only after issuance; becomes invalid (not deleted)
/// after `expires_at`.
///
/// The field set and snake_case names are a stable external contract.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProofRecord {
    pub proof_id: String,
    /// Hex SHA-256 of the admitted request's canonical bytes
    pub input_hash: String,
    pub issued_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
    pub policy_pack_version: String,
    /// Hex Ed25519 signature over the signing payload
    pub signature: String,
}

impl ProofRecord {
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        now >= self.expires_at
    }
}

/// Canonical byte payload the proof signature covers.
///
/// Shared by issuer and verifier so the two always agree on what was
/// signed: `{input_hash, verdict, policy_pack_version, issued_at,
/// expires_at}` joined with newline separators, timestamps as RFC 3339.
pub fn signing_payload(
    input_hash: &str,
    verdict: Verdict,
    policy_pack_version: &str,
    issued_at: DateTime<Utc>,
    expires_at: DateTime<Utc>,
) -> Vec<u8> {
    let text = format!(
        "{}\n{}\n{}\n{}\n{}",
        input_hash,
        verdict,
        policy_pack_version,
        issued_at.to_rfc3339(),
        expires_at.to_rfc3339()
    );
    text.into_bytes()
}

/// Outcome of verifying a proof record - never a bare boolean, so callers
/// can distinguish tampering from lapsed validity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VerificationStatus {
    Valid,
    Expired,
    HashMismatch,
    SignatureInvalid,
    NotFound,
}

impl VerificationStatus {
    pub fn is_valid(&self) -> bool {
        matches!(self, VerificationStatus::Valid)
    }

    pub fn message(&self) -> &'static str {
        match self {
            VerificationStatus::Valid => "proof record is authentic and unexpired",
            VerificationStatus::Expired => "proof record has passed its expiry",
            VerificationStatus::HashMismatch => "input hash does not match the admitted request",
            VerificationStatus::SignatureInvalid => "signature does not verify",
            VerificationStatus::NotFound => "no proof record with that id",
        }
    }
}

impl std::fmt::Display for VerificationStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            VerificationStatus::Valid => "valid",
            VerificationStatus::Expired => "expired",
            VerificationStatus::HashMismatch => "hash_mismatch",
            VerificationStatus::SignatureInvalid => "signature_invalid",
            VerificationStatus::NotFound => "not_found",
        };
        write!(f, "{}", s)
    }
}

/// Caller-facing verification response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProofCheck {
    pub valid: bool,
    pub status: VerificationStatus,
    pub message: String,
}

impl From<VerificationStatus> for ProofCheck {
    fn from(status: VerificationStatus) -> Self {
        Self {
            valid: status.is_valid(),
            status,
            message: status.message().to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeDelta;

    #[test]
    fn test_signing_payload_stable() {
        let issued = Utc::now();
        let expires = issued + TimeDelta::hours(24);
        let a = signing_payload("abc123", Verdict::Certified, "policy-v1", issued, expires);
        let b = signing_payload("abc123", Verdict::Certified, "policy-v1", issued, expires);
        assert_eq!(a, b);
    }

    #[test]
    fn test_signing_payload_binds_every_field() {
        let issued = Utc::now();
        let expires = issued + TimeDelta::hours(24);
        let base = signing_payload("abc123", Verdict::Certified, "policy-v1", issued, expires);

        let other_hash =
            signing_payload("abc124", Verdict::Certified, "policy-v1", issued, expires);
        let other_verdict =
            signing_payload("abc123", Verdict::Refused, "policy-v1", issued, expires);
        let other_policy =
            signing_payload("abc123", Verdict::Certified, "policy-v2", issued, expires);
        assert_ne!(base, other_hash);
        assert_ne!(base, other_verdict);
        assert_ne!(base, other_policy);
    }

    #[test]
    fn test_expiry_boundary_inclusive() {
        let issued = Utc::now();
        let record = ProofRecord {
            proof_id: "p-1".to_string(),
            input_hash: "abc".to_string(),
            issued_at: issued,
            expires_at: issued + TimeDelta::hours(1),
            policy_pack_version: "policy-v1".to_string(),
            signature: "00".to_string(),
        };
        assert!(!record.is_expired_at(issued));
        // At exactly expires_at the record is no longer valid
        assert!(record.is_expired_at(record.expires_at));
        assert!(record.is_expired_at(record.expires_at + TimeDelta::seconds(1)));
    }

    #[test]
    fn test_check_from_status() {
        let check: ProofCheck = VerificationStatus::Expired.into();
        assert!(!check.valid);
        assert_eq!(check.status, VerificationStatus::Expired);
        assert!(check.message.contains("expiry"));

        let ok: ProofCheck = VerificationStatus::Valid.into();
        assert!(ok.valid);
    }

    #[test]
    fn test_status_wire_names() {
        assert_eq!(
            serde_json::to_string(&VerificationStatus::HashMismatch).unwrap(),
            "\"hash_mismatch\""
        );
        assert_eq!(VerificationStatus::SignatureInvalid.to_string(), "signature_invalid");
    }
}
