//! Ed25519-backed proof authority.
//!
//! Owns the signing key for the process lifetime; the key is generated (or
//! injected) at construction and never serialized, logged, or returned.
//! Verification re-derives the signing payload from the stored record and
//! checks it against the authority's public key.

use std::collections::HashMap;
use std::sync::RwLock;

use chrono::{DateTime, TimeDelta, Utc};
use ed25519_dalek::{Signature, Signer, SigningKey, Verifier, VerifyingKey};
use rand::rngs::OsRng;
use rand::RngCore;
use sha2::{Digest, Sha256};
use tracing::{debug, info};

use gavel_application::ProofAuthority;
use gavel_domain::proof::signing_payload;
use gavel_domain::{uuid_v4, GovernanceResult, ProofRecord, ShareToken, Verdict, VerificationStatus};

/// A record as the authority remembers it. The verdict is kept alongside
/// because the signing payload binds it, but the external record shape does
/// not carry it.
#[derive(Debug, Clone)]
struct StoredProof {
    record: ProofRecord,
    verdict: Verdict,
}

/// In-process proof authority signing with a per-process Ed25519 key.
///
/// Records and share tokens live in memory; restarting the process discards
/// both, which also rotates the key.
pub struct Ed25519ProofAuthority {
    signing_key: SigningKey,
    policy_pack_version: String,
    validity: TimeDelta,
    records: RwLock<HashMap<String, StoredProof>>,
    tokens: RwLock<HashMap<String, ShareToken>>,
}

impl Ed25519ProofAuthority {
    pub fn new(
        signing_key: SigningKey,
        policy_pack_version: impl Into<String>,
        validity_hours: i64,
    ) -> Self {
        Self {
            signing_key,
            policy_pack_version: policy_pack_version.into(),
            validity: TimeDelta::hours(validity_hours),
            records: RwLock::new(HashMap::new()),
            tokens: RwLock::new(HashMap::new()),
        }
    }

    /// Generate a fresh signing key from the OS entropy source
    pub fn generate(policy_pack_version: impl Into<String>, validity_hours: i64) -> Self {
        let signing_key = SigningKey::generate(&mut OsRng);
        let authority = Self::new(signing_key, policy_pack_version, validity_hours);
        info!(
            policy_pack_version = %authority.policy_pack_version,
            "proof authority initialized with fresh signing key"
        );
        authority
    }

    /// Public half of the signing key, safe to expose
    pub fn verifying_key(&self) -> VerifyingKey {
        self.signing_key.verifying_key()
    }

    /// Hex SHA-256 of a request's canonical bytes
    pub fn input_hash(canonical_bytes: &[u8]) -> String {
        hex::encode(Sha256::digest(canonical_bytes))
    }

    fn random_token() -> String {
        let mut bytes = [0u8; 32];
        OsRng.fill_bytes(&mut bytes);
        hex::encode(bytes)
    }
}

impl ProofAuthority for Ed25519ProofAuthority {
    fn issue(&self, result: &GovernanceResult, canonical_bytes: &[u8]) -> ProofRecord {
        let input_hash = Self::input_hash(canonical_bytes);
        let issued_at = Utc::now();
        let expires_at = issued_at + self.validity;

        let payload = signing_payload(
            &input_hash,
            result.verdict,
            &self.policy_pack_version,
            issued_at,
            expires_at,
        );
        let signature = hex::encode(self.signing_key.sign(&payload).to_bytes());

        let record = ProofRecord {
            proof_id: uuid_v4(),
            input_hash,
            issued_at,
            expires_at,
            policy_pack_version: self.policy_pack_version.clone(),
            signature,
        };

        debug!(proof_id = %record.proof_id, verdict = %result.verdict, "proof record issued");
        self.records.write().unwrap().insert(
            record.proof_id.clone(),
            StoredProof {
                record: record.clone(),
                verdict: result.verdict,
            },
        );
        record
    }

    fn verify_at(
        &self,
        proof_id: &str,
        input_hash: &str,
        now: DateTime<Utc>,
    ) -> VerificationStatus {
        let records = self.records.read().unwrap();
        let Some(stored) = records.get(proof_id) else {
            return VerificationStatus::NotFound;
        };

        if stored.record.input_hash != input_hash {
            return VerificationStatus::HashMismatch;
        }

        let payload = signing_payload(
            &stored.record.input_hash,
            stored.verdict,
            &stored.record.policy_pack_version,
            stored.record.issued_at,
            stored.record.expires_at,
        );
        let Ok(sig_bytes) = hex::decode(&stored.record.signature) else {
            return VerificationStatus::SignatureInvalid;
        };
        let Ok(signature) = Signature::from_slice(&sig_bytes) else {
            return VerificationStatus::SignatureInvalid;
        };
        if self
            .signing_key
            .verifying_key()
            .verify(&payload, &signature)
            .is_err()
        {
            return VerificationStatus::SignatureInvalid;
        }

        if stored.record.is_expired_at(now) {
            return VerificationStatus::Expired;
        }

        VerificationStatus::Valid
    }

    fn issue_share_token(&self, proof_id: &str) -> Option<ShareToken> {
        if !self.records.read().unwrap().contains_key(proof_id) {
            return None;
        }
        let token = ShareToken::new(Self::random_token(), proof_id);
        self.tokens
            .write()
            .unwrap()
            .insert(token.token.clone(), token.clone());
        debug!(proof_id, token = %token.masked(), "share token issued");
        Some(token)
    }

    fn redeem_share_token(&self, token: &str, now: DateTime<Utc>) -> Option<ProofRecord> {
        let tokens = self.tokens.read().unwrap();
        let share = tokens.get(token)?;
        if share.is_expired_at(now) {
            return None;
        }
        self.records
            .read()
            .unwrap()
            .get(&share.proof_id)
            .map(|s| s.record.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gavel_domain::{Request, RequestDomain, Verdict};

    fn authority() -> Ed25519ProofAuthority {
        Ed25519ProofAuthority::generate("policy-pack/test", 24)
    }

    fn result() -> GovernanceResult {
        GovernanceResult::terminal(
            "trace-1",
            "req-1",
            Verdict::Certified,
            "test",
            "test result",
        )
    }

    #[test]
    fn test_issue_then_verify_roundtrip() {
        let authority = authority();
        let request = Request::new(RequestDomain::Qna, "is this supported?");
        let record = authority.issue(&result(), &request.canonical_bytes());

        let status = authority.verify(&record.proof_id, &record.input_hash);
        assert_eq!(status, VerificationStatus::Valid);
    }

    #[test]
    fn test_input_hash_is_hex_sha256() {
        let hash = Ed25519ProofAuthority::input_hash(b"payload");
        assert_eq!(hash.len(), 64);
        assert!(hash.chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn test_tampered_hash_detected() {
        let authority = authority();
        let request = Request::new(RequestDomain::Qna, "is this supported?");
        let record = authority.issue(&result(), &request.canonical_bytes());

        let tampered = Ed25519ProofAuthority::input_hash(b"different input");
        let status = authority.verify(&record.proof_id, &tampered);
        assert_eq!(status, VerificationStatus::HashMismatch);
    }

    #[test]
    fn test_verification_is_repeatable_and_side_effect_free() {
        let authority = authority();
        let request = Request::new(RequestDomain::Qna, "is this supported?");
        let record = authority.issue(&result(), &request.canonical_bytes());

        let first = authority.verify(&record.proof_id, &record.input_hash);
        let second = authority.verify(&record.proof_id, &record.input_hash);
        assert_eq!(first, VerificationStatus::Valid);
        assert_eq!(second, first);

        // A failed check in between does not disturb the stored record
        let tampered = Ed25519ProofAuthority::input_hash(b"different input");
        assert_eq!(
            authority.verify(&record.proof_id, &tampered),
            VerificationStatus::HashMismatch
        );
        assert_eq!(
            authority.verify(&record.proof_id, &record.input_hash),
            VerificationStatus::Valid
        );
    }

    #[test]
    fn test_reissued_proof_verifies_independently() {
        let authority = authority();
        let request = Request::new(RequestDomain::Qna, "is this supported?");
        let first = authority.issue(&result(), &request.canonical_bytes());
        std::thread::sleep(std::time::Duration::from_millis(2));
        let second = authority.issue(&result(), &request.canonical_bytes());

        assert_ne!(first.proof_id, second.proof_id);
        assert_ne!(first.issued_at, second.issued_at);
        assert_eq!(first.input_hash, second.input_hash);
        assert_eq!(
            authority.verify(&first.proof_id, &first.input_hash),
            VerificationStatus::Valid
        );
        assert_eq!(
            authority.verify(&second.proof_id, &second.input_hash),
            VerificationStatus::Valid
        );
    }

    #[test]
    fn test_unknown_proof_not_found() {
        let authority = authority();
        let status = authority.verify("no-such-proof", "whatever");
        assert_eq!(status, VerificationStatus::NotFound);
    }

    #[test]
    fn test_expired_record_reports_expired() {
        let authority = Ed25519ProofAuthority::generate("policy-pack/test", 24);
        let request = Request::new(RequestDomain::Qna, "is this supported?");
        let record = authority.issue(&result(), &request.canonical_bytes());

        let later = record.expires_at + TimeDelta::seconds(1);
        let status = authority.verify_at(&record.proof_id, &record.input_hash, later);
        assert_eq!(status, VerificationStatus::Expired);
    }

    #[test]
    fn test_signature_binds_to_this_authority() {
        // A record issued by one authority does not verify under another key
        let issuer = authority();
        let other = authority();
        let request = Request::new(RequestDomain::Qna, "is this supported?");
        let record = issuer.issue(&result(), &request.canonical_bytes());

        // Replay the stored record into the other authority's store
        other.records.write().unwrap().insert(
            record.proof_id.clone(),
            StoredProof {
                record: record.clone(),
                verdict: Verdict::Certified,
            },
        );
        let status = other.verify(&record.proof_id, &record.input_hash);
        assert_eq!(status, VerificationStatus::SignatureInvalid);
    }

    #[test]
    fn test_share_token_roundtrip() {
        let authority = authority();
        let request = Request::new(RequestDomain::Qna, "is this supported?");
        let record = authority.issue(&result(), &request.canonical_bytes());

        let token = authority.issue_share_token(&record.proof_id).unwrap();
        assert_ne!(token.token, record.proof_id);

        let redeemed = authority
            .redeem_share_token(&token.token, Utc::now())
            .unwrap();
        assert_eq!(redeemed.proof_id, record.proof_id);
    }

    #[test]
    fn test_share_token_for_unknown_proof_denied() {
        let authority = authority();
        assert!(authority.issue_share_token("no-such-proof").is_none());
    }

    #[test]
    fn test_expired_share_token_denied() {
        let authority = authority();
        let request = Request::new(RequestDomain::Qna, "is this supported?");
        let record = authority.issue(&result(), &request.canonical_bytes());
        let token = authority.issue_share_token(&record.proof_id).unwrap();

        let later = Utc::now() + TimeDelta::days(ShareToken::VALIDITY_DAYS + 1);
        assert!(authority.redeem_share_token(&token.token, later).is_none());
    }

    #[test]
    fn test_tokens_are_random_and_opaque() {
        let authority = authority();
        let request = Request::new(RequestDomain::Qna, "is this supported?");
        let record = authority.issue(&result(), &request.canonical_bytes());

        let a = authority.issue_share_token(&record.proof_id).unwrap();
        let b = authority.issue_share_token(&record.proof_id).unwrap();
        assert_ne!(a.token, b.token);
        assert!(!a.token.contains(&record.proof_id));
    }
}
