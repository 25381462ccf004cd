//! Share Token use cases
//!
//! Issues opaque bearer tokens for existing proof records and redeems them
//! back into the record, honoring the token's validity window.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use thiserror::Error;
use tracing::{debug, info};

use gavel_domain::{ProofRecord, ShareToken};

use crate::ports::proof_authority::ProofAuthority;

#[derive(Error, Debug)]
pub enum ShareTokenError {
    #[error("No proof record found for id '{0}'")]
    ProofNotFound(String),

    #[error("Share token is unknown or expired")]
    InvalidToken,
}

/// Use case for issuing and redeeming share tokens
pub struct ShareTokenUseCase {
    authority: Arc<dyn ProofAuthority>,
}

impl ShareTokenUseCase {
    pub fn new(authority: Arc<dyn ProofAuthority>) -> Self {
        Self { authority }
    }

    /// Mint a bearer token for an existing proof record.
    ///
    /// The token is opaque: it encodes nothing and resolves only by lookup
    /// at the issuing authority.
    pub fn issue(&self, proof_id: &str) -> Result<ShareToken, ShareTokenError> {
        let token = self
            .authority
            .issue_share_token(proof_id)
            .ok_or_else(|| ShareTokenError::ProofNotFound(proof_id.to_string()))?;
        info!(proof_id, token = %token.masked(), "share token issued");
        Ok(token)
    }

    /// Resolve a token back to its proof record at the current clock
    pub fn redeem(&self, token: &str) -> Result<ProofRecord, ShareTokenError> {
        self.redeem_at(token, Utc::now())
    }

    /// Resolve a token at an explicit instant. Unknown and expired tokens
    /// are indistinguishable to the caller.
    pub fn redeem_at(
        &self,
        token: &str,
        now: DateTime<Utc>,
    ) -> Result<ProofRecord, ShareTokenError> {
        match self.authority.redeem_share_token(token, now) {
            Some(record) => {
                debug!(proof_id = %record.proof_id, "share token redeemed");
                Ok(record)
            }
            None => Err(ShareTokenError::InvalidToken),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeDelta;
    use gavel_domain::{uuid_v4, GovernanceResult, VerificationStatus};
    use std::collections::HashMap;
    use std::sync::Mutex;

    struct TokenAuthority {
        records: Mutex<HashMap<String, ProofRecord>>,
        tokens: Mutex<HashMap<String, ShareToken>>,
    }

    impl TokenAuthority {
        fn with_record(record: ProofRecord) -> Self {
            let mut map = HashMap::new();
            map.insert(record.proof_id.clone(), record);
            Self {
                records: Mutex::new(map),
                tokens: Mutex::new(HashMap::new()),
            }
        }
    }

    impl ProofAuthority for TokenAuthority {
        fn issue(&self, _result: &GovernanceResult, _canonical_bytes: &[u8]) -> ProofRecord {
            unimplemented!("not used in these tests")
        }

        fn verify_at(
            &self,
            _proof_id: &str,
            _input_hash: &str,
            _now: DateTime<Utc>,
        ) -> VerificationStatus {
            VerificationStatus::Valid
        }

        fn issue_share_token(&self, proof_id: &str) -> Option<ShareToken> {
            if !self.records.lock().unwrap().contains_key(proof_id) {
                return None;
            }
            let token = ShareToken::new(uuid_v4(), proof_id);
            self.tokens
                .lock()
                .unwrap()
                .insert(token.token.clone(), token.clone());
            Some(token)
        }

        fn redeem_share_token(&self, token: &str, now: DateTime<Utc>) -> Option<ProofRecord> {
            let tokens = self.tokens.lock().unwrap();
            let share = tokens.get(token)?;
            if share.is_expired_at(now) {
                return None;
            }
            self.records.lock().unwrap().get(&share.proof_id).cloned()
        }
    }

    fn record() -> ProofRecord {
        let now = Utc::now();
        ProofRecord {
            proof_id: "proof-1".to_string(),
            input_hash: "abc123".to_string(),
            issued_at: now,
            expires_at: now + TimeDelta::hours(24),
            policy_pack_version: "policy-pack/test".to_string(),
            signature: "sig".to_string(),
        }
    }

    #[test]
    fn test_issue_and_redeem_roundtrip() {
        let uc = ShareTokenUseCase::new(Arc::new(TokenAuthority::with_record(record())));
        let token = uc.issue("proof-1").unwrap();
        let redeemed = uc.redeem(&token.token).unwrap();
        assert_eq!(redeemed.proof_id, "proof-1");
    }

    #[test]
    fn test_issue_for_unknown_proof_fails() {
        let uc = ShareTokenUseCase::new(Arc::new(TokenAuthority::with_record(record())));
        assert!(matches!(
            uc.issue("proof-missing"),
            Err(ShareTokenError::ProofNotFound(_))
        ));
    }

    #[test]
    fn test_unknown_token_rejected() {
        let uc = ShareTokenUseCase::new(Arc::new(TokenAuthority::with_record(record())));
        assert!(matches!(
            uc.redeem("not-a-token"),
            Err(ShareTokenError::InvalidToken)
        ));
    }

    #[test]
    fn test_expired_token_rejected_like_unknown() {
        let uc = ShareTokenUseCase::new(Arc::new(TokenAuthority::with_record(record())));
        let token = uc.issue("proof-1").unwrap();
        let later = Utc::now() + TimeDelta::days(ShareToken::VALIDITY_DAYS + 1);
        assert!(matches!(
            uc.redeem_at(&token.token, later),
            Err(ShareTokenError::InvalidToken)
        ));
    }
}
