//! Share tokens - opaque, time-limited bearer references to proof records.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// How many leading characters a masked token shows
const MASK_PREFIX: usize = 8;
/// How many trailing characters a masked token shows
const MASK_SUFFIX: usize = 4;

/// A bearer token referencing one proof record.
///
/// The token string carries no decodable content; redemption resolves
/// through a lookup, never by parsing. Any UI-facing display must use
/// [`ShareToken::masked`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShareToken {
    /// The opaque bearer string
    pub token: String,
    /// Proof record this token resolves to
    pub proof_id: String,
    pub issued_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}

impl ShareToken {
    /// Validity window for share tokens
    pub const VALIDITY_DAYS: i64 = 7;

    /// Mint a token for a proof record, valid for [`Self::VALIDITY_DAYS`]
    /// from now.
    pub fn new(token: impl Into<String>, proof_id: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            token: token.into(),
            proof_id: proof_id.into(),
            issued_at: now,
            expires_at: now + chrono::TimeDelta::days(Self::VALIDITY_DAYS),
        }
    }

    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        now >= self.expires_at
    }

    /// Masked display form: first 8 and last 4 characters visible
    pub fn masked(&self) -> String {
        mask_token(&self.token)
    }
}

/// Mask a token for display: `first 8…last 4`. Tokens too short to mask
/// meaningfully are returned unchanged.
pub fn mask_token(token: &str) -> String {
    let chars: Vec<char> = token.chars().collect();
    if chars.len() <= MASK_PREFIX + MASK_SUFFIX {
        return token.to_string();
    }
    let prefix: String = chars[..MASK_PREFIX].iter().collect();
    let suffix: String = chars[chars.len() - MASK_SUFFIX..].iter().collect();
    format!("{}…{}", prefix, suffix)
}
