//! Compact per-event decision record for the throughput monitor.

use serde::{Deserialize, Serialize};

use crate::core::current_timestamp_ms;
use crate::governance::{GovernanceResult, Verdict};
use crate::judge::Grade;

/// One governed decision, compact enough to keep hundreds in memory.
/// Historical entries are never mutated in place.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Decision {
    pub request_id: String,
    pub grade: Grade,
    pub verdict: Verdict,
    pub reason: String,
    /// Present when a proof record was issued; resolves to exactly one record
    #[serde(skip_serializing_if = "Option::is_none")]
    pub proof_id: Option<String>,
    pub latency_ms: u64,
    /// Milliseconds since epoch
    pub timestamp: u64,
}

impl Decision {
    /// Build a decision record from a finished governance run
    pub fn from_result(
        result: &GovernanceResult,
        proof_id: Option<String>,
        latency_ms: u64,
    ) -> Self {
        Self {
            request_id: result.request_id.clone(),
            grade: result.grade,
            verdict: result.verdict,
            reason: result.reason(),
            proof_id,
            latency_ms,
            timestamp: current_timestamp_ms(),
        }
    }

    pub fn is_certified(&self) -> bool {
        self.verdict == Verdict::Certified
    }
}
