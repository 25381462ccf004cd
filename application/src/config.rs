//! Governance policy configuration.
//!
//! Groups the per-component policies into a single container the use cases
//! receive. Every threshold here is a default; deployments override them
//! through the infrastructure config loader.

use gavel_domain::{AdmissionPolicy, ContestationPolicy, GradePolicy};
use serde::{Deserialize, Serialize};

/// Timing knobs for the debate fan-out
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct DebateParams {
    /// Per-seat invocation timeout in milliseconds
    pub seat_timeout_ms: u64,
    /// Global deadline for the whole debate; seats still outstanding when it
    /// elapses are marked timed out
    pub deadline_ms: u64,
}

impl Default for DebateParams {
    fn default() -> Self {
        Self {
            seat_timeout_ms: 8_000,
            deadline_ms: 12_000,
        }
    }
}

/// Complete policy set for governance runs
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GovernancePolicy {
    pub admission: AdmissionPolicy,
    pub contestation: ContestationPolicy,
    pub grade: GradePolicy,
    pub debate: DebateParams,
    /// Version tag of the active policy pack, stamped into proof records
    pub policy_pack_version: String,
    /// Proof record validity window, in hours
    pub proof_validity_hours: i64,
}

impl Default for GovernancePolicy {
    fn default() -> Self {
        Self {
            admission: AdmissionPolicy::default(),
            contestation: ContestationPolicy::default(),
            grade: GradePolicy::default(),
            debate: DebateParams::default(),
            policy_pack_version: "policy-pack/2025.1".to_string(),
            proof_validity_hours: 24,
        }
    }
}

impl GovernancePolicy {
    pub fn with_policy_pack_version(mut self, version: impl Into<String>) -> Self {
        self.policy_pack_version = version.into();
        self
    }

    pub fn with_debate(mut self, debate: DebateParams) -> Self {
        self.debate = debate;
        self
    }

    pub fn with_grade(mut self, grade: GradePolicy) -> Self {
        self.grade = grade;
        self
    }

    pub fn with_admission(mut self, admission: AdmissionPolicy) -> Self {
        self.admission = admission;
        self
    }
}
