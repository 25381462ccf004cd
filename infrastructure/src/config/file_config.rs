//! Raw TOML configuration data types.
//!
//! These structs represent the exact structure of the TOML config file and
//! convert into the application-layer policy. Every section is optional;
//! missing values fall back to defaults.
//!
//! Example configuration:
//!
//! ```toml
//! [panel]
//! seats = 7
//! seat_timeout_ms = 8000
//! deadline_ms = 12000
//!
//! [admission]
//! block_terms = ["credentials dump"]
//! restrict_terms = ["medical", "legal advice"]
//!
//! [proof]
//! policy_pack_version = "policy-pack/2025.1"
//! validity_hours = 24
//! ```

use serde::{Deserialize, Serialize};

use gavel_application::{DebateParams, GovernancePolicy};
use gavel_domain::{
    AdmissionPolicy, ContestationPolicy, DecisionWindow, GradePolicy, SeatRoster,
};

/// `[panel]` section - debate panel shape and timing
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FilePanelConfig {
    /// Number of synthetic seats in the roster
    pub seats: usize,
    pub seat_timeout_ms: u64,
    pub deadline_ms: u64,
}

impl Default for FilePanelConfig {
    fn default() -> Self {
        let debate = DebateParams::default();
        Self {
            seats: SeatRoster::DEFAULT_SIZE,
            seat_timeout_ms: debate.seat_timeout_ms,
            deadline_ms: debate.deadline_ms,
        }
    }
}

/// `[admission]` section - pre-debate risk gate
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileAdmissionConfig {
    pub max_payload_bytes: usize,
    pub block_terms: Vec<String>,
    pub restrict_terms: Vec<String>,
    pub max_restricted_matches: usize,
}

impl Default for FileAdmissionConfig {
    fn default() -> Self {
        let policy = AdmissionPolicy::default();
        Self {
            max_payload_bytes: policy.max_payload_bytes,
            block_terms: policy.block_terms,
            restrict_terms: policy.restrict_terms,
            max_restricted_matches: policy.max_restricted_matches,
        }
    }
}

/// `[judge]` section - contestation and grading thresholds
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileJudgeConfig {
    /// Population variance of voted scores above which the debate is contested
    pub score_variance_band: f64,
    pub green_threshold: f64,
    pub yellow_threshold: f64,
}

impl Default for FileJudgeConfig {
    fn default() -> Self {
        let contestation = ContestationPolicy::default();
        let grade = GradePolicy::default();
        Self {
            score_variance_band: contestation.score_variance_band,
            green_threshold: grade.green_threshold,
            yellow_threshold: grade.yellow_threshold,
        }
    }
}

/// `[proof]` section - proof record issuance
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileProofConfig {
    pub policy_pack_version: String,
    pub validity_hours: i64,
}

impl Default for FileProofConfig {
    fn default() -> Self {
        let policy = GovernancePolicy::default();
        Self {
            policy_pack_version: policy.policy_pack_version,
            validity_hours: policy.proof_validity_hours,
        }
    }
}

/// `[monitor]` section - throughput monitor
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileMonitorConfig {
    /// Rolling decision window size
    pub window_size: usize,
}

impl Default for FileMonitorConfig {
    fn default() -> Self {
        Self {
            window_size: DecisionWindow::DEFAULT_CAP,
        }
    }
}

/// Complete file configuration (raw TOML structure)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    pub panel: FilePanelConfig,
    pub admission: FileAdmissionConfig,
    pub judge: FileJudgeConfig,
    pub proof: FileProofConfig,
    pub monitor: FileMonitorConfig,
}

impl FileConfig {
    /// Convert the raw file values into the application policy
    pub fn to_policy(&self) -> GovernancePolicy {
        GovernancePolicy {
            admission: AdmissionPolicy {
                max_payload_bytes: self.admission.max_payload_bytes,
                block_terms: self.admission.block_terms.clone(),
                restrict_terms: self.admission.restrict_terms.clone(),
                max_restricted_matches: self.admission.max_restricted_matches,
            },
            contestation: ContestationPolicy {
                score_variance_band: self.judge.score_variance_band,
            },
            grade: GradePolicy {
                green_threshold: self.judge.green_threshold,
                yellow_threshold: self.judge.yellow_threshold,
            },
            debate: DebateParams {
                seat_timeout_ms: self.panel.seat_timeout_ms,
                deadline_ms: self.panel.deadline_ms,
            },
            policy_pack_version: self.proof.policy_pack_version.clone(),
            proof_validity_hours: self.proof.validity_hours,
        }
    }

    /// Build the configured seat roster
    pub fn roster(&self) -> SeatRoster {
        SeatRoster::synthetic(self.panel.seats.max(1))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_policy_defaults() {
        let config = FileConfig::default();
        let policy = config.to_policy();
        let reference = GovernancePolicy::default();
        assert_eq!(policy.debate.seat_timeout_ms, reference.debate.seat_timeout_ms);
        assert_eq!(policy.policy_pack_version, reference.policy_pack_version);
        assert_eq!(policy.admission.max_payload_bytes, reference.admission.max_payload_bytes);
        assert_eq!(config.roster().len(), SeatRoster::DEFAULT_SIZE);
    }

    #[test]
    fn test_deserialize_partial_toml() {
        let toml_str = r#"
[panel]
seats = 3
seat_timeout_ms = 500

[proof]
policy_pack_version = "policy-pack/custom"
"#;
        let config: FileConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.panel.seats, 3);
        assert_eq!(config.panel.seat_timeout_ms, 500);
        // Unset fields keep their defaults
        assert_eq!(config.panel.deadline_ms, DebateParams::default().deadline_ms);
        assert_eq!(config.proof.policy_pack_version, "policy-pack/custom");
        assert_eq!(config.proof.validity_hours, 24);
    }

    #[test]
    fn test_admission_terms_from_toml() {
        let toml_str = r#"
[admission]
block_terms = ["exfiltrate"]
restrict_terms = ["medical", "biometric"]
max_restricted_matches = 1
"#;
        let config: FileConfig = toml::from_str(toml_str).unwrap();
        let policy = config.to_policy();
        assert_eq!(policy.admission.block_terms, vec!["exfiltrate"]);
        assert_eq!(policy.admission.max_restricted_matches, 1);
    }

    #[test]
    fn test_zero_seats_clamped_to_one() {
        let toml_str = r#"
[panel]
seats = 0
"#;
        let config: FileConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.roster().len(), 1);
    }
}
