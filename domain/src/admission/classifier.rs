//! Risk classification and the admission decision.

use serde::{Deserialize, Serialize};

use super::sanitize::sanitize_payload;
use super::stage::PipelineStage;
use crate::core::Request;

/// Risk class assigned by the classifier before any seat is invoked
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskClass {
    /// Proceed normally
    Allow,
    /// Proceed, but flag for the judge and record the matched terms
    Restrict,
    /// Refuse before the debate; no ballots, no cost
    Block,
}

impl std::fmt::Display for RiskClass {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            RiskClass::Allow => "allow",
            RiskClass::Restrict => "restrict",
            RiskClass::Block => "block",
        };
        write!(f, "{}", s)
    }
}

/// Policy knobs for the admission classifier.
///
/// The term lists are matched case-insensitively against the raw payload.
/// Defaults are deliberately narrow; deployments are expected to load their
/// own lists from config.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdmissionPolicy {
    /// Maximum accepted payload size in bytes
    pub max_payload_bytes: usize,
    /// Terms that block a request outright
    pub block_terms: Vec<String>,
    /// Terms that mark a request restricted
    pub restrict_terms: Vec<String>,
    /// Restricted matches beyond this count escalate to human review
    pub max_restricted_matches: usize,
}

impl Default for AdmissionPolicy {
    fn default() -> Self {
        Self {
            max_payload_bytes: 64 * 1024,
            block_terms: vec![
                "credentials dump".to_string(),
                "bypass governance".to_string(),
            ],
            restrict_terms: vec![
                "medical".to_string(),
                "legal advice".to_string(),
                "financial advice".to_string(),
            ],
            max_restricted_matches: 3,
        }
    }
}

/// Terminal decision of the admission stages.
///
/// `Admitted` carries the sanitized request - downstream stages must never
/// see the original payload.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "decision", rename_all = "snake_case")]
pub enum AdmissionDecision {
    Admitted {
        request: Request,
        risk_class: RiskClass,
        /// Number of PII spans redacted during sanitization
        redactions: usize,
        /// Restricted terms that matched, if any
        restricted_matches: Vec<String>,
    },
    Refused {
        /// The stage that short-circuited
        stage: PipelineStage,
        reason_code: String,
        message: String,
    },
    HumanReviewRequired {
        /// The stage that short-circuited
        stage: PipelineStage,
        reason_code: String,
        message: String,
    },
}

impl AdmissionDecision {
    pub fn is_admitted(&self) -> bool {
        matches!(self, AdmissionDecision::Admitted { .. })
    }
}

/// The pre-debate risk gate.
///
/// Runs the first three pipeline stages in order and either admits a
/// sanitized request or short-circuits to a terminal outcome with an
/// explicit reason code.
///
/// # Example
///
/// ```
/// use gavel_domain::admission::{AdmissionClassifier, AdmissionPolicy};
/// use gavel_domain::core::{Request, RequestDomain};
///
/// let classifier = AdmissionClassifier::new(AdmissionPolicy::default());
/// let request = Request::new(RequestDomain::Qna, "Is this claim supported?");
/// assert!(classifier.admit(&request).is_admitted());
/// ```
#[derive(Debug, Clone, Default)]
pub struct AdmissionClassifier {
    policy: AdmissionPolicy,
}

impl AdmissionClassifier {
    pub fn new(policy: AdmissionPolicy) -> Self {
        Self { policy }
    }

    /// Stage 1 (intercept): structural checks on the raw request
    fn intercept(&self, request: &Request) -> Result<(), (String, String)> {
        if request.payload.trim().is_empty() {
            return Err((
                "empty_payload".to_string(),
                "request payload is empty".to_string(),
            ));
        }
        if request.payload.len() > self.policy.max_payload_bytes {
            return Err((
                "payload_too_large".to_string(),
                format!(
                    "payload is {} bytes, limit is {}",
                    request.payload.len(),
                    self.policy.max_payload_bytes
                ),
            ));
        }
        Ok(())
    }

    /// Stage 2 (classify_risk): assign ALLOW / RESTRICT / BLOCK
    fn classify(&self, request: &Request) -> (RiskClass, Vec<String>) {
        let haystack = request.payload.to_lowercase();

        for term in &self.policy.block_terms {
            if haystack.contains(&term.to_lowercase()) {
                return (RiskClass::Block, vec![term.clone()]);
            }
        }

        let restricted: Vec<String> = self
            .policy
            .restrict_terms
            .iter()
            .filter(|t| haystack.contains(&t.to_lowercase()))
            .cloned()
            .collect();

        if restricted.is_empty() {
            (RiskClass::Allow, vec![])
        } else {
            (RiskClass::Restrict, restricted)
        }
    }

    /// Run intercept, classify_risk, and sanitize in order.
    ///
    /// Sanitization runs exactly once, on admission; the returned request is
    /// the only form downstream stages may use.
    pub fn admit(&self, request: &Request) -> AdmissionDecision {
        if let Err((reason_code, message)) = self.intercept(request) {
            return AdmissionDecision::Refused {
                stage: PipelineStage::Intercept,
                reason_code,
                message,
            };
        }

        let (risk_class, matches) = self.classify(request);
        match risk_class {
            RiskClass::Block => {
                return AdmissionDecision::Refused {
                    stage: PipelineStage::ClassifyRisk,
                    reason_code: "blocked_term".to_string(),
                    message: format!("payload matched blocked term: {}", matches.join(", ")),
                };
            }
            RiskClass::Restrict if matches.len() > self.policy.max_restricted_matches => {
                return AdmissionDecision::HumanReviewRequired {
                    stage: PipelineStage::ClassifyRisk,
                    reason_code: "restricted_overload".to_string(),
                    message: format!(
                        "{} restricted terms matched (limit {})",
                        matches.len(),
                        self.policy.max_restricted_matches
                    ),
                };
            }
            _ => {}
        }

        let sanitized = sanitize_payload(&request.payload);
        AdmissionDecision::Admitted {
            request: request.with_payload(sanitized.text),
            risk_class,
            redactions: sanitized.redactions,
            restricted_matches: matches,
        }
    }
}
