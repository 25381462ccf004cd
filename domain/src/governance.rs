//! Governance result - the terminal, caller-facing record of one decision.

use serde::{Deserialize, Serialize};

use crate::debate::{Contestation, DebateOutcome, SeatOutcome};
use crate::judge::{Grade, JudgeOutput, RiskLevel, RiskVerdict, Synthesis};
use crate::seat::Stance;

/// Terminal verdict of a governance run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Verdict {
    /// Decision stands and a proof record may be issued
    Certified,
    /// A human must review before the decision is released
    HumanReviewRequired,
    /// Refused, either at admission or by the panel
    Refused,
    /// No seat produced usable evidence
    InsufficientEvidence,
}

impl Verdict {
    pub fn is_certified(&self) -> bool {
        matches!(self, Verdict::Certified)
    }

    /// Map a synthesis to its verdict.
    ///
    /// Approve certifies only when the grade is not red; a red approve is
    /// degraded to human review rather than silently certified.
    pub fn from_synthesis(synthesis: &Synthesis) -> Verdict {
        match synthesis.winning_stance {
            None | Some(Stance::Abstain) => Verdict::InsufficientEvidence,
            Some(Stance::Block) => Verdict::Refused,
            Some(Stance::Revise) => Verdict::HumanReviewRequired,
            Some(Stance::Approve) => {
                if synthesis.grade == Grade::Red {
                    Verdict::HumanReviewRequired
                } else {
                    Verdict::Certified
                }
            }
        }
    }
}

impl std::fmt::Display for Verdict {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Verdict::Certified => "CERTIFIED",
            Verdict::HumanReviewRequired => "HUMAN_REVIEW_REQUIRED",
            Verdict::Refused => "REFUSED",
            Verdict::InsufficientEvidence => "INSUFFICIENT_EVIDENCE",
        };
        write!(f, "{}", s)
    }
}

/// Complete result of one governance run. One per request; terminal.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GovernanceResult {
    /// Trace identifier for this run
    pub trace_id: String,
    /// The governed request
    pub request_id: String,
    /// Every seat's terminal status and ballot, sorted by seat id
    pub seats: Vec<SeatOutcome>,
    /// The judge's synthesized output
    pub judge: JudgeOutput,
    /// Whether the panel materially disagreed
    pub contested: bool,
    #[serde(default)]
    pub contested_reasons: Vec<String>,
    pub verdict: Verdict,
    pub grade: Grade,
}

impl GovernanceResult {
    /// Assemble a result from a completed debate and synthesis
    pub fn from_synthesis(
        trace_id: impl Into<String>,
        request_id: impl Into<String>,
        debate: DebateOutcome,
        synthesis: Synthesis,
        contestation: Contestation,
    ) -> Self {
        let verdict = Verdict::from_synthesis(&synthesis);
        Self {
            trace_id: trace_id.into(),
            request_id: request_id.into(),
            seats: debate.outcomes,
            judge: synthesis.output,
            contested: contestation.contested,
            contested_reasons: contestation.reasons,
            verdict,
            grade: synthesis.grade,
        }
    }

    /// Terminal result for a request stopped at admission. No seats ran, so
    /// there are no ballots; the judge output records the reason.
    pub fn terminal(
        trace_id: impl Into<String>,
        request_id: impl Into<String>,
        verdict: Verdict,
        reason_code: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        let reason_code = reason_code.into();
        let message = message.into();
        Self {
            trace_id: trace_id.into(),
            request_id: request_id.into(),
            seats: Vec::new(),
            judge: JudgeOutput {
                final_answer: message.clone(),
                rationale: vec![format!("admission: {}", reason_code)],
                risk_verdict: RiskVerdict {
                    level: RiskLevel::High,
                    notes: vec![reason_code],
                },
            },
            contested: false,
            contested_reasons: Vec::new(),
            verdict,
            grade: Grade::Red,
        }
    }

    /// Short reason string for decision records
    pub fn reason(&self) -> String {
        match self.verdict {
            Verdict::Certified => format!("grade {}", self.grade),
            _ => self
                .judge
                .rationale
                .first()
                .cloned()
                .unwrap_or_else(|| self.verdict.to_string()),
        }
    }
}
