//! Ballot types - a seat's structured vote on a request.

use serde::{Deserialize, Serialize};

use super::descriptor::SeatId;

/// Stance taken by a seat.
///
/// The variants carry a total conservative ordering used for tie-breaks:
/// `Block > Revise > Approve`. `Abstain` never participates in a tie-break.
///
/// # Example
///
/// ```
/// use gavel_domain::seat::Stance;
///
/// assert!(Stance::Block.conservatism() > Stance::Revise.conservatism());
/// assert!(Stance::Revise.conservatism() > Stance::Approve.conservatism());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Stance {
    Approve,
    Revise,
    Block,
    Abstain,
}

impl Stance {
    /// Conservatism rank for tie-breaking. Higher is more conservative.
    pub fn conservatism(&self) -> u8 {
        match self {
            Stance::Abstain => 0,
            Stance::Approve => 1,
            Stance::Revise => 2,
            Stance::Block => 3,
        }
    }

    pub fn is_abstain(&self) -> bool {
        matches!(self, Stance::Abstain)
    }
}

impl std::fmt::Display for Stance {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Stance::Approve => "approve",
            Stance::Revise => "revise",
            Stance::Block => "block",
            Stance::Abstain => "abstain",
        };
        write!(f, "{}", s)
    }
}

/// Severity attached to a risk flag
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskSeverity {
    Low,
    Medium,
    High,
}

/// A risk raised by a seat against the request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RiskFlag {
    pub severity: RiskSeverity,
    pub label: String,
}

impl RiskFlag {
    pub fn new(severity: RiskSeverity, label: impl Into<String>) -> Self {
        Self {
            severity,
            label: label.into(),
        }
    }

    pub fn low(label: impl Into<String>) -> Self {
        Self::new(RiskSeverity::Low, label)
    }

    pub fn medium(label: impl Into<String>) -> Self {
        Self::new(RiskSeverity::Medium, label)
    }

    pub fn high(label: impl Into<String>) -> Self {
        Self::new(RiskSeverity::High, label)
    }
}

/// A single seat's vote on a request.
///
/// Produced exactly once per responding seat per request, and owned by the
/// debate phase for the lifetime of that request.
///
/// # Example
///
/// ```
/// use gavel_domain::seat::{Ballot, Stance};
///
/// let ballot = Ballot::new("seat-1", Stance::Approve, 88)
///     .with_confidence(0.9)
///     .with_key_point("Claim is consistent with the cited source");
/// assert_eq!(ballot.stance, Stance::Approve);
/// assert_eq!(ballot.score, 88);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ballot {
    /// Seat that cast this ballot
    pub seat_id: SeatId,
    /// Stance taken
    pub stance: Stance,
    /// Quality score (0-100)
    pub score: u8,
    /// Confidence level (0.0 to 1.0)
    pub confidence: f64,
    /// Risks this seat raised
    #[serde(default)]
    pub risk_flags: Vec<RiskFlag>,
    /// Points supporting the answer
    #[serde(default)]
    pub key_points: Vec<String>,
    /// Points against the answer
    #[serde(default)]
    pub counterpoints: Vec<String>,
}

impl Ballot {
    /// Create a new ballot; score is clamped to 0-100
    pub fn new(seat_id: impl Into<String>, stance: Stance, score: u8) -> Self {
        Self {
            seat_id: seat_id.into(),
            stance,
            score: score.min(100),
            confidence: 0.5,
            risk_flags: Vec::new(),
            key_points: Vec::new(),
            counterpoints: Vec::new(),
        }
    }

    /// Create an abstaining ballot (no score contribution)
    pub fn abstain(seat_id: impl Into<String>) -> Self {
        Self {
            seat_id: seat_id.into(),
            stance: Stance::Abstain,
            score: 0,
            confidence: 0.0,
            risk_flags: Vec::new(),
            key_points: Vec::new(),
            counterpoints: Vec::new(),
        }
    }

    /// Set confidence, clamped to 0.0-1.0
    pub fn with_confidence(mut self, confidence: f64) -> Self {
        self.confidence = confidence.clamp(0.0, 1.0);
        self
    }

    pub fn with_risk_flag(mut self, flag: RiskFlag) -> Self {
        self.risk_flags.push(flag);
        self
    }

    pub fn with_key_point(mut self, point: impl Into<String>) -> Self {
        self.key_points.push(point.into());
        self
    }

    pub fn with_counterpoint(mut self, point: impl Into<String>) -> Self {
        self.counterpoints.push(point.into());
        self
    }

    /// Highest risk severity this ballot raised, if any
    pub fn max_risk_severity(&self) -> Option<RiskSeverity> {
        self.risk_flags.iter().map(|f| f.severity).max()
    }
}
