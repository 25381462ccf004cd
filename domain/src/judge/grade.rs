//! Decision grading - the green/yellow/red roll-up of ballot scores.

use serde::{Deserialize, Serialize};

/// Traffic-light grade attached to a governance result
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Grade {
    Green,
    Yellow,
    Red,
}

impl Grade {
    /// One-step conservative downgrade, applied when a decision is contested
    pub fn downgraded(&self) -> Grade {
        match self {
            Grade::Green => Grade::Yellow,
            Grade::Yellow | Grade::Red => Grade::Red,
        }
    }
}

impl std::fmt::Display for Grade {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Grade::Green => "green",
            Grade::Yellow => "yellow",
            Grade::Red => "red",
        };
        write!(f, "{}", s)
    }
}

/// Score thresholds for grading.
///
/// The observed defaults (80 pass, 60 review) are defaults only; deployments
/// tune them through config.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct GradePolicy {
    /// Mean score at or above this grades Green
    pub green_threshold: f64,
    /// Mean score at or above this (but below green) grades Yellow
    pub yellow_threshold: f64,
}

impl Default for GradePolicy {
    fn default() -> Self {
        Self {
            green_threshold: 80.0,
            yellow_threshold: 60.0,
        }
    }
}

impl GradePolicy {
    /// Grade a mean ballot score, then apply the contested downgrade
    pub fn grade(&self, mean_score: f64, contested: bool) -> Grade {
        let base = if mean_score >= self.green_threshold {
            Grade::Green
        } else if mean_score >= self.yellow_threshold {
            Grade::Yellow
        } else {
            Grade::Red
        };
        if contested { base.downgraded() } else { base }
    }
}
