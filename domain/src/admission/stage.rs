//! Pipeline stage vocabulary.

use serde::{Deserialize, Serialize};

/// One stage of the governance pipeline.
///
/// Stages run strictly in the order given by [`PipelineStage::all`]; each
/// stage either passes the request forward or short-circuits to a terminal
/// outcome. `Log` and `Release` are side-effecting terminal stages only
/// reached after `Judge` and `Verify` succeed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PipelineStage {
    Intercept,
    ClassifyRisk,
    Sanitize,
    Debate,
    Judge,
    Verify,
    Log,
    Release,
}

impl PipelineStage {
    /// All stages in execution order
    pub fn all() -> [PipelineStage; 8] {
        [
            PipelineStage::Intercept,
            PipelineStage::ClassifyRisk,
            PipelineStage::Sanitize,
            PipelineStage::Debate,
            PipelineStage::Judge,
            PipelineStage::Verify,
            PipelineStage::Log,
            PipelineStage::Release,
        ]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            PipelineStage::Intercept => "intercept",
            PipelineStage::ClassifyRisk => "classify_risk",
            PipelineStage::Sanitize => "sanitize",
            PipelineStage::Debate => "debate",
            PipelineStage::Judge => "judge",
            PipelineStage::Verify => "verify",
            PipelineStage::Log => "log",
            PipelineStage::Release => "release",
        }
    }

    /// Zero-based position in the pipeline
    pub fn index(&self) -> usize {
        Self::all().iter().position(|s| s == self).unwrap_or(0)
    }
}

impl std::fmt::Display for PipelineStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
