//! Judge synthesizer - one final answer from divergent ballots.

pub mod grade;
pub mod synthesizer;

pub use grade::{Grade, GradePolicy};
pub use synthesizer::{JudgeOutput, JudgeSynthesizer, RiskLevel, RiskVerdict, Synthesis};
