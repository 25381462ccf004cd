//! The judge step: synthesize one output from all ballots.
//!
//! Deterministic over the ballot set. Majority stance wins; an exact tie
//! falls to the more conservative stance (`block > revise > approve`). When
//! no seat voted, the judge emits an insufficient-evidence output instead of
//! inventing an answer.

use serde::{Deserialize, Serialize};

use super::grade::{Grade, GradePolicy};
use crate::debate::{Contestation, DebateOutcome};
use crate::seat::{Ballot, RiskSeverity, Stance};

/// Risk level of the final verdict
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskLevel {
    Low,
    Medium,
    High,
}

impl From<RiskSeverity> for RiskLevel {
    fn from(severity: RiskSeverity) -> Self {
        match severity {
            RiskSeverity::Low => RiskLevel::Low,
            RiskSeverity::Medium => RiskLevel::Medium,
            RiskSeverity::High => RiskLevel::High,
        }
    }
}

impl std::fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            RiskLevel::Low => "low",
            RiskLevel::Medium => "medium",
            RiskLevel::High => "high",
        };
        write!(f, "{}", s)
    }
}

/// Risk portion of the judge output
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskVerdict {
    pub level: RiskLevel,
    #[serde(default)]
    pub notes: Vec<String>,
}

/// The judge's synthesized output - immutable once produced
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JudgeOutput {
    pub final_answer: String,
    pub rationale: Vec<String>,
    pub risk_verdict: RiskVerdict,
}

/// Full synthesis result: the external judge output plus the internal facts
/// the verdict mapping needs.
#[derive(Debug, Clone, PartialEq)]
pub struct Synthesis {
    pub output: JudgeOutput,
    /// Winning stance; `None` means insufficient evidence
    pub winning_stance: Option<Stance>,
    pub grade: Grade,
}

impl Synthesis {
    pub fn is_insufficient_evidence(&self) -> bool {
        self.winning_stance.is_none()
    }
}

/// Consumes ballots and the contestation flag, produces exactly one
/// [`Synthesis`].
#[derive(Debug, Clone, Default)]
pub struct JudgeSynthesizer {
    grade_policy: GradePolicy,
}

impl JudgeSynthesizer {
    pub fn new(grade_policy: GradePolicy) -> Self {
        Self { grade_policy }
    }

    pub fn synthesize(&self, debate: &DebateOutcome, contestation: &Contestation) -> Synthesis {
        let voted = debate.voted_ballots();

        if voted.is_empty() {
            return self.insufficient_evidence(debate);
        }

        let winning = winning_stance(&voted);
        let mean_score =
            voted.iter().map(|b| b.score as f64).sum::<f64>() / voted.len() as f64;
        let grade = self.grade_policy.grade(mean_score, contestation.contested);

        let mut rationale = vec![stance_tally_line(&voted)];
        rationale.push(format!("mean score {:.1} across {} ballot(s)", mean_score, voted.len()));
        if contestation.contested {
            for reason in &contestation.reasons {
                rationale.push(format!("contested: {}", reason));
            }
            // Contested results must restate the minority, not discard it
            rationale.extend(minority_positions(&voted, winning));
        }

        let risk_verdict = risk_verdict(debate.all_ballots().as_slice());

        Synthesis {
            output: JudgeOutput {
                final_answer: final_answer(winning, &voted),
                rationale,
                risk_verdict,
            },
            winning_stance: Some(winning),
            grade,
        }
    }

    /// Safe terminal output when every seat abstained, timed out, went
    /// offline, or errored.
    fn insufficient_evidence(&self, debate: &DebateOutcome) -> Synthesis {
        let total = debate.outcomes.len();
        Synthesis {
            output: JudgeOutput {
                final_answer: "Insufficient evidence: no seat returned a usable ballot."
                    .to_string(),
                rationale: vec![format!(
                    "all {} seat(s) settled without voting",
                    total
                )],
                risk_verdict: RiskVerdict {
                    level: RiskLevel::High,
                    notes: vec!["no ballots available to assess risk".to_string()],
                },
            },
            winning_stance: None,
            grade: Grade::Red,
        }
    }
}

/// Majority stance over voted ballots; exact ties fall to the more
/// conservative stance.
fn winning_stance(voted: &[&Ballot]) -> Stance {
    let mut counts: Vec<(Stance, usize)> = [Stance::Block, Stance::Revise, Stance::Approve]
        .iter()
        .map(|&s| (s, voted.iter().filter(|b| b.stance == s).count()))
        .collect();

    // Stable: sorted by count descending, then by conservatism descending.
    // The candidate list above is already in conservative order, and sort is
    // stable, so the first entry after sorting is the winner.
    counts.sort_by(|a, b| b.1.cmp(&a.1));
    counts[0].0
}

fn stance_tally_line(voted: &[&Ballot]) -> String {
    let count = |s: Stance| voted.iter().filter(|b| b.stance == s).count();
    format!(
        "{} approve / {} revise / {} block",
        count(Stance::Approve),
        count(Stance::Revise),
        count(Stance::Block)
    )
}

/// Restate each losing stance with its seats' counterpoints
fn minority_positions(voted: &[&Ballot], winning: Stance) -> Vec<String> {
    let mut lines = Vec::new();
    for stance in [Stance::Block, Stance::Revise, Stance::Approve] {
        if stance == winning {
            continue;
        }
        let holders: Vec<&&Ballot> = voted.iter().filter(|b| b.stance == stance).collect();
        if holders.is_empty() {
            continue;
        }
        let seats: Vec<&str> = holders.iter().map(|b| b.seat_id.as_str()).collect();
        let points: Vec<&str> = holders
            .iter()
            .flat_map(|b| b.counterpoints.iter().map(|p| p.as_str()))
            .collect();
        if points.is_empty() {
            lines.push(format!(
                "minority position ({}): held by {}",
                stance,
                seats.join(", ")
            ));
        } else {
            lines.push(format!(
                "minority position ({}): {} - {}",
                stance,
                seats.join(", "),
                points.join("; ")
            ));
        }
    }
    lines
}

/// Highest risk severity present across all ballots, never an average
fn risk_verdict(ballots: &[&Ballot]) -> RiskVerdict {
    let level = ballots
        .iter()
        .filter_map(|b| b.max_risk_severity())
        .max()
        .map(RiskLevel::from)
        .unwrap_or(RiskLevel::Low);

    let mut notes: Vec<String> = ballots
        .iter()
        .flat_map(|b| b.risk_flags.iter())
        .map(|f| f.label.clone())
        .collect();
    notes.sort();
    notes.dedup();

    RiskVerdict { level, notes }
}

/// Deterministic final answer assembled from the winning stance and the
/// supporting key points of its holders.
fn final_answer(winning: Stance, voted: &[&Ballot]) -> String {
    let holders = voted.iter().filter(|b| b.stance == winning).count();
    let mut points: Vec<&str> = voted
        .iter()
        .filter(|b| b.stance == winning)
        .flat_map(|b| b.key_points.iter().map(|p| p.as_str()))
        .collect();
    points.sort();
    points.dedup();

    let verdict_phrase = match winning {
        Stance::Approve => "Panel approves the request",
        Stance::Revise => "Panel requires revision before release",
        Stance::Block => "Panel blocks the request",
        Stance::Abstain => "Panel abstains",
    };

    if points.is_empty() {
        format!("{} ({} of {} voted seats).", verdict_phrase, holders, voted.len())
    } else {
        format!(
            "{} ({} of {} voted seats). Key points: {}",
            verdict_phrase,
            holders,
            voted.len(),
            points.join("; ")
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::debate::{detect_contestation, ContestationPolicy, SeatOutcome};
    use crate::seat::{Provider, RiskFlag, SeatDescriptor, SeatStatus};

    fn seat(id: &str) -> SeatDescriptor {
        SeatDescriptor::new(id, Provider::Synthetic, "synthetic-evaluator-v1")
    }

    fn debate(ballots: Vec<Ballot>) -> DebateOutcome {
        DebateOutcome::new(
            ballots
                .into_iter()
                .map(|b| {
                    let descriptor = seat(&b.seat_id);
                    SeatOutcome::voted(descriptor, b)
                })
                .collect(),
        )
    }

    fn synthesize(debate_outcome: &DebateOutcome) -> Synthesis {
        let ballots = debate_outcome.voted_ballots();
        let contestation = detect_contestation(&ballots, &ContestationPolicy::default());
        JudgeSynthesizer::default().synthesize(debate_outcome, &contestation)
    }

    #[test]
    fn test_clear_majority_wins() {
        // 5 approve / 2 block: majority wins despite the conservative order
        let outcome = debate(vec![
            Ballot::new("seat-1", Stance::Approve, 85),
            Ballot::new("seat-2", Stance::Approve, 82),
            Ballot::new("seat-3", Stance::Approve, 88),
            Ballot::new("seat-4", Stance::Approve, 90),
            Ballot::new("seat-5", Stance::Approve, 84),
            Ballot::new("seat-6", Stance::Block, 30),
            Ballot::new("seat-7", Stance::Block, 25),
        ]);
        let synthesis = synthesize(&outcome);
        assert_eq!(synthesis.winning_stance, Some(Stance::Approve));
    }

    #[test]
    fn test_exact_tie_falls_conservative() {
        // 3 approve / 3 block / 1 abstain: tie broken toward block
        let outcome = debate(vec![
            Ballot::new("seat-1", Stance::Approve, 80),
            Ballot::new("seat-2", Stance::Approve, 85),
            Ballot::new("seat-3", Stance::Approve, 82),
            Ballot::new("seat-4", Stance::Block, 20),
            Ballot::new("seat-5", Stance::Block, 25),
            Ballot::new("seat-6", Stance::Block, 15),
            Ballot::abstain("seat-7"),
        ]);
        let synthesis = synthesize(&outcome);
        assert_eq!(synthesis.winning_stance, Some(Stance::Block));
    }

    #[test]
    fn test_revise_block_tie_falls_to_block() {
        let outcome = debate(vec![
            Ballot::new("seat-1", Stance::Revise, 55),
            Ballot::new("seat-2", Stance::Block, 30),
        ]);
        let synthesis = synthesize(&outcome);
        assert_eq!(synthesis.winning_stance, Some(Stance::Block));
    }

    #[test]
    fn test_insufficient_evidence() {
        let outcome = DebateOutcome::new(vec![
            SeatOutcome::settled(seat("seat-1"), SeatStatus::TimedOut),
            SeatOutcome::settled(seat("seat-2"), SeatStatus::Offline),
            SeatOutcome::voted(seat("seat-3"), Ballot::abstain("seat-3")),
        ]);
        let synthesis = synthesize(&outcome);
        assert!(synthesis.is_insufficient_evidence());
        assert_eq!(synthesis.grade, Grade::Red);
        // Risk is never low without evidence
        assert_ne!(synthesis.output.risk_verdict.level, RiskLevel::Low);
        assert!(synthesis.output.final_answer.contains("Insufficient evidence"));
    }

    #[test]
    fn test_risk_is_max_not_average() {
        let outcome = debate(vec![
            Ballot::new("seat-1", Stance::Approve, 85)
                .with_risk_flag(RiskFlag::low("minor phrasing")),
            Ballot::new("seat-2", Stance::Approve, 88)
                .with_risk_flag(RiskFlag::high("unverified claim")),
            Ballot::new("seat-3", Stance::Approve, 90),
        ]);
        let synthesis = synthesize(&outcome);
        assert_eq!(synthesis.output.risk_verdict.level, RiskLevel::High);
        assert!(synthesis
            .output
            .risk_verdict
            .notes
            .contains(&"unverified claim".to_string()));
    }

    #[test]
    fn test_contested_restates_minority() {
        let outcome = debate(vec![
            Ballot::new("seat-1", Stance::Approve, 85),
            Ballot::new("seat-2", Stance::Approve, 88),
            Ballot::new("seat-3", Stance::Block, 20)
                .with_counterpoint("source is unreliable"),
        ]);
        let synthesis = synthesize(&outcome);
        assert_eq!(synthesis.winning_stance, Some(Stance::Approve));
        let rationale = synthesis.output.rationale.join("\n");
        assert!(rationale.contains("minority position (block)"));
        assert!(rationale.contains("source is unreliable"));
    }

    #[test]
    fn test_deterministic_output() {
        let ballots = vec![
            Ballot::new("seat-1", Stance::Approve, 85).with_key_point("well sourced"),
            Ballot::new("seat-2", Stance::Block, 20),
            Ballot::new("seat-3", Stance::Approve, 80).with_key_point("clear reasoning"),
        ];
        let a = synthesize(&debate(ballots.clone()));
        let mut reversed = ballots;
        reversed.reverse();
        let b = synthesize(&debate(reversed));
        assert_eq!(a, b);
    }

    #[test]
    fn test_uncontested_majority_grade_green() {
        let outcome = debate(vec![
            Ballot::new("seat-1", Stance::Approve, 85),
            Ballot::new("seat-2", Stance::Approve, 88),
            Ballot::new("seat-3", Stance::Approve, 90),
        ]);
        let synthesis = synthesize(&outcome);
        assert_eq!(synthesis.grade, Grade::Green);
    }
}
