//! Contestation detector - flags material disagreement between seats.
//!
//! Pure function over the ballot set. Ballots are sorted by seat id before
//! analysis, so identical sets always yield identical output regardless of
//! arrival order.

use serde::{Deserialize, Serialize};

use crate::seat::{Ballot, Stance};

/// Thresholds for the contestation detector
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContestationPolicy {
    /// Population variance of voted scores above which the set is contested
    pub score_variance_band: f64,
}

impl Default for ContestationPolicy {
    fn default() -> Self {
        Self {
            score_variance_band: 400.0,
        }
    }
}

/// Result of contestation analysis
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Contestation {
    pub contested: bool,
    pub reasons: Vec<String>,
}

impl Contestation {
    fn uncontested() -> Self {
        Self {
            contested: false,
            reasons: Vec::new(),
        }
    }
}

/// Analyze a ballot set for disagreement beyond policy thresholds.
///
/// Two triggers, either is sufficient:
/// - at least one `block` stance coexists with at least one `approve`
/// - score variance across voted (non-abstaining) seats exceeds the band
pub fn detect_contestation(ballots: &[&Ballot], policy: &ContestationPolicy) -> Contestation {
    let mut sorted: Vec<&Ballot> = ballots.to_vec();
    sorted.sort_by(|a, b| a.seat_id.cmp(&b.seat_id));

    let voted: Vec<&Ballot> = sorted
        .iter()
        .copied()
        .filter(|b| !b.stance.is_abstain())
        .collect();

    if voted.is_empty() {
        return Contestation::uncontested();
    }

    let mut reasons = Vec::new();

    let blocks = voted.iter().filter(|b| b.stance == Stance::Block).count();
    let approves = voted.iter().filter(|b| b.stance == Stance::Approve).count();
    if blocks > 0 && approves > 0 {
        reasons.push(format!(
            "{} seat(s) blocked while {} approved",
            blocks, approves
        ));
    }

    let variance = score_variance(&voted);
    if variance > policy.score_variance_band {
        reasons.push(format!(
            "score variance {:.1} exceeds band {:.1}",
            variance, policy.score_variance_band
        ));
    }

    Contestation {
        contested: !reasons.is_empty(),
        reasons,
    }
}

/// Population variance of ballot scores
fn score_variance(ballots: &[&Ballot]) -> f64 {
    if ballots.len() < 2 {
        return 0.0;
    }
    let n = ballots.len() as f64;
    let mean = ballots.iter().map(|b| b.score as f64).sum::<f64>() / n;
    ballots
        .iter()
        .map(|b| {
            let d = b.score as f64 - mean;
            d * d
        })
        .sum::<f64>()
        / n
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ballot(seat: &str, stance: Stance, score: u8) -> Ballot {
        Ballot::new(seat, stance, score)
    }

    #[test]
    fn test_block_vs_approve_contested() {
        let a = ballot("seat-1", Stance::Block, 30);
        let b = ballot("seat-2", Stance::Approve, 35);
        let result = detect_contestation(&[&a, &b], &ContestationPolicy::default());
        assert!(result.contested);
        assert!(!result.reasons.is_empty());
        assert!(result.reasons[0].contains("blocked"));
    }

    #[test]
    fn test_unanimous_approve_not_contested() {
        let a = ballot("seat-1", Stance::Approve, 85);
        let b = ballot("seat-2", Stance::Approve, 88);
        let c = ballot("seat-3", Stance::Approve, 82);
        let result = detect_contestation(&[&a, &b, &c], &ContestationPolicy::default());
        assert!(!result.contested);
        assert!(result.reasons.is_empty());
    }

    #[test]
    fn test_score_variance_trips_band() {
        // Scores 10 and 95: variance well above 400
        let a = ballot("seat-1", Stance::Revise, 10);
        let b = ballot("seat-2", Stance::Revise, 95);
        let result = detect_contestation(&[&a, &b], &ContestationPolicy::default());
        assert!(result.contested);
        assert!(result.reasons[0].contains("variance"));
    }

    #[test]
    fn test_order_independent() {
        let a = ballot("seat-1", Stance::Block, 20);
        let b = ballot("seat-2", Stance::Approve, 90);
        let c = ballot("seat-3", Stance::Approve, 85);
        let policy = ContestationPolicy::default();

        let forward = detect_contestation(&[&a, &b, &c], &policy);
        let reversed = detect_contestation(&[&c, &b, &a], &policy);
        assert_eq!(forward, reversed);
    }

    #[test]
    fn test_abstentions_ignored() {
        let a = ballot("seat-1", Stance::Approve, 80);
        let b = Ballot::abstain("seat-2");
        let result = detect_contestation(&[&a, &b], &ContestationPolicy::default());
        assert!(!result.contested);
    }

    #[test]
    fn test_empty_set_uncontested() {
        let result = detect_contestation(&[], &ContestationPolicy::default());
        assert!(!result.contested);
    }

    #[test]
    fn test_wider_band_tolerates_spread() {
        let a = ballot("seat-1", Stance::Revise, 10);
        let b = ballot("seat-2", Stance::Revise, 95);
        let policy = ContestationPolicy {
            score_variance_band: 5000.0,
        };
        assert!(!detect_contestation(&[&a, &b], &policy).contested);
    }
}
