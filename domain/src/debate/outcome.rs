//! Immutable results of the debate fan-out.

use serde::{Deserialize, Serialize};

use crate::seat::{Ballot, SeatDescriptor, SeatStatus};

/// How a single seat settled for one request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SeatOutcome {
    /// The seat this outcome belongs to
    pub seat: SeatDescriptor,
    /// Terminal status
    pub status: SeatStatus,
    /// Ballot, present when the status carries one
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ballot: Option<Ballot>,
}

impl SeatOutcome {
    /// A seat that voted
    pub fn voted(seat: SeatDescriptor, ballot: Ballot) -> Self {
        let status = if ballot.stance.is_abstain() {
            SeatStatus::Abstained
        } else {
            SeatStatus::Voted
        };
        Self {
            seat,
            status,
            ballot: Some(ballot),
        }
    }

    /// A seat that settled without a ballot
    pub fn settled(seat: SeatDescriptor, status: SeatStatus) -> Self {
        debug_assert!(!status.has_ballot());
        Self {
            seat,
            status,
            ballot: None,
        }
    }
}

/// Complete result of one debate: every seat's terminal status plus any
/// collected ballots.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DebateOutcome {
    pub outcomes: Vec<SeatOutcome>,
}

impl DebateOutcome {
    pub fn new(mut outcomes: Vec<SeatOutcome>) -> Self {
        // Normalize ordering so arrival order never leaks downstream
        outcomes.sort_by(|a, b| a.seat.seat_id.cmp(&b.seat.seat_id));
        Self { outcomes }
    }

    /// Ballots from seats that took a stance (excludes abstentions)
    pub fn voted_ballots(&self) -> Vec<&Ballot> {
        self.outcomes
            .iter()
            .filter(|o| o.status == SeatStatus::Voted)
            .filter_map(|o| o.ballot.as_ref())
            .collect()
    }

    /// All ballots, including abstentions
    pub fn all_ballots(&self) -> Vec<&Ballot> {
        self.outcomes.iter().filter_map(|o| o.ballot.as_ref()).collect()
    }

    /// Count of seats in a given status
    pub fn count(&self, status: SeatStatus) -> usize {
        self.outcomes.iter().filter(|o| o.status == status).count()
    }

    /// True when no seat contributed a usable stance
    pub fn is_evidence_free(&self) -> bool {
        self.voted_ballots().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::seat::{Provider, Stance};

    fn seat(id: &str) -> SeatDescriptor {
        SeatDescriptor::new(id, Provider::Synthetic, "synthetic-evaluator-v1")
    }

    #[test]
    fn test_outcomes_sorted_by_seat_id() {
        let outcome = DebateOutcome::new(vec![
            SeatOutcome::settled(seat("seat-3"), SeatStatus::TimedOut),
            SeatOutcome::voted(seat("seat-1"), Ballot::new("seat-1", Stance::Approve, 80)),
            SeatOutcome::settled(seat("seat-2"), SeatStatus::Offline),
        ]);
        let ids: Vec<_> = outcome.outcomes.iter().map(|o| o.seat.seat_id.as_str()).collect();
        assert_eq!(ids, vec!["seat-1", "seat-2", "seat-3"]);
    }

    #[test]
    fn test_abstain_ballot_gets_abstained_status() {
        let outcome = SeatOutcome::voted(seat("seat-1"), Ballot::abstain("seat-1"));
        assert_eq!(outcome.status, SeatStatus::Abstained);
    }

    #[test]
    fn test_voted_ballots_excludes_abstentions() {
        let outcome = DebateOutcome::new(vec![
            SeatOutcome::voted(seat("seat-1"), Ballot::new("seat-1", Stance::Approve, 80)),
            SeatOutcome::voted(seat("seat-2"), Ballot::abstain("seat-2")),
            SeatOutcome::settled(seat("seat-3"), SeatStatus::Errored),
        ]);
        assert_eq!(outcome.voted_ballots().len(), 1);
        assert_eq!(outcome.all_ballots().len(), 2);
        assert_eq!(outcome.count(SeatStatus::Errored), 1);
        assert!(!outcome.is_evidence_free());
    }

    #[test]
    fn test_evidence_free_debate() {
        let outcome = DebateOutcome::new(vec![
            SeatOutcome::settled(seat("seat-1"), SeatStatus::TimedOut),
            SeatOutcome::voted(seat("seat-2"), Ballot::abstain("seat-2")),
        ]);
        assert!(outcome.is_evidence_free());
    }
}
