//! Synthetic seat gateway.
//!
//! Deterministic in-process seats for demos and load tests. Each (seat,
//! request) pair seeds its own RNG, so the same request always draws the
//! same ballots while different requests vary.

use std::collections::HashSet;
use std::time::Duration;

use async_trait::async_trait;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use sha2::{Digest, Sha256};
use tracing::trace;

use gavel_application::{SeatError, SeatGateway};
use gavel_domain::{Ballot, Request, RiskFlag, SeatDescriptor, Stance};

/// Behavior knobs for the synthetic panel
#[derive(Debug, Clone)]
pub struct SyntheticSeatConfig {
    /// Simulated evaluation latency per ballot
    pub base_latency_ms: u64,
    /// Extra random latency on top of the base, per ballot
    pub jitter_ms: u64,
    /// Seats reported offline before the debate starts
    pub offline_seats: HashSet<String>,
    /// Seats whose invocation fails
    pub failing_seats: HashSet<String>,
    /// Seats that never answer within a reasonable deadline
    pub stalled_seats: HashSet<String>,
}

impl Default for SyntheticSeatConfig {
    fn default() -> Self {
        Self {
            base_latency_ms: 30,
            jitter_ms: 40,
            offline_seats: HashSet::new(),
            failing_seats: HashSet::new(),
            stalled_seats: HashSet::new(),
        }
    }
}

impl SyntheticSeatConfig {
    /// Config with no simulated latency, for tests
    pub fn instant() -> Self {
        Self {
            base_latency_ms: 0,
            jitter_ms: 0,
            ..Default::default()
        }
    }

    pub fn with_offline_seat(mut self, seat_id: impl Into<String>) -> Self {
        self.offline_seats.insert(seat_id.into());
        self
    }

    pub fn with_failing_seat(mut self, seat_id: impl Into<String>) -> Self {
        self.failing_seats.insert(seat_id.into());
        self
    }

    pub fn with_stalled_seat(mut self, seat_id: impl Into<String>) -> Self {
        self.stalled_seats.insert(seat_id.into());
        self
    }
}

/// In-process seat panel that fabricates plausible ballots
#[derive(Debug, Clone, Default)]
pub struct SyntheticSeatGateway {
    config: SyntheticSeatConfig,
}

impl SyntheticSeatGateway {
    pub fn new(config: SyntheticSeatConfig) -> Self {
        Self { config }
    }

    /// Seed derived from the (seat, request) pair
    fn rng_for(seat: &SeatDescriptor, request: &Request) -> StdRng {
        let mut hasher = Sha256::new();
        hasher.update(seat.seat_id.as_bytes());
        hasher.update(b"\n");
        hasher.update(request.request_id.as_bytes());
        hasher.update(b"\n");
        hasher.update(request.payload.as_bytes());
        StdRng::from_seed(hasher.finalize().into())
    }

    fn draw_ballot(seat: &SeatDescriptor, request: &Request) -> Ballot {
        let mut rng = Self::rng_for(seat, request);

        if rng.gen_bool(0.04) {
            return Ballot::abstain(&seat.seat_id);
        }

        let score: u8 = rng.gen_range(40..=98);
        let stance = match score {
            70.. => Stance::Approve,
            55..=69 => Stance::Revise,
            _ => Stance::Block,
        };
        let confidence = rng.gen_range(0.55..0.98);

        let mut ballot = Ballot::new(&seat.seat_id, stance, score).with_confidence(confidence);
        match stance {
            Stance::Approve => {
                ballot = ballot.with_key_point("claim is consistent with available context");
            }
            Stance::Revise => {
                ballot = ballot
                    .with_counterpoint("answer needs tighter sourcing")
                    .with_risk_flag(RiskFlag::low("imprecise phrasing"));
            }
            Stance::Block => {
                ballot = ballot
                    .with_counterpoint("claim cannot be substantiated")
                    .with_risk_flag(RiskFlag::medium("unsupported claim"));
            }
            Stance::Abstain => {}
        }
        ballot
    }
}

#[async_trait]
impl SeatGateway for SyntheticSeatGateway {
    async fn is_online(&self, seat: &SeatDescriptor) -> bool {
        !self.config.offline_seats.contains(&seat.seat_id)
    }

    async fn cast_ballot(
        &self,
        seat: &SeatDescriptor,
        request: &Request,
    ) -> Result<Ballot, SeatError> {
        if self.config.stalled_seats.contains(&seat.seat_id) {
            // Outlive any sane deadline; the orchestrator times this out
            tokio::time::sleep(Duration::from_secs(600)).await;
        }
        if self.config.failing_seats.contains(&seat.seat_id) {
            return Err(SeatError::Provider("synthetic seat failure".to_string()));
        }

        if self.config.base_latency_ms > 0 || self.config.jitter_ms > 0 {
            let jitter = if self.config.jitter_ms > 0 {
                Self::rng_for(seat, request).gen_range(0..self.config.jitter_ms)
            } else {
                0
            };
            tokio::time::sleep(Duration::from_millis(self.config.base_latency_ms + jitter)).await;
        }

        let ballot = Self::draw_ballot(seat, request);
        trace!(seat_id = %seat.seat_id, stance = %ballot.stance, score = ballot.score, "synthetic ballot");
        Ok(ballot)
    }
}
