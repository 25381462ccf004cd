//! Seat gateway port
//!
//! Defines the interface for invoking panel seats. The debate orchestrator
//! never distinguishes synthetic seats from provider-backed ones; both sit
//! behind this port.

use async_trait::async_trait;
use gavel_domain::{Ballot, Request, SeatDescriptor};
use thiserror::Error;

/// Errors a single seat invocation can produce.
///
/// These never propagate past the debate orchestrator - each maps to a seat
/// status on the outcome.
#[derive(Error, Debug)]
pub enum SeatError {
    #[error("Seat is offline")]
    Offline,

    #[error("Provider rejected the call: {0}")]
    Provider(String),

    #[error("Malformed ballot: {0}")]
    MalformedBallot(String),

    #[error("Other error: {0}")]
    Other(String),
}

/// Gateway for invoking seats.
///
/// Seat calls are assumed to be idempotent reads against external
/// providers; the orchestrator may invoke each seat at most once per
/// request.
#[async_trait]
pub trait SeatGateway: Send + Sync {
    /// Whether the seat is known to be reachable. Seats reporting offline
    /// are skipped proactively and never invoked.
    async fn is_online(&self, seat: &SeatDescriptor) -> bool;

    /// Ask one seat to evaluate the request and cast a ballot
    async fn cast_ballot(
        &self,
        seat: &SeatDescriptor,
        request: &Request,
    ) -> Result<Ballot, SeatError>;
}
