//! Domain layer for gavel
//!
//! This crate contains the core business logic, entities, and value objects
//! of the governance consensus and proof engine. It has no dependencies on
//! infrastructure or presentation concerns.
//!
//! # Core Concepts
//!
//! ## Panel debate
//!
//! Each admitted request is debated by a panel of independent model seats.
//! Every seat settles into exactly one status; seats that voted contribute a
//! [`seat::Ballot`]. The [`judge::JudgeSynthesizer`] folds the ballot set
//! into one output, with an exact tie falling to the more conservative
//! stance.
//!
//! ## Proof records
//!
//! Certified verdicts are bound into a [`proof::ProofRecord`]: a signed,
//! hash-bound, time-boxed attestation that can be independently re-checked.

pub mod admission;
pub mod core;
pub mod debate;
pub mod governance;
pub mod judge;
pub mod metrics;
pub mod proof;
pub mod seat;

// Re-export commonly used types
pub use admission::{
    AdmissionClassifier, AdmissionDecision, AdmissionPolicy, PipelineStage, RiskClass,
};
pub use core::{current_timestamp_ms, uuid_v4, Request, RequestDomain};
pub use debate::{
    detect_contestation, Contestation, ContestationPolicy, DebateOutcome, SeatOutcome,
};
pub use governance::{GovernanceResult, Verdict};
pub use judge::{
    Grade, GradePolicy, JudgeOutput, JudgeSynthesizer, RiskLevel, RiskVerdict, Synthesis,
};
pub use metrics::{Decision, DecisionWindow, WindowStats};
pub use proof::{
    mask_token, signing_payload, ProofCheck, ProofRecord, ShareToken, VerificationStatus,
};
pub use seat::{
    Ballot, Provider, RiskFlag, RiskSeverity, SeatDescriptor, SeatId, SeatRoster, SeatStatus,
    Stance,
};
