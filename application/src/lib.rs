//! Application layer for the gavel governance engine.
//!
//! Use cases orchestrate the domain's pipeline stages and talk to the
//! outside world only through ports. No provider SDK, clock source, or
//! signing key appears at this layer.

pub mod config;
pub mod ports;
pub mod use_cases;

pub use config::{DebateParams, GovernancePolicy};
pub use ports::{NoProgress, ProofAuthority, SeatError, SeatGateway, StageNotifier};
pub use use_cases::{
    GovernanceRun, RunGovernanceError, RunGovernanceInput, RunGovernanceUseCase, ShareTokenError,
    ShareTokenUseCase, VerifyProofUseCase,
};
