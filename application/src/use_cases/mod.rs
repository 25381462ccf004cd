//! Use cases - application flows composed from domain logic and ports

pub mod run_governance;
pub mod share_token;
pub mod verify_proof;

pub use run_governance::{
    GovernanceRun, RunGovernanceError, RunGovernanceInput, RunGovernanceUseCase,
};
pub use share_token::{ShareTokenError, ShareTokenUseCase};
pub use verify_proof::VerifyProofUseCase;
