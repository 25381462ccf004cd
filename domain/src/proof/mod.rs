//! Proof types - signed, hash-bound, time-boxed attestations of verdicts.

pub mod record;
pub mod token;

pub use record::{signing_payload, ProofCheck, ProofRecord, VerificationStatus};
pub use token::{mask_token, ShareToken};
