//! Proof authority adapter

pub mod authority;

pub use authority::Ed25519ProofAuthority;
