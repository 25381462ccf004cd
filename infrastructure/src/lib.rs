//! Infrastructure layer for the gavel governance engine.
//!
//! Concrete adapters behind the application's ports: the synthetic seat
//! gateway, the Ed25519 proof authority, the throughput monitor and load
//! generator, and the TOML configuration loader.

pub mod config;
pub mod metrics;
pub mod proof;
pub mod seats;

pub use config::{ConfigLoader, FileConfig};
pub use metrics::{LoadGenConfig, LoadGenerator, LoadReport, MonitorSnapshot, ThroughputMonitor};
pub use proof::Ed25519ProofAuthority;
pub use seats::{SyntheticSeatConfig, SyntheticSeatGateway};
