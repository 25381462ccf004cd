//! Ports - interfaces the application layer depends on.
//!
//! Implementations (adapters) live in the infrastructure layer.

pub mod proof_authority;
pub mod progress;
pub mod seat_gateway;

pub use proof_authority::ProofAuthority;
pub use progress::{NoProgress, StageNotifier};
pub use seat_gateway::{SeatError, SeatGateway};
