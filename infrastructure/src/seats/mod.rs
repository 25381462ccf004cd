//! Seat gateway adapters

pub mod synthetic;

pub use synthetic::{SyntheticSeatConfig, SyntheticSeatGateway};
