//! Debate types - fan-out results and the contestation detector.

pub mod contestation;
pub mod outcome;

pub use contestation::{detect_contestation, Contestation, ContestationPolicy};
pub use outcome::{DebateOutcome, SeatOutcome};
