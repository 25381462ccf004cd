//! Seat types - the independent model-backed voters in the panel.
//!
//! A [`SeatDescriptor`] identifies one voter (provider + model). During a
//! debate each seat settles into exactly one [`SeatStatus`]; seats that
//! voted produce a [`Ballot`](crate::seat::ballot::Ballot).

pub mod ballot;
pub mod descriptor;

pub use ballot::{Ballot, RiskFlag, RiskSeverity, Stance};
pub use descriptor::{Provider, SeatDescriptor, SeatId, SeatRoster, SeatStatus};
