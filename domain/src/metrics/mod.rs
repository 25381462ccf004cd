//! Throughput metrics - decision records and the rolling window.

pub mod decision;
pub mod window;

pub use decision::Decision;
pub use window::{DecisionWindow, WindowStats};
