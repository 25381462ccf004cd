//! Throughput monitoring and load generation

pub mod loadgen;
pub mod monitor;

pub use loadgen::{LoadGenConfig, LoadGenerator, LoadReport};
pub use monitor::{MonitorSnapshot, ThroughputMonitor};
