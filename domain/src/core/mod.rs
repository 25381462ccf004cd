//! Core domain primitives shared across the engine.

pub mod id;
pub mod request;

pub use id::{current_timestamp_ms, uuid_v4};
pub use request::{Request, RequestDomain};
