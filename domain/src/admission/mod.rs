//! Admission classifier - the pre-debate policy gate.
//!
//! Requests pass through a linear 8-stage pipeline with early exit. The
//! classifier owns the first three stages (intercept, risk classification,
//! sanitization); the remaining stages are driven by the governance use case
//! and are represented here so stage transitions share one vocabulary.

pub mod classifier;
pub mod sanitize;
pub mod stage;

pub use classifier::{AdmissionClassifier, AdmissionDecision, AdmissionPolicy, RiskClass};
pub use sanitize::{sanitize_payload, SanitizedPayload};
pub use stage::PipelineStage;
