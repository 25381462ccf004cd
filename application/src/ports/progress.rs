//! Stage progress notification port
//!
//! Defines the interface for reporting pipeline stage transitions during a
//! governance run. Callback order always matches the 8-stage pipeline
//! order; the core logic stays callback-agnostic.

use gavel_domain::{PipelineStage, SeatDescriptor, SeatStatus};

/// Callback for stage transitions during a governance run
///
/// Implementations live at the boundary (console, UI bridge) and can render
/// progressive state as the pipeline advances.
pub trait StageNotifier: Send + Sync {
    /// Called when a pipeline stage starts
    fn on_stage_start(&self, stage: PipelineStage);

    /// Called when a pipeline stage completes or short-circuits
    fn on_stage_complete(&self, stage: PipelineStage, passed: bool);

    /// Called once per seat as it settles during the debate stage
    fn on_seat_settled(&self, _seat: &SeatDescriptor, _status: SeatStatus) {}
}

/// No-op notifier for when progress reporting is not needed
pub struct NoProgress;

impl StageNotifier for NoProgress {
    fn on_stage_start(&self, _stage: PipelineStage) {}
    fn on_stage_complete(&self, _stage: PipelineStage, _passed: bool) {}
}
