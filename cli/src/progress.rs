//! Console progress reporting for pipeline stages

use colored::Colorize;

use gavel_application::StageNotifier;
use gavel_domain::{PipelineStage, SeatDescriptor, SeatStatus};

/// Prints each stage transition as it happens
pub struct ConsoleProgress;

impl ConsoleProgress {
    fn stage_display_name(stage: PipelineStage) -> &'static str {
        match stage {
            PipelineStage::Intercept => "Stage 1: Intercept",
            PipelineStage::ClassifyRisk => "Stage 2: Classify Risk",
            PipelineStage::Sanitize => "Stage 3: Sanitize",
            PipelineStage::Debate => "Stage 4: Debate",
            PipelineStage::Judge => "Stage 5: Judge",
            PipelineStage::Verify => "Stage 6: Verify",
            PipelineStage::Log => "Stage 7: Log",
            PipelineStage::Release => "Stage 8: Release",
        }
    }
}

impl StageNotifier for ConsoleProgress {
    fn on_stage_start(&self, stage: PipelineStage) {
        println!("{} {}", "->".cyan(), Self::stage_display_name(stage).bold());
    }

    fn on_stage_complete(&self, stage: PipelineStage, passed: bool) {
        if passed {
            println!("   {} {}", "v".green(), Self::stage_display_name(stage));
        } else {
            println!(
                "   {} {} (short-circuit)",
                "x".red(),
                Self::stage_display_name(stage)
            );
        }
    }

    fn on_seat_settled(&self, seat: &SeatDescriptor, status: SeatStatus) {
        let marker = match status {
            SeatStatus::Voted | SeatStatus::Abstained => "v".green(),
            _ => "x".red(),
        };
        println!("     {} {} [{}]", marker, seat.display_name(), status);
    }
}
