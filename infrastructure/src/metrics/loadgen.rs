//! Load generator - drives synthetic governance runs at a target rate.
//!
//! Every generated run goes through the real pipeline against the synthetic
//! seat gateway; nothing is stubbed below the use case. Cancellation stops
//! dispatch immediately and drains in-flight runs before reporting.

use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinSet;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use gavel_application::{RunGovernanceInput, RunGovernanceUseCase};
use gavel_domain::{Decision, Request, RequestDomain, SeatRoster};

use super::monitor::{MonitorSnapshot, ThroughputMonitor};
use crate::seats::SyntheticSeatGateway;

/// Sample payloads cycled through by the generator
const SAMPLE_PAYLOADS: &[&str] = &[
    "Is the quarterly revenue claim supported by the attached figures?",
    "Summarize the retention policy change for customer notification.",
    "Does the uploaded dataset description match its declared schema?",
    "Review the proposed answer about outage root cause for accuracy.",
    "Check the migration plan summary for unstated assumptions.",
];

/// Parameters for one load run
#[derive(Debug, Clone)]
pub struct LoadGenConfig {
    /// Target dispatch rate, runs per second
    pub rate_per_sec: f64,
    /// Total generation time; in-flight runs still drain after it elapses
    pub duration: Duration,
}

impl Default for LoadGenConfig {
    fn default() -> Self {
        Self {
            rate_per_sec: 20.0,
            duration: Duration::from_secs(10),
        }
    }
}

/// Outcome of a load run
#[derive(Debug, Clone)]
pub struct LoadReport {
    pub dispatched: u64,
    pub completed: u64,
    pub failed: u64,
    pub elapsed: Duration,
    pub snapshot: MonitorSnapshot,
}

/// Drives the governance pipeline with synthetic traffic
pub struct LoadGenerator {
    use_case: Arc<RunGovernanceUseCase<SyntheticSeatGateway>>,
    monitor: Arc<ThroughputMonitor>,
    roster: SeatRoster,
}

impl LoadGenerator {
    pub fn new(
        use_case: Arc<RunGovernanceUseCase<SyntheticSeatGateway>>,
        monitor: Arc<ThroughputMonitor>,
        roster: SeatRoster,
    ) -> Self {
        Self {
            use_case,
            monitor,
            roster,
        }
    }

    /// Generate load until the configured duration elapses or the token is
    /// cancelled, whichever comes first.
    pub async fn run(&self, config: LoadGenConfig, cancel: CancellationToken) -> LoadReport {
        let period = Duration::from_secs_f64(1.0 / config.rate_per_sec.max(0.1));
        let mut interval = tokio::time::interval(period);
        let started = tokio::time::Instant::now();

        info!(
            rate_per_sec = config.rate_per_sec,
            duration_secs = config.duration.as_secs_f64(),
            "load generation started"
        );

        let mut tasks: JoinSet<bool> = JoinSet::new();
        let mut dispatched: u64 = 0;
        let mut completed: u64 = 0;
        let mut failed: u64 = 0;

        loop {
            tokio::select! {
                _ = cancel.cancelled() => {
                    info!("load generation cancelled");
                    break;
                }
                _ = interval.tick() => {
                    if started.elapsed() >= config.duration {
                        break;
                    }
                    dispatched += 1;
                    self.spawn_one(&mut tasks, dispatched);
                }
                Some(joined) = tasks.join_next(), if !tasks.is_empty() => {
                    match joined {
                        Ok(true) => completed += 1,
                        Ok(false) => failed += 1,
                        Err(e) => {
                            warn!("load task join error: {}", e);
                            failed += 1;
                        }
                    }
                }
            }
        }

        // Drain in-flight runs
        while let Some(joined) = tasks.join_next().await {
            match joined {
                Ok(true) => completed += 1,
                Ok(false) => failed += 1,
                Err(_) => failed += 1,
            }
        }

        let elapsed = started.elapsed();
        let report = LoadReport {
            dispatched,
            completed,
            failed,
            elapsed,
            snapshot: self.monitor.snapshot(),
        };
        info!(
            dispatched = report.dispatched,
            completed = report.completed,
            failed = report.failed,
            "load generation finished"
        );
        report
    }

    fn spawn_one(&self, tasks: &mut JoinSet<bool>, seq: u64) {
        let use_case = Arc::clone(&self.use_case);
        let monitor = Arc::clone(&self.monitor);
        let roster = self.roster.clone();
        let payload = SAMPLE_PAYLOADS[(seq as usize) % SAMPLE_PAYLOADS.len()].to_string();

        monitor.enqueue();
        tasks.spawn(async move {
            let request = Request::new(RequestDomain::Qna, payload);
            let outcome = use_case
                .execute(RunGovernanceInput::new(request, roster))
                .await;
            monitor.dequeue();
            match outcome {
                Ok(run) => {
                    debug!(verdict = %run.result.verdict, latency_ms = run.latency_ms, "load run settled");
                    monitor.record(Decision::from_result(
                        &run.result,
                        run.proof.map(|p| p.proof_id),
                        run.latency_ms,
                    ));
                    true
                }
                Err(e) => {
                    warn!("load run failed: {}", e);
                    monitor.record_error();
                    false
                }
            }
        });
    }
}
