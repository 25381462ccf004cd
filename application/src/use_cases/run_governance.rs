//! Run Governance use case
//!
//! Drives a request through the full 8-stage pipeline: admission, debate
//! fan-out, contestation, judge synthesis, proof issuance, and release.

use std::collections::HashSet;
use std::sync::Arc;
use std::time::{Duration, Instant};

use thiserror::Error;
use tokio::task::JoinSet;
use tracing::{debug, info, warn};

use gavel_domain::{
    detect_contestation, uuid_v4, AdmissionClassifier, AdmissionDecision, Ballot, DebateOutcome,
    GovernanceResult, JudgeSynthesizer, PipelineStage, ProofRecord, Request, RiskClass,
    SeatDescriptor, SeatOutcome, SeatRoster, SeatStatus, Verdict,
};

use crate::config::GovernancePolicy;
use crate::ports::progress::{NoProgress, StageNotifier};
use crate::ports::proof_authority::ProofAuthority;
use crate::ports::seat_gateway::{SeatError, SeatGateway};

/// Errors that can occur before a governance run produces a result.
///
/// Failures inside the pipeline never surface here - they degrade to a
/// terminal verdict on the result instead.
#[derive(Error, Debug)]
pub enum RunGovernanceError {
    #[error("No seats configured for the debate panel")]
    EmptyRoster,
}

/// Input for the RunGovernance use case
#[derive(Debug, Clone)]
pub struct RunGovernanceInput {
    /// The request to govern
    pub request: Request,
    /// Fixed seat roster for the debate
    pub roster: SeatRoster,
}

impl RunGovernanceInput {
    pub fn new(request: Request, roster: SeatRoster) -> Self {
        Self { request, roster }
    }
}

/// Completed governance run: the terminal result plus the proof record, when
/// the verify stage was reached.
#[derive(Debug, Clone)]
pub struct GovernanceRun {
    pub result: GovernanceResult,
    pub proof: Option<ProofRecord>,
    /// Wall-clock latency of the whole run in milliseconds
    pub latency_ms: u64,
}

/// Use case for running one governance decision
pub struct RunGovernanceUseCase<G: SeatGateway + 'static> {
    gateway: Arc<G>,
    authority: Arc<dyn ProofAuthority>,
    policy: GovernancePolicy,
}

impl<G: SeatGateway + 'static> RunGovernanceUseCase<G> {
    pub fn new(gateway: Arc<G>, authority: Arc<dyn ProofAuthority>, policy: GovernancePolicy) -> Self {
        Self {
            gateway,
            authority,
            policy,
        }
    }

    /// Execute the use case with default (no-op) progress
    pub async fn execute(
        &self,
        input: RunGovernanceInput,
    ) -> Result<GovernanceRun, RunGovernanceError> {
        self.execute_with_progress(input, &NoProgress).await
    }

    /// Execute the use case with stage-transition callbacks.
    ///
    /// Callbacks fire in exact pipeline order; a short-circuiting stage
    /// reports `passed = false` and no later stage fires.
    pub async fn execute_with_progress(
        &self,
        input: RunGovernanceInput,
        progress: &dyn StageNotifier,
    ) -> Result<GovernanceRun, RunGovernanceError> {
        if input.roster.is_empty() {
            return Err(RunGovernanceError::EmptyRoster);
        }

        let trace_id = uuid_v4();
        let started = Instant::now();
        let request = input.request;

        info!(%trace_id, request_id = %request.request_id, "starting governance run");

        // Stages 1-3: the admission gate runs intercept, classify_risk, and
        // sanitize. Sanitization runs exactly once; only the sanitized
        // request exists downstream, and the proof hash binds to it.
        let classifier = AdmissionClassifier::new(self.policy.admission.clone());
        let admitted = match classifier.admit(&request) {
            AdmissionDecision::Refused {
                stage,
                reason_code,
                message,
            } => {
                notify_admission(progress, Some(stage));
                return Ok(self.terminal(
                    trace_id,
                    &request,
                    Verdict::Refused,
                    reason_code,
                    message,
                    started,
                ));
            }
            AdmissionDecision::HumanReviewRequired {
                stage,
                reason_code,
                message,
            } => {
                notify_admission(progress, Some(stage));
                return Ok(self.terminal(
                    trace_id,
                    &request,
                    Verdict::HumanReviewRequired,
                    reason_code,
                    message,
                    started,
                ));
            }
            AdmissionDecision::Admitted {
                request: admitted,
                risk_class,
                redactions,
                restricted_matches,
            } => {
                notify_admission(progress, None);
                if redactions > 0 {
                    debug!(%trace_id, redactions, "payload redacted");
                }
                if risk_class == RiskClass::Restrict {
                    debug!(
                        %trace_id,
                        terms = %restricted_matches.join(", "),
                        "restricted request admitted"
                    );
                }
                admitted
            }
        };

        // Stage 4: debate
        progress.on_stage_start(PipelineStage::Debate);
        let debate = self.phase_debate(&admitted, &input.roster, progress).await;
        progress.on_stage_complete(PipelineStage::Debate, !debate.is_evidence_free());

        // Stage 5: judge
        progress.on_stage_start(PipelineStage::Judge);
        let voted = debate.voted_ballots();
        let contestation = detect_contestation(&voted, &self.policy.contestation);
        let synthesis =
            JudgeSynthesizer::new(self.policy.grade).synthesize(&debate, &contestation);
        let result = GovernanceResult::from_synthesis(
            trace_id,
            admitted.request_id.clone(),
            debate,
            synthesis,
            contestation,
        );
        progress.on_stage_complete(PipelineStage::Judge, true);

        // Stage 6: verify - issue the proof and immediately re-check it
        progress.on_stage_start(PipelineStage::Verify);
        let record = self.authority.issue(&result, &admitted.canonical_bytes());
        let status = self.authority.verify(&record.proof_id, &record.input_hash);
        let proof = if status.is_valid() {
            Some(record)
        } else {
            warn!(trace_id = %result.trace_id, %status, "freshly issued proof failed self-check");
            None
        };
        progress.on_stage_complete(PipelineStage::Verify, proof.is_some());

        // Stage 7: log
        progress.on_stage_start(PipelineStage::Log);
        info!(
            trace_id = %result.trace_id,
            verdict = %result.verdict,
            grade = %result.grade,
            contested = result.contested,
            "governance decision recorded"
        );
        progress.on_stage_complete(PipelineStage::Log, true);

        // Stage 8: release
        progress.on_stage_start(PipelineStage::Release);
        let latency_ms = started.elapsed().as_millis() as u64;
        progress.on_stage_complete(PipelineStage::Release, true);

        Ok(GovernanceRun {
            result,
            proof,
            latency_ms,
        })
    }

    /// Build a terminal run for a request stopped at admission
    fn terminal(
        &self,
        trace_id: String,
        request: &Request,
        verdict: Verdict,
        reason_code: impl Into<String>,
        message: impl Into<String>,
        started: Instant,
    ) -> GovernanceRun {
        let reason_code = reason_code.into();
        let message = message.into();
        info!(%trace_id, %verdict, reason_code, "request stopped at admission");
        GovernanceRun {
            result: GovernanceResult::terminal(
                trace_id,
                request.request_id.clone(),
                verdict,
                reason_code,
                message,
            ),
            proof: None,
            latency_ms: started.elapsed().as_millis() as u64,
        }
    }

    /// Fan the request out to every seat concurrently; collect each seat's
    /// terminal status within the global deadline.
    async fn phase_debate(
        &self,
        request: &Request,
        roster: &SeatRoster,
        progress: &dyn StageNotifier,
    ) -> DebateOutcome {
        let mut join_set = JoinSet::new();
        let seat_timeout = Duration::from_millis(self.policy.debate.seat_timeout_ms);

        for seat in roster.iter() {
            let gateway = Arc::clone(&self.gateway);
            let seat = seat.clone();
            let request = request.clone();

            join_set.spawn(async move {
                if !gateway.is_online(&seat).await {
                    debug!(seat_id = %seat.seat_id, "seat offline, skipped");
                    return (seat, SeatResolution::Offline);
                }
                match tokio::time::timeout(seat_timeout, gateway.cast_ballot(&seat, &request))
                    .await
                {
                    Ok(Ok(ballot)) => (seat, SeatResolution::Ballot(ballot)),
                    Ok(Err(SeatError::Offline)) => (seat, SeatResolution::Offline),
                    Ok(Err(e)) => (seat, SeatResolution::Failed(e.to_string())),
                    Err(_) => (seat, SeatResolution::TimedOut),
                }
            });
        }

        let mut outcomes: Vec<SeatOutcome> = Vec::with_capacity(roster.len());
        let deadline = Duration::from_millis(self.policy.debate.deadline_ms);

        let gather = async {
            while let Some(joined) = join_set.join_next().await {
                match joined {
                    Ok((seat, resolution)) => {
                        let outcome = settle(seat, resolution);
                        progress.on_seat_settled(&outcome.seat, outcome.status);
                        outcomes.push(outcome);
                    }
                    Err(e) => {
                        warn!("seat task join error: {}", e);
                    }
                }
            }
        };

        if tokio::time::timeout(deadline, gather).await.is_err() {
            // Global deadline elapsed: cancel the stragglers and mark them,
            // never drop them silently.
            join_set.abort_all();
            let settled_ids: HashSet<String> =
                outcomes.iter().map(|o| o.seat.seat_id.clone()).collect();
            for seat in roster.iter().filter(|s| !settled_ids.contains(&s.seat_id)) {
                warn!(seat_id = %seat.seat_id, "seat outstanding at debate deadline");
                progress.on_seat_settled(seat, SeatStatus::TimedOut);
                outcomes.push(SeatOutcome::settled(seat.clone(), SeatStatus::TimedOut));
            }
        }

        DebateOutcome::new(outcomes)
    }
}

enum SeatResolution {
    Ballot(Ballot),
    Offline,
    TimedOut,
    Failed(String),
}

/// Replay admission stage callbacks in pipeline order, marking the stage
/// that short-circuited, if any, as failed.
fn notify_admission(progress: &dyn StageNotifier, stopped: Option<PipelineStage>) {
    for stage in [
        PipelineStage::Intercept,
        PipelineStage::ClassifyRisk,
        PipelineStage::Sanitize,
    ] {
        progress.on_stage_start(stage);
        if stopped == Some(stage) {
            progress.on_stage_complete(stage, false);
            return;
        }
        progress.on_stage_complete(stage, true);
    }
}

fn settle(seat: SeatDescriptor, resolution: SeatResolution) -> SeatOutcome {
    match resolution {
        SeatResolution::Ballot(ballot) => SeatOutcome::voted(seat, ballot),
        SeatResolution::Offline => SeatOutcome::settled(seat, SeatStatus::Offline),
        SeatResolution::TimedOut => SeatOutcome::settled(seat, SeatStatus::TimedOut),
        SeatResolution::Failed(reason) => {
            debug!(reason, "seat errored");
            SeatOutcome::settled(seat, SeatStatus::Errored)
        }
    }
}
