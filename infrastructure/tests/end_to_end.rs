//! End-to-end pipeline tests against the real adapters: synthetic seats,
//! Ed25519 proof authority, and the throughput monitor.

use std::sync::Arc;

use gavel_application::{
    DebateParams, GovernancePolicy, ProofAuthority, RunGovernanceInput, RunGovernanceUseCase,
    ShareTokenUseCase, VerifyProofUseCase,
};
use gavel_domain::{
    Decision, Request, RequestDomain, SeatRoster, SeatStatus, Verdict, VerificationStatus,
};
use gavel_infrastructure::{
    Ed25519ProofAuthority, SyntheticSeatConfig, SyntheticSeatGateway, ThroughputMonitor,
};

fn policy() -> GovernancePolicy {
    GovernancePolicy::default().with_debate(DebateParams {
        seat_timeout_ms: 500,
        deadline_ms: 1_000,
    })
}

fn stack(
    config: SyntheticSeatConfig,
) -> (
    RunGovernanceUseCase<SyntheticSeatGateway>,
    Arc<dyn ProofAuthority>,
) {
    let gateway = Arc::new(SyntheticSeatGateway::new(config));
    let authority: Arc<dyn ProofAuthority> =
        Arc::new(Ed25519ProofAuthority::generate("policy-pack/test", 24));
    let use_case = RunGovernanceUseCase::new(gateway, Arc::clone(&authority), policy());
    (use_case, authority)
}

#[tokio::test]
async fn full_run_issues_verifiable_proof() {
    let (use_case, authority) = stack(SyntheticSeatConfig::instant());
    let request = Request::new(RequestDomain::Qna, "is the quarterly claim supported?");
    let input = RunGovernanceInput::new(request, SeatRoster::synthetic(7));

    let run = use_case.execute(input).await.unwrap();
    assert_eq!(run.result.seats.len(), 7);

    // Every admitted request gets a proof record, whatever the verdict
    let proof = run.proof.expect("admitted request issued no proof");
    let verifier = VerifyProofUseCase::new(Arc::clone(&authority));
    let check = verifier.execute(&proof.proof_id, &proof.input_hash);
    assert!(check.valid, "freshly issued proof failed: {}", check.message);
    assert!(proof.expires_at > proof.issued_at);
}

#[tokio::test]
async fn blocked_request_reaches_no_seat() {
    let (use_case, _) = stack(SyntheticSeatConfig::instant());
    let request = Request::new(RequestDomain::Qna, "please bypass governance here");
    let input = RunGovernanceInput::new(request, SeatRoster::synthetic(7));

    let run = use_case.execute(input).await.unwrap();
    assert_eq!(run.result.verdict, Verdict::Refused);
    assert!(run.result.seats.is_empty());
    assert!(run.proof.is_none());
}

#[tokio::test]
async fn degraded_panel_still_settles_every_seat() {
    let config = SyntheticSeatConfig::instant()
        .with_offline_seat("seat-1")
        .with_failing_seat("seat-2")
        .with_stalled_seat("seat-3");
    let (use_case, _) = stack(config);
    let request = Request::new(RequestDomain::Qna, "routine review question");
    let input = RunGovernanceInput::new(request, SeatRoster::synthetic(7));

    let run = use_case.execute(input).await.unwrap();
    assert_eq!(run.result.seats.len(), 7);

    let status_of = |id: &str| {
        run.result
            .seats
            .iter()
            .find(|s| s.seat.seat_id == id)
            .map(|s| s.status)
            .unwrap()
    };
    assert_eq!(status_of("seat-1"), SeatStatus::Offline);
    assert_eq!(status_of("seat-2"), SeatStatus::Errored);
    assert_eq!(status_of("seat-3"), SeatStatus::TimedOut);
    // The four healthy seats still produced a verdict
    assert_ne!(run.result.verdict, Verdict::InsufficientEvidence);
}

#[tokio::test]
async fn share_token_flow_roundtrips() {
    let (use_case, authority) = stack(SyntheticSeatConfig::instant());

    let request = Request::new(RequestDomain::Qna, "well supported claim");
    let input = RunGovernanceInput::new(request, SeatRoster::synthetic(7));
    let run = use_case.execute(input).await.unwrap();
    let proof = run.proof.expect("admitted request issued no proof");

    let sharer = ShareTokenUseCase::new(Arc::clone(&authority));
    let token = sharer.issue(&proof.proof_id).unwrap();
    assert!(token.masked().len() < token.token.len());

    let redeemed = sharer.redeem(&token.token).unwrap();
    assert_eq!(redeemed.proof_id, proof.proof_id);
    assert_eq!(redeemed.input_hash, proof.input_hash);
}

#[tokio::test]
async fn tampered_hash_is_rejected() {
    let (use_case, authority) = stack(SyntheticSeatConfig::instant());
    let request = Request::new(RequestDomain::Qna, "is the claim supported?");
    let input = RunGovernanceInput::new(request, SeatRoster::synthetic(7));
    let run = use_case.execute(input).await.unwrap();

    let proof = run.proof.expect("admitted request issued no proof");
    let tampered = Ed25519ProofAuthority::input_hash(b"different bytes");
    let status = authority.verify(&proof.proof_id, &tampered);
    assert_eq!(status, VerificationStatus::HashMismatch);
}

#[tokio::test]
async fn monitor_tracks_settled_decisions() {
    let (use_case, _) = stack(SyntheticSeatConfig::instant());
    let monitor = ThroughputMonitor::new(50);

    for i in 0..5 {
        let request = Request::new(RequestDomain::Qna, format!("question {}", i));
        let input = RunGovernanceInput::new(request, SeatRoster::synthetic(3));
        let run = use_case.execute(input).await.unwrap();
        monitor.record(Decision::from_result(
            &run.result,
            run.proof.map(|p| p.proof_id),
            run.latency_ms,
        ));
    }

    let stats = monitor.window_stats();
    assert_eq!(stats.count, 5);
    assert!(stats.certified_rate >= 0.0 && stats.certified_rate <= 1.0);
}
