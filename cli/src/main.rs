//! CLI entrypoint for gavel
//!
//! This is the main binary that wires together all layers using
//! dependency injection.

mod cli;
mod format;
mod progress;

use std::sync::Arc;
use std::time::Duration;

use anyhow::{anyhow, Result};
use clap::Parser;
use colored::Colorize;
use tokio_util::sync::CancellationToken;
use tracing::info;
use tracing_subscriber::EnvFilter;

use gavel_application::{
    GovernancePolicy, GovernanceRun, ProofAuthority, RunGovernanceInput, RunGovernanceUseCase,
    ShareTokenUseCase, VerifyProofUseCase,
};
use gavel_domain::{Request, RequestDomain, SeatRoster};
use gavel_infrastructure::{
    ConfigLoader, Ed25519ProofAuthority, FileConfig, LoadGenConfig, LoadGenerator,
    SyntheticSeatGateway, ThroughputMonitor,
};

use cli::{Cli, Command, OutputFormat};
use format::ConsoleFormatter;
use progress::ConsoleProgress;

/// One process-wide wiring of the governance stack
struct Stack {
    use_case: Arc<RunGovernanceUseCase<SyntheticSeatGateway>>,
    authority: Arc<dyn ProofAuthority>,
    roster: SeatRoster,
}

impl Stack {
    fn build(policy: GovernancePolicy, roster: SeatRoster) -> Self {
        let gateway = Arc::new(SyntheticSeatGateway::default());
        let authority: Arc<dyn ProofAuthority> = Arc::new(Ed25519ProofAuthority::generate(
            policy.policy_pack_version.clone(),
            policy.proof_validity_hours,
        ));
        let use_case = Arc::new(RunGovernanceUseCase::new(
            gateway,
            Arc::clone(&authority),
            policy,
        ));
        Self {
            use_case,
            authority,
            roster,
        }
    }

    async fn govern(&self, request: Request, quiet: bool) -> Result<GovernanceRun> {
        let input = RunGovernanceInput::new(request, self.roster.clone());
        let run = if quiet {
            self.use_case.execute(input).await?
        } else {
            self.use_case
                .execute_with_progress(input, &ConsoleProgress)
                .await?
        };
        Ok(run)
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging based on verbosity level
    let filter = match cli.verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"), // -vvv or more
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();

    let file_config = if cli.no_config {
        ConfigLoader::load_defaults()
    } else {
        ConfigLoader::load(cli.config.as_ref())
            .map_err(|e| anyhow!("failed to load configuration: {}", e))?
    };
    let policy = file_config.to_policy();

    info!("starting gavel");

    match cli.command {
        Command::Run {
            payload,
            domain,
            seats,
            output,
        } => {
            let roster = roster_for(&file_config, seats);
            let stack = Stack::build(policy, roster);
            let domain: RequestDomain = domain.parse().expect("infallible");
            let run = stack
                .govern(Request::new(domain, payload), cli.quiet)
                .await?;

            let rendered = match output {
                OutputFormat::Full => ConsoleFormatter::format(&run.result, run.proof.as_ref()),
                OutputFormat::Verdict => ConsoleFormatter::format_verdict_only(&run.result),
                OutputFormat::Json => {
                    ConsoleFormatter::format_json(&run.result, run.proof.as_ref())?
                }
            };
            println!("{}", rendered);
        }

        Command::Verify { payload, tamper } => {
            let stack = Stack::build(policy, file_config.roster());
            let run = stack
                .govern(Request::new(RequestDomain::Qna, payload), cli.quiet)
                .await?;

            let Some(proof) = run.proof else {
                println!(
                    "{} verdict {} produced no proof record to verify",
                    "note:".yellow(),
                    run.result.verdict
                );
                return Ok(());
            };

            let claimed_hash = if tamper {
                Ed25519ProofAuthority::input_hash(b"altered input bytes")
            } else {
                proof.input_hash.clone()
            };

            let verifier = VerifyProofUseCase::new(Arc::clone(&stack.authority));
            let check = verifier.execute(&proof.proof_id, &claimed_hash);

            println!();
            println!("proof_id:   {}", proof.proof_id);
            println!("input_hash: {}", claimed_hash);
            if check.valid {
                println!("{} {}", "VALID".green().bold(), check.message);
            } else {
                println!(
                    "{} [{}] {}",
                    "INVALID".red().bold(),
                    check.status,
                    check.message
                );
            }
        }

        Command::Share { payload } => {
            let stack = Stack::build(policy, file_config.roster());
            let run = stack
                .govern(Request::new(RequestDomain::Qna, payload), cli.quiet)
                .await?;

            let Some(proof) = run.proof else {
                println!(
                    "{} verdict {} produced no proof record to share",
                    "note:".yellow(),
                    run.result.verdict
                );
                return Ok(());
            };

            let sharer = ShareTokenUseCase::new(Arc::clone(&stack.authority));
            let token = sharer.issue(&proof.proof_id)?;
            println!();
            println!("proof_id: {}", proof.proof_id);
            println!("token:    {}", token.masked());
            println!("expires:  {}", token.expires_at.to_rfc3339());

            let redeemed = sharer.redeem(&token.token)?;
            println!(
                "{} token resolves to proof {}",
                "v".green(),
                redeemed.proof_id
            );
        }

        Command::Loadtest {
            rate,
            duration,
            seats,
        } => {
            let roster = roster_for(&file_config, seats);
            let stack = Stack::build(policy, roster.clone());
            let monitor = Arc::new(ThroughputMonitor::new(file_config.monitor.window_size));
            let generator = LoadGenerator::new(
                Arc::clone(&stack.use_case),
                Arc::clone(&monitor),
                roster,
            );

            let cancel = CancellationToken::new();
            let cancel_on_ctrl_c = cancel.clone();
            tokio::spawn(async move {
                if tokio::signal::ctrl_c().await.is_ok() {
                    cancel_on_ctrl_c.cancel();
                }
            });

            if !cli.quiet {
                println!(
                    "driving {} runs/sec for {}s over {} seats (ctrl-c to stop early)",
                    rate,
                    duration,
                    stack.roster.len()
                );
            }

            let report = generator
                .run(
                    LoadGenConfig {
                        rate_per_sec: rate,
                        duration: Duration::from_secs(duration),
                    },
                    cancel,
                )
                .await;

            let stats = &report.snapshot.stats;
            println!();
            println!("{}", "=== Load Report ===".cyan().bold());
            println!("dispatched:     {}", report.dispatched);
            println!("completed:      {}", report.completed);
            println!("failed:         {}", report.failed);
            println!("elapsed:        {:.2}s", report.elapsed.as_secs_f64());
            println!("window size:    {}", stats.count);
            println!("throughput:     {:.1}/sec", stats.throughput);
            println!("p50 latency:    {} ms", stats.p50_latency_ms);
            println!("p95 latency:    {} ms", stats.p95_latency_ms);
            println!("certified rate: {:.0}%", stats.certified_rate * 100.0);
            println!("queue depth:    {}", report.snapshot.queue_depth);
            println!("errors:         {}", report.snapshot.errors);
        }
    }

    Ok(())
}

fn roster_for(config: &FileConfig, seats_override: Option<usize>) -> SeatRoster {
    match seats_override {
        Some(n) => SeatRoster::synthetic(n.max(1)),
        None => config.roster(),
    }
}
