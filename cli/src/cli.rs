//! CLI command definitions

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Output format for governance results
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum OutputFormat {
    /// Full formatted output with seat statuses and rationale
    Full,
    /// Only the verdict line and final answer
    Verdict,
    /// JSON output
    Json,
}

/// CLI arguments for gavel
#[derive(Parser, Debug)]
#[command(name = "gavel")]
#[command(author, version, about = "Governance consensus and proof engine")]
#[command(long_about = r#"
Gavel governs a request through an 8-stage pipeline: an admission gate
classifies and sanitizes the payload, a panel of seats debates it in
parallel, a judge synthesizes one verdict, and certified verdicts are bound
into signed, time-boxed proof records.

Configuration files are loaded from (in priority order):
1. --config <path>     Explicit config file
2. ./gavel.toml        Project-level config
3. ~/.config/gavel/config.toml   Global config

Example:
  gavel run "Is the quarterly revenue claim supported by the figures?"
  gavel run --seats 5 --output json "Summarize the retention policy change"
  gavel share "Check the migration plan for unstated assumptions"
  gavel loadtest --rate 50 --duration 10
"#)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Verbosity level (-v = info, -vv = debug, -vvv = trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress progress output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Path to configuration file
    #[arg(long, value_name = "PATH", global = true)]
    pub config: Option<PathBuf>,

    /// Disable loading of configuration files
    #[arg(long, global = true)]
    pub no_config: bool,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Run one governance decision over the synthetic panel
    Run {
        /// The request payload to govern
        payload: String,

        /// Request domain
        #[arg(long, default_value = "qna")]
        domain: String,

        /// Panel size (overrides config)
        #[arg(long)]
        seats: Option<usize>,

        /// Output format
        #[arg(short, long, value_enum, default_value = "full")]
        output: OutputFormat,
    },

    /// Run a decision, then re-verify its proof record
    Verify {
        /// The request payload to govern and verify
        payload: String,

        /// Verify against deliberately altered input bytes to demonstrate
        /// tamper detection
        #[arg(long)]
        tamper: bool,
    },

    /// Run a decision, issue a share token, and redeem it
    Share {
        /// The request payload to govern and share
        payload: String,
    },

    /// Drive synthetic traffic through the pipeline and report percentiles
    Loadtest {
        /// Dispatch rate, runs per second
        #[arg(long, default_value_t = 20.0)]
        rate: f64,

        /// Generation time in seconds
        #[arg(long, default_value_t = 10)]
        duration: u64,

        /// Panel size (overrides config)
        #[arg(long)]
        seats: Option<usize>,
    },
}
