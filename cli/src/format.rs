//! Console output formatting for governance results

use colored::Colorize;

use gavel_domain::{Grade, GovernanceResult, ProofRecord, SeatStatus, Verdict};

/// Formats governance results for console display
pub struct ConsoleFormatter;

impl ConsoleFormatter {
    /// Format the complete result: verdict, seats, rationale, proof
    pub fn format(result: &GovernanceResult, proof: Option<&ProofRecord>) -> String {
        let mut output = String::new();

        output.push_str(&Self::header("Governance Result"));
        output.push('\n');

        output.push_str(&format!(
            "{} {}\n",
            "Verdict:".cyan().bold(),
            Self::verdict_colored(result.verdict)
        ));
        output.push_str(&format!(
            "{} {}\n",
            "Grade:".cyan().bold(),
            Self::grade_colored(result.grade)
        ));
        if result.contested {
            output.push_str(&format!(
                "{} {}\n",
                "Contested:".yellow().bold(),
                result.contested_reasons.join("; ")
            ));
        }
        output.push_str(&format!("{} {}\n", "Trace:".cyan().bold(), result.trace_id));

        if !result.seats.is_empty() {
            output.push_str(&Self::section_header("Panel"));
            for outcome in &result.seats {
                let line = match (&outcome.ballot, outcome.status) {
                    (Some(ballot), SeatStatus::Voted) => format!(
                        "  {} {:<24} {} (score {}, confidence {:.2})",
                        "v".green(),
                        outcome.seat.display_name(),
                        ballot.stance,
                        ballot.score,
                        ballot.confidence
                    ),
                    (_, status) => format!(
                        "  {} {:<24} {}",
                        if status.has_ballot() { "v".green() } else { "x".red() },
                        outcome.seat.display_name(),
                        status
                    ),
                };
                output.push_str(&line);
                output.push('\n');
            }
        }

        output.push_str(&Self::section_header("Judge"));
        output.push_str(&format!("\n{}\n", result.judge.final_answer));
        if !result.judge.rationale.is_empty() {
            output.push_str(&format!("\n{}\n", "Rationale:".cyan().bold()));
            for line in &result.judge.rationale {
                output.push_str(&format!("  * {}\n", line));
            }
        }
        output.push_str(&format!(
            "\n{} {}",
            "Risk:".cyan().bold(),
            result.judge.risk_verdict.level
        ));
        if !result.judge.risk_verdict.notes.is_empty() {
            output.push_str(&format!(" ({})", result.judge.risk_verdict.notes.join("; ")));
        }
        output.push('\n');

        if let Some(record) = proof {
            output.push_str(&Self::section_header("Proof Record"));
            output.push_str(&format!("  proof_id:    {}\n", record.proof_id));
            output.push_str(&format!("  input_hash:  {}\n", record.input_hash));
            output.push_str(&format!("  issued_at:   {}\n", record.issued_at.to_rfc3339()));
            output.push_str(&format!("  expires_at:  {}\n", record.expires_at.to_rfc3339()));
            output.push_str(&format!("  policy_pack: {}\n", record.policy_pack_version));
        }

        output.push_str(&Self::footer());
        output
    }

    /// Only the verdict line and final answer
    pub fn format_verdict_only(result: &GovernanceResult) -> String {
        format!(
            "{} [{}]\n{}",
            Self::verdict_colored(result.verdict),
            Self::grade_colored(result.grade),
            result.judge.final_answer
        )
    }

    /// JSON output: the result plus the proof record, when present
    pub fn format_json(
        result: &GovernanceResult,
        proof: Option<&ProofRecord>,
    ) -> serde_json::Result<String> {
        let value = serde_json::json!({
            "result": result,
            "proof": proof,
        });
        serde_json::to_string_pretty(&value)
    }

    fn verdict_colored(verdict: Verdict) -> String {
        let text = verdict.to_string();
        match verdict {
            Verdict::Certified => text.green().bold().to_string(),
            Verdict::HumanReviewRequired => text.yellow().bold().to_string(),
            Verdict::Refused => text.red().bold().to_string(),
            Verdict::InsufficientEvidence => text.magenta().bold().to_string(),
        }
    }

    fn grade_colored(grade: Grade) -> String {
        let text = grade.to_string();
        match grade {
            Grade::Green => text.green().to_string(),
            Grade::Yellow => text.yellow().to_string(),
            Grade::Red => text.red().to_string(),
        }
    }

    fn header(title: &str) -> String {
        format!(
            "\n{}\n{}\n",
            format!("=== {} ===", title).cyan().bold(),
            "".normal()
        )
    }

    fn section_header(title: &str) -> String {
        format!("\n{}\n", format!("-- {} --", title).cyan())
    }

    fn footer() -> String {
        format!("{}\n", "=".repeat(40).cyan())
    }
}
