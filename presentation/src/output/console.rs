//! Console output formatter for deliberation outcomes

use crate::output::formatter::OutputFormatter;
use colored::Colorize;
use council_domain::{DeliberationMode, DeliberationOutcome};

/// Formats deliberation outcomes for console display
pub struct ConsoleFormatter;

impl ConsoleFormatter {
    /// Format the complete outcome, transcript included
    pub fn format(outcome: &DeliberationOutcome) -> String {
        let mut output = String::new();

        output.push_str(&Self::header("LLM Council Deliberation"));
        output.push('\n');

        output.push_str(&format!(
            "{} {}\n",
            "Mode:".cyan().bold(),
            outcome.mode
        ));
        if outcome.mode == DeliberationMode::Debate && outcome.short_circuited {
            output.push_str(&format!(
                "{}\n",
                "The draft passed the logic audit unchanged.".green()
            ));
        }

        output.push_str(&Self::section_header("Transcript"));
        for entry in outcome.transcript.entries() {
            if entry.success {
                output.push_str(&format!(
                    "\n{}\n{}\n",
                    format!("── {} ({}) ──", entry.role, entry.model)
                        .yellow()
                        .bold(),
                    entry.output
                ));
            } else {
                output.push_str(&format!(
                    "\n{}\nError: {}\n",
                    format!("── {} ({}) ──", entry.role, entry.model).red().bold(),
                    entry.error.as_deref().unwrap_or("Unknown")
                ));
            }
        }

        output.push_str(&Self::section_header("Final Answer"));
        output.push_str(&format!("\n{}\n", outcome.final_answer));

        output.push_str(&Self::footer());

        output
    }

    /// Format as JSON
    pub fn format_json(outcome: &DeliberationOutcome) -> String {
        serde_json::to_string_pretty(outcome).unwrap_or_else(|_| "{}".to_string())
    }

    /// Format the final answer only (concise output)
    pub fn format_answer_only(outcome: &DeliberationOutcome) -> String {
        let mut output = String::new();

        output.push_str(&format!(
            "{}\n\n",
            "=== Council Answer ===".cyan().bold()
        ));

        let failed = outcome.transcript.failures().count();
        if failed > 0 {
            output.push_str(&format!(
                "{}\n\n",
                format!("({} participant(s) failed; see --output full)", failed).dimmed()
            ));
        }

        output.push_str(&outcome.final_answer);
        output.push('\n');

        output
    }

    fn header(title: &str) -> String {
        let line = "=".repeat(60);
        format!("{}\n{:^60}\n{}", line.cyan(), title.bold(), line.cyan())
    }

    fn section_header(title: &str) -> String {
        format!("\n{}\n{}\n", title.cyan().bold(), "-".repeat(40))
    }

    fn footer() -> String {
        format!("\n{}\n", "=".repeat(60).cyan())
    }
}

impl OutputFormatter for ConsoleFormatter {
    fn format(&self, outcome: &DeliberationOutcome) -> String {
        Self::format(outcome)
    }

    fn format_json(&self, outcome: &DeliberationOutcome) -> String {
        Self::format_json(outcome)
    }

    fn format_answer_only(&self, outcome: &DeliberationOutcome) -> String {
        Self::format_answer_only(outcome)
    }
}
