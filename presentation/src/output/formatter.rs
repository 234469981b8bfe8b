//! Output formatter trait

use council_domain::DeliberationOutcome;

/// Trait for formatting deliberation outcomes
pub trait OutputFormatter {
    /// Format the complete outcome including the transcript
    fn format(&self, outcome: &DeliberationOutcome) -> String;

    /// Format as JSON
    fn format_json(&self, outcome: &DeliberationOutcome) -> String;

    /// Format the final answer only (concise output)
    fn format_answer_only(&self, outcome: &DeliberationOutcome) -> String;
}
