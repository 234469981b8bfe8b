//! Transcript value objects - immutable record of a deliberation.
//!
//! - [`RoundResult`] - one provider call's output (or failure)
//! - [`Transcript`] - ordered sequence of round results for one query
//! - [`DeliberationOutcome`] - final answer plus the full transcript
//!
//! A `Transcript` only grows while the engine owns it mutably; freezing is
//! by move into the [`DeliberationOutcome`], after which callers can only
//! observe it through shared references.

use crate::core::model::Model;
use crate::council::role::{CouncilRole, DeliberationMode};
use serde::{Deserialize, Serialize};

/// Output of a single provider call within a deliberation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundResult {
    /// The council role that produced this result
    pub role: CouncilRole,
    /// The model behind the seat
    pub model: Model,
    /// The output text (empty on failure)
    pub output: String,
    /// Whether the call succeeded
    pub success: bool,
    /// Error detail if failed
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl RoundResult {
    /// Record a successful call.
    pub fn success(role: CouncilRole, model: Model, output: impl Into<String>) -> Self {
        Self {
            role,
            model,
            output: output.into(),
            success: true,
            error: None,
        }
    }

    /// Record a failed call. The failure stays in the transcript as
    /// evidence; it is never silently dropped.
    pub fn failure(role: CouncilRole, model: Model, error: impl Into<String>) -> Self {
        Self {
            role,
            model,
            output: String::new(),
            success: false,
            error: Some(error.into()),
        }
    }

    pub fn is_success(&self) -> bool {
        self.success
    }
}

/// Ordered, append-only record of every round for one query
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transcript {
    entries: Vec<RoundResult>,
}

impl Transcript {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a round result in call order. Entries are never removed
    /// or reordered.
    pub fn append(&mut self, result: RoundResult) {
        self.entries.push(result);
    }

    pub fn entries(&self) -> &[RoundResult] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn last(&self) -> Option<&RoundResult> {
        self.entries.last()
    }

    /// Iterator over successful member entries (Classic mode)
    pub fn successful_members(&self) -> impl Iterator<Item = &RoundResult> {
        self.entries
            .iter()
            .filter(|r| r.role.is_member() && r.success)
    }

    /// Iterator over failed entries of any role
    pub fn failures(&self) -> impl Iterator<Item = &RoundResult> {
        self.entries.iter().filter(|r| !r.success)
    }

    /// The chairman entry, if one was produced
    pub fn chairman(&self) -> Option<&RoundResult> {
        self.entries.iter().find(|r| r.role.is_chairman())
    }
}

/// The unit returned per query: final answer plus audit trail
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeliberationOutcome {
    /// The synthesized (or short-circuited) final answer
    pub final_answer: String,
    /// Full record of the deliberation, frozen
    pub transcript: Transcript,
    /// Protocol that produced this outcome
    pub mode: DeliberationMode,
    /// Whether the Debate short-circuit skipped the chairman
    pub short_circuited: bool,
}

impl DeliberationOutcome {
    pub fn new(
        final_answer: impl Into<String>,
        transcript: Transcript,
        mode: DeliberationMode,
        short_circuited: bool,
    ) -> Self {
        Self {
            final_answer: final_answer.into(),
            transcript,
            mode,
            short_circuited,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn member(i: usize, model: Model, text: &str) -> RoundResult {
        RoundResult::success(CouncilRole::Member(i), model, text)
    }

    #[test]
    fn test_round_result_success() {
        let r = member(1, Model::Gpt4o, "Paris is the capital.");
        assert!(r.is_success());
        assert!(r.error.is_none());
    }

    #[test]
    fn test_round_result_failure_keeps_detail() {
        let r = RoundResult::failure(CouncilRole::Member(2), Model::Llama3, "request timed out");
        assert!(!r.is_success());
        assert_eq!(r.output, "");
        assert_eq!(r.error.as_deref(), Some("request timed out"));
    }

    #[test]
    fn test_transcript_preserves_order() {
        let mut t = Transcript::new();
        t.append(member(1, Model::Gpt4o, "first"));
        t.append(member(2, Model::Llama3, "second"));
        t.append(RoundResult::success(
            CouncilRole::Chairman,
            Model::Claude3Opus,
            "synthesis",
        ));

        assert_eq!(t.len(), 3);
        assert_eq!(t.entries()[0].role, CouncilRole::Member(1));
        assert!(t.last().unwrap().role.is_chairman());
    }

    #[test]
    fn test_transcript_filters() {
        let mut t = Transcript::new();
        t.append(member(1, Model::Gpt4o, "ok"));
        t.append(RoundResult::failure(
            CouncilRole::Member(2),
            Model::Llama3,
            "boom",
        ));

        assert_eq!(t.successful_members().count(), 1);
        assert_eq!(t.failures().count(), 1);
        assert!(t.chairman().is_none());
    }

    #[test]
    fn test_outcome_round_trips_as_json() {
        let mut t = Transcript::new();
        t.append(member(1, Model::Gpt4o, "The answer is 42."));
        let outcome =
            DeliberationOutcome::new("The answer is 42.", t, DeliberationMode::Debate, true);

        let json = serde_json::to_string(&outcome).unwrap();
        let back: DeliberationOutcome = serde_json::from_str(&json).unwrap();
        assert_eq!(back, outcome);
    }
}
