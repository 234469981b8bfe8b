//! Council roles, deliberation modes, and protocol phases

use serde::{Deserialize, Serialize};

/// A participant's function within one deliberation (Value Object)
///
/// Not an entity of its own — a tag attached to each model assignment
/// and to every transcript entry.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CouncilRole {
    /// Classic-mode participant producing an independent opinion.
    /// The index is the seat number, starting at 1.
    Member(usize),
    /// Debate-mode role producing the initial draft
    Proponent,
    /// Debate-mode role auditing the draft for flaws
    Opponent,
    /// Synthesizes multiple inputs into one final answer
    Chairman,
}

impl CouncilRole {
    /// Human-readable label used in prompts and transcripts
    pub fn label(&self) -> String {
        match self {
            CouncilRole::Member(i) => format!("Council Member {}", i),
            CouncilRole::Proponent => "Proponent".to_string(),
            CouncilRole::Opponent => "Opponent".to_string(),
            CouncilRole::Chairman => "Chairman".to_string(),
        }
    }

    pub fn is_chairman(&self) -> bool {
        matches!(self, CouncilRole::Chairman)
    }

    pub fn is_member(&self) -> bool {
        matches!(self, CouncilRole::Member(_))
    }
}

impl std::fmt::Display for CouncilRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Orchestration protocol for one deliberation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeliberationMode {
    /// Independent member opinions, then chairman synthesis
    Classic,
    /// Proponent draft, opponent audit, optional chairman synthesis
    Debate,
}

impl DeliberationMode {
    pub fn as_str(&self) -> &str {
        match self {
            DeliberationMode::Classic => "classic",
            DeliberationMode::Debate => "debate",
        }
    }
}

impl std::fmt::Display for DeliberationMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for DeliberationMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "classic" => Ok(DeliberationMode::Classic),
            "debate" => Ok(DeliberationMode::Debate),
            other => Err(format!("unknown deliberation mode: {}", other)),
        }
    }
}

/// Phase of a deliberation run
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Phase {
    /// Classic: all members answer the query in parallel
    Gathering,
    /// Debate: the proponent drafts an answer
    Proposing,
    /// Debate: the opponent audits the draft
    Auditing,
    /// Chairman synthesizes the final answer
    Synthesizing,
}

impl Phase {
    pub fn as_str(&self) -> &str {
        match self {
            Phase::Gathering => "gathering",
            Phase::Proposing => "proposing",
            Phase::Auditing => "auditing",
            Phase::Synthesizing => "synthesizing",
        }
    }

    pub fn display_name(&self) -> &str {
        match self {
            Phase::Gathering => "Gathering Opinions",
            Phase::Proposing => "Drafting",
            Phase::Auditing => "Logic Audit",
            Phase::Synthesizing => "Synthesis",
        }
    }
}

impl std::fmt::Display for Phase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}
