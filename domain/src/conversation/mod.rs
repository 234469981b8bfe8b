//! Conversation entities
//!
//! A conversation is the append-only sequence of user and assistant turns
//! for one session. Deliberations read it through [`Conversation::snapshot`],
//! which is taken once per query before any provider call.

use crate::core::error::DomainError;
use serde::{Deserialize, Serialize};

/// Role of a turn in a conversation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TurnRole {
    User,
    Assistant,
}

impl TurnRole {
    pub fn as_str(&self) -> &str {
        match self {
            TurnRole::User => "user",
            TurnRole::Assistant => "assistant",
        }
    }
}

/// A single turn in a conversation (Entity)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Turn {
    pub role: TurnRole,
    pub text: String,
}

impl Turn {
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            role: TurnRole::User,
            text: text.into(),
        }
    }

    pub fn assistant(text: impl Into<String>) -> Self {
        Self {
            role: TurnRole::Assistant,
            text: text.into(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.text.trim().is_empty()
    }
}

/// An append-only conversation for one session (Entity)
///
/// Turns are never removed or reordered. The only read path for
/// deliberations is [`snapshot`](Conversation::snapshot), so a round can
/// never observe a partially-appended state.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Conversation {
    turns: Vec<Turn>,
}

impl Conversation {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a turn. The only validation is non-empty text.
    pub fn append(&mut self, turn: Turn) -> Result<(), DomainError> {
        if turn.is_empty() {
            return Err(DomainError::EmptyTurn);
        }
        self.turns.push(turn);
        Ok(())
    }

    /// Read-only copy of the turn sequence for one deliberation round.
    pub fn snapshot(&self) -> Vec<Turn> {
        self.turns.clone()
    }

    pub fn turns(&self) -> &[Turn] {
        &self.turns
    }

    pub fn len(&self) -> usize {
        self.turns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.turns.is_empty()
    }
}
