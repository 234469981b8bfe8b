//! Context manager - owns the conversation for one session.
//!
//! Created at session start, discarded at session end; nothing is
//! persisted across process restarts. The deliberation engine only ever
//! sees [`snapshot`](ContextManager::snapshot) output, taken once per
//! query before any provider call.

use council_domain::{Conversation, DomainError, Turn};

/// Session-scoped owner of the ordered turn sequence
#[derive(Debug, Default)]
pub struct ContextManager {
    conversation: Conversation,
}

impl ContextManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a turn; the only validation is non-empty text.
    pub fn append(&mut self, turn: Turn) -> Result<(), DomainError> {
        self.conversation.append(turn)
    }

    /// Append the user's query for this round.
    pub fn append_user(&mut self, text: impl Into<String>) -> Result<(), DomainError> {
        self.append(Turn::user(text))
    }

    /// Append a final answer produced by a deliberation.
    pub fn append_assistant(&mut self, text: impl Into<String>) -> Result<(), DomainError> {
        self.append(Turn::assistant(text))
    }

    /// Read-only copy of the conversation for one deliberation round.
    pub fn snapshot(&self) -> Vec<Turn> {
        self.conversation.snapshot()
    }

    pub fn len(&self) -> usize {
        self.conversation.len()
    }

    pub fn is_empty(&self) -> bool {
        self.conversation.is_empty()
    }
}
