//! Domain layer for llm-council
//!
//! This crate contains the core deliberation types and logic. It has no
//! dependencies on infrastructure or presentation concerns.
//!
//! # Core Concepts
//!
//! ## Council
//!
//! A council is a set of model participants deliberating on one query.
//! Two protocols are supported:
//!
//! - **Classic**: members answer independently, the chairman synthesizes
//! - **Debate**: proponent drafts, opponent audits, chairman only runs
//!   when the audit finds flaws (the short-circuit)
//!
//! ## Transcript
//!
//! Every intermediate output lands in an ordered, immutable [`Transcript`]
//! returned to the caller alongside the final answer.

pub mod conversation;
pub mod core;
pub mod council;
pub mod prompt;
pub mod transcript;

// Re-export commonly used types
pub use conversation::{Conversation, Turn, TurnRole};
pub use core::{error::DomainError, model::Model, query::Query};
pub use council::{
    AuditVerdict, CouncilRole, DeliberationMode, MAX_MEMBERS, MIN_MEMBERS, Phase, RoleAssignment,
    VERDICT_TAG, critique_body, parse_audit_verdict,
};
pub use prompt::PromptTemplate;
pub use transcript::{DeliberationOutcome, RoundResult, Transcript};
