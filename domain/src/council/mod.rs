//! Council deliberation domain
//!
//! Core concepts for multi-model deliberation:
//!
//! - **Classic**: two or three members answer independently and a chairman
//!   synthesizes one final answer.
//! - **Debate**: a proponent drafts, an opponent audits the draft for
//!   factual or logical flaws, and the chairman is only paid for when the
//!   audit actually finds something (the short-circuit).

pub mod assignment;
pub mod role;
pub mod verdict;

pub use assignment::{MAX_MEMBERS, MIN_MEMBERS, RoleAssignment};
pub use role::{CouncilRole, DeliberationMode, Phase};
pub use verdict::{AuditVerdict, VERDICT_TAG, critique_body, parse_audit_verdict};
