//! Audit verdict parsing for the Debate short-circuit decision.
//!
//! The opponent prompt demands a machine-checkable first line:
//!
//! ```text
//! VERDICT: APPROVED
//! ```
//!
//! or
//!
//! ```text
//! VERDICT: FLAWED
//! ```
//!
//! Parsing is pure domain logic with no I/O, just text matching. The
//! rules are conservative: only an explicit approval (the tagged
//! `APPROVED`, or a first line that is exactly a no-flaws phrase) can
//! trigger the short-circuit; anything ambiguous counts as flaws found.

use serde::{Deserialize, Serialize};

/// The opponent's binary verdict on a proponent draft
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AuditVerdict {
    /// No flaws found — the draft stands as the final answer
    Approved,
    /// Flaws found — the chairman must reconcile draft and critique
    Flawed,
}

impl AuditVerdict {
    pub fn is_approved(&self) -> bool {
        matches!(self, AuditVerdict::Approved)
    }
}

/// Leading tag the opponent response must carry
pub const VERDICT_TAG: &str = "VERDICT:";

/// First lines accepted as an approval without the tag. The audit prompt
/// demands the tag, but a bare no-flaws reply is unambiguous on its own
/// and still counts as an approval.
const BARE_APPROVALS: [&str; 2] = ["NO FLAWS FOUND", "NO CRITICAL FLAWS FOUND"];

/// Parse the verdict from an opponent response.
///
/// Looks at the first non-empty line only. Returns `None` when no tag
/// or recognized approval phrase is present — callers surface that as a
/// malformed response rather than guessing.
pub fn parse_audit_verdict(response: &str) -> Option<AuditVerdict> {
    let first_line = response.lines().find(|l| !l.trim().is_empty())?;
    let normalized = first_line.trim().to_uppercase();

    if let Some(value) = normalized.strip_prefix(VERDICT_TAG) {
        return match value.trim() {
            "APPROVED" | "NO FLAWS FOUND" => Some(AuditVerdict::Approved),
            "FLAWED" | "FLAWS FOUND" => Some(AuditVerdict::Flawed),
            _ => None,
        };
    }

    if BARE_APPROVALS.contains(&normalized.trim_end_matches('.')) {
        return Some(AuditVerdict::Approved);
    }

    None
}

fn is_verdict_line(line: &str) -> bool {
    line.trim().to_uppercase().starts_with(VERDICT_TAG)
}

/// Strip the verdict line from an opponent response, leaving the critique.
pub fn critique_body(response: &str) -> &str {
    match response.split_once('\n') {
        Some((first, rest)) if is_verdict_line(first) => rest.trim_start_matches(['\r', '\n']),
        None if is_verdict_line(response) => "",
        _ => response,
    }
}
