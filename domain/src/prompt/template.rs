//! Prompt templates for the council roles
//!
//! These are the generic role prompts — per-provider prompt engineering is
//! out of scope, so every provider receives the same text for a given role.

use crate::council::verdict::VERDICT_TAG;

/// Templates for generating prompts at each protocol step
pub struct PromptTemplate;

impl PromptTemplate {
    /// System prompt for a Classic-mode member
    pub fn member_system(role_label: &str) -> String {
        format!(
            "You are a member of an LLM Council. Your role is {}. \
             Provide a detailed and unique perspective on the user's query. \
             Focus on accuracy, and support your points with reasoning.",
            role_label
        )
    }

    /// User prompt for a Classic-mode member — identical for every member
    pub fn member_query(query: &str) -> String {
        format!(
            r#"Please answer the following query:

{}

Provide a clear, well-structured response."#,
            query
        )
    }

    /// System prompt for the Classic chairman
    pub fn chairman_system() -> &'static str {
        "You are the Chairman of an LLM Council. \
         Synthesize the best parts of the council members' opinions into a single, \
         high-quality, refined response for the user. Critically evaluate the input \
         opinions, resolve contradictions, and provide the most accurate and helpful \
         answer. Do not attribute points to individual members unless attribution is \
         necessary for clarity."
    }

    /// User prompt for Classic synthesis.
    ///
    /// Failed members are named with an explicit note rather than silently
    /// omitted, so the chairman knows the opinion set is partial.
    pub fn chairman_synthesis(
        query: &str,
        opinions: &[(String, String)],
        failed: &[(String, String)],
    ) -> String {
        let mut prompt = format!("User Query: {}\n\nCouncil Opinions:\n", query);

        for (label, content) in opinions {
            prompt.push_str(&format!("\n--- Opinion from {} ---\n{}\n", label, content));
        }

        for (label, error) in failed {
            prompt.push_str(&format!(
                "\n--- {} did not respond (error: {}) — synthesize without this opinion ---\n",
                label, error
            ));
        }

        prompt.push_str("\nChairman, please provide your synthesized response:");
        prompt
    }

    /// System prompt for the Debate proponent
    pub fn proponent_system() -> &'static str {
        "You are a highly capable AI assistant. Provide a comprehensive, accurate, \
         and well-reasoned response to the user's query. Be thorough and consider \
         multiple perspectives."
    }

    /// User prompt for the Debate proponent
    pub fn proponent_query(query: &str) -> String {
        query.to_string()
    }

    /// System prompt for the Debate opponent (logic auditor).
    ///
    /// Forces the explicit verdict token the short-circuit decision keys on.
    pub fn opponent_system() -> String {
        format!(
            "You are a Senior Logic Auditor. Your job is to find logic gaps, factual \
             errors, missing edge cases, or weak reasoning in the provided response. \
             You are FORBIDDEN from being nice. Be critical and thorough.\n\
             The very first line of your reply MUST be exactly '{tag} APPROVED' if the \
             response is accurate and complete with no significant flaws, or \
             '{tag} FLAWED' otherwise. After a FLAWED verdict, provide specific, \
             actionable critique pointing out exactly what is wrong or missing.",
            tag = VERDICT_TAG
        )
    }

    /// User prompt for the Debate logic audit
    pub fn opponent_audit(query: &str, draft: &str) -> String {
        format!(
            r#"Original User Query: {}

Response to Audit:
{}

Audit this response for accuracy, completeness, and logical soundness.
Remember: your first line must be the verdict."#,
            query, draft
        )
    }

    /// System prompt for the Debate chairman
    pub fn debate_chairman_system() -> &'static str {
        "You are the Chairman of an LLM Council. Review the draft response and the \
         feedback from the Logic Auditor. Incorporate valid corrections and \
         improvements while ignoring irrelevant nitpicks. Output the final answer \
         that addresses the user's query accurately and completely."
    }

    /// User prompt for Debate synthesis
    pub fn debate_synthesis(query: &str, draft: &str, critique: &str) -> String {
        format!(
            r#"User Query: {}

Draft Response:
{}

Logic Auditor Feedback:
{}

Chairman, please provide your final synthesized response:"#,
            query, draft, critique
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_member_prompts_are_identical_across_seats() {
        let a = PromptTemplate::member_query("What is Rust?");
        let b = PromptTemplate::member_query("What is Rust?");
        assert_eq!(a, b);
        assert!(a.contains("What is Rust?"));
    }

    #[test]
    fn test_member_system_names_role() {
        let system = PromptTemplate::member_system("Council Member 2");
        assert!(system.contains("Council Member 2"));
    }

    #[test]
    fn test_synthesis_includes_opinions_and_failures() {
        let opinions = vec![(
            "Council Member 1".to_string(),
            "Paris is the capital.".to_string(),
        )];
        let failed = vec![("Council Member 2".to_string(), "request timed out".to_string())];
        let prompt = PromptTemplate::chairman_synthesis("Capital of France?", &opinions, &failed);

        assert!(prompt.contains("Paris is the capital."));
        assert!(prompt.contains("Council Member 2 did not respond"));
        assert!(prompt.contains("request timed out"));
    }

    #[test]
    fn test_opponent_system_demands_verdict_tag() {
        let system = PromptTemplate::opponent_system();
        assert!(system.contains("VERDICT: APPROVED"));
        assert!(system.contains("VERDICT: FLAWED"));
    }

    #[test]
    fn test_debate_synthesis_contains_draft_and_critique() {
        let prompt = PromptTemplate::debate_synthesis("Q", "the draft", "the critique");
        assert!(prompt.contains("the draft"));
        assert!(prompt.contains("the critique"));
    }
}
