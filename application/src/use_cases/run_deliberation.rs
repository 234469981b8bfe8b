//! Run Deliberation use case
//!
//! The Deliberation Engine: executes the Classic or Debate protocol over
//! provider clients for one query and assembles the outcome plus transcript.
//!
//! Classic fans member calls out concurrently and joins them at a single
//! barrier before synthesis. Debate is strictly sequential because each
//! step's prompt depends on the previous step's output.

use crate::config::params::DeliberationParams;
use crate::ports::progress::{NoProgress, ProgressNotifier};
use crate::ports::provider::{CompletionRequest, CouncilGateway, ProviderError};
use council_domain::{
    AuditVerdict, CouncilRole, DeliberationOutcome, Model, Phase, PromptTemplate, Query,
    RoleAssignment, RoundResult, Transcript, Turn, critique_body, parse_audit_verdict,
};
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use tokio::task::JoinSet;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

/// Errors that can terminate a deliberation without a final answer
#[derive(Error, Debug)]
pub enum RunDeliberationError {
    /// Bad role assignment — raised before any provider call
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),

    /// No viable path to a final answer remained. The partial transcript
    /// is kept so the caller can display what was attempted.
    #[error("Deliberation failed: {reason}")]
    DeliberationFailed {
        reason: String,
        transcript: Transcript,
    },

    /// The run was aborted by the caller
    #[error("Deliberation cancelled")]
    Cancelled,
}

/// Input for the RunDeliberation use case
#[derive(Debug, Clone)]
pub struct RunDeliberationInput {
    /// The query to deliberate on
    pub query: Query,
    /// Role-to-model assignment; also fixes the protocol
    pub assignment: RoleAssignment,
    /// Conversation snapshot, taken once before any call
    pub context: Vec<Turn>,
    /// Timeout and sampling passthrough
    pub params: DeliberationParams,
    /// Caller-controlled abort switch for the whole run
    pub cancel: CancellationToken,
}

impl RunDeliberationInput {
    pub fn new(query: impl Into<Query>, assignment: RoleAssignment) -> Self {
        Self {
            query: query.into(),
            assignment,
            context: Vec::new(),
            params: DeliberationParams::default(),
            cancel: CancellationToken::new(),
        }
    }

    pub fn with_context(mut self, context: Vec<Turn>) -> Self {
        self.context = context;
        self
    }

    pub fn with_params(mut self, params: DeliberationParams) -> Self {
        self.params = params;
        self
    }

    pub fn with_cancellation(mut self, cancel: CancellationToken) -> Self {
        self.cancel = cancel;
        self
    }
}

/// Use case for running one council deliberation
pub struct RunDeliberationUseCase<G: CouncilGateway + 'static> {
    gateway: Arc<G>,
}

impl<G: CouncilGateway + 'static> RunDeliberationUseCase<G> {
    pub fn new(gateway: Arc<G>) -> Self {
        Self { gateway }
    }

    /// Execute the use case with default (no-op) progress
    pub async fn execute(
        &self,
        input: RunDeliberationInput,
    ) -> Result<DeliberationOutcome, RunDeliberationError> {
        self.execute_with_progress(input, &NoProgress).await
    }

    /// Execute the use case with progress callbacks
    pub async fn execute_with_progress(
        &self,
        input: RunDeliberationInput,
        progress: &dyn ProgressNotifier,
    ) -> Result<DeliberationOutcome, RunDeliberationError> {
        input
            .assignment
            .validate()
            .map_err(|e| RunDeliberationError::InvalidConfiguration(e.to_string()))?;

        info!("Starting {} deliberation", input.assignment.mode());

        match input.assignment.clone() {
            RoleAssignment::Classic { members, chairman } => {
                self.run_classic(&input, members, chairman, progress).await
            }
            RoleAssignment::Debate {
                proponent,
                opponent,
                chairman,
            } => {
                self.run_debate(&input, proponent, opponent, chairman, progress)
                    .await
            }
        }
    }

    // ==================== Classic protocol ====================

    async fn run_classic(
        &self,
        input: &RunDeliberationInput,
        members: Vec<Model>,
        chairman: Model,
        progress: &dyn ProgressNotifier,
    ) -> Result<DeliberationOutcome, RunDeliberationError> {
        let mut transcript = Transcript::new();

        // Gathering: one independent call per member, joined at a single
        // barrier. Results are indexed so the transcript order matches the
        // assignment order regardless of completion order.
        info!("Gathering opinions from {} members", members.len());
        progress.on_phase_start(&Phase::Gathering, members.len());

        let mut join_set = JoinSet::new();

        for (idx, model) in members.iter().enumerate() {
            let role = CouncilRole::Member(idx + 1);
            let request = Self::build_request(
                input,
                PromptTemplate::member_system(&role.label()),
                PromptTemplate::member_query(input.query.text()),
                role.clone(),
            );
            let gateway = Arc::clone(&self.gateway);
            let model = model.clone();

            join_set.spawn(async move {
                let result = Self::call(gateway.as_ref(), &model, request).await;
                (idx, role, model, result)
            });
        }

        let mut slots: Vec<Option<(CouncilRole, Model, Result<String, ProviderError>)>> =
            (0..members.len()).map(|_| None).collect();

        loop {
            tokio::select! {
                _ = input.cancel.cancelled() => {
                    // In-flight member calls are aborted and their eventual
                    // results discarded, never appended.
                    join_set.abort_all();
                    info!("Deliberation cancelled during gathering");
                    return Err(RunDeliberationError::Cancelled);
                }
                next = join_set.join_next() => match next {
                    None => break,
                    Some(Ok((idx, role, model, result))) => {
                        progress.on_task_complete(&Phase::Gathering, &role, &model, result.is_ok());
                        slots[idx] = Some((role, model, result));
                    }
                    Some(Err(e)) => {
                        warn!("Member task join error: {}", e);
                    }
                },
            }
        }

        for (idx, slot) in slots.into_iter().enumerate() {
            // A seat whose task panicked never reported a result; record
            // it as a failure instead of dropping it from the transcript.
            let Some((role, model, result)) = slot else {
                let role = CouncilRole::Member(idx + 1);
                warn!("{} task aborted before reporting a result", role);
                transcript.append(RoundResult::failure(
                    role,
                    members[idx].clone(),
                    "member task aborted before reporting a result".to_string(),
                ));
                continue;
            };
            match result {
                Ok(output) => {
                    debug!("{} responded successfully", role);
                    transcript.append(RoundResult::success(role, model, output));
                }
                Err(e) => {
                    warn!("{} failed: {}", role, e);
                    transcript.append(RoundResult::failure(role, model, e.to_string()));
                }
            }
        }

        progress.on_phase_complete(&Phase::Gathering);

        if transcript.successful_members().count() == 0 {
            return Err(RunDeliberationError::DeliberationFailed {
                reason: "all council members failed".to_string(),
                transcript,
            });
        }

        // Synthesizing: failed members are noted in the prompt, not
        // silently dropped.
        let opinions: Vec<(String, String)> = transcript
            .successful_members()
            .map(|r| (r.role.label(), r.output.clone()))
            .collect();
        let failed: Vec<(String, String)> = transcript
            .failures()
            .map(|r| (r.role.label(), r.error.clone().unwrap_or_default()))
            .collect();

        info!("Synthesizing from {} opinions", opinions.len());
        progress.on_phase_start(&Phase::Synthesizing, 1);

        let request = Self::build_request(
            input,
            PromptTemplate::chairman_system().to_string(),
            PromptTemplate::chairman_synthesis(input.query.text(), &opinions, &failed),
            CouncilRole::Chairman,
        );
        let result = self.call_sequential(input, &chairman, request).await?;
        progress.on_task_complete(
            &Phase::Synthesizing,
            &CouncilRole::Chairman,
            &chairman,
            result.is_ok(),
        );
        progress.on_phase_complete(&Phase::Synthesizing);

        match result {
            Ok(answer) => {
                transcript.append(RoundResult::success(
                    CouncilRole::Chairman,
                    chairman,
                    answer.clone(),
                ));
                Ok(DeliberationOutcome::new(
                    answer,
                    transcript,
                    input.assignment.mode(),
                    false,
                ))
            }
            Err(e) => {
                warn!("Chairman synthesis failed: {}", e);
                transcript.append(RoundResult::failure(
                    CouncilRole::Chairman,
                    chairman,
                    e.to_string(),
                ));
                Err(RunDeliberationError::DeliberationFailed {
                    reason: format!("chairman synthesis failed: {}", e),
                    transcript,
                })
            }
        }
    }

    // ==================== Debate protocol ====================

    async fn run_debate(
        &self,
        input: &RunDeliberationInput,
        proponent: Model,
        opponent: Model,
        chairman: Model,
        progress: &dyn ProgressNotifier,
    ) -> Result<DeliberationOutcome, RunDeliberationError> {
        let mut transcript = Transcript::new();

        // Proposing
        info!("Proponent drafting answer");
        progress.on_phase_start(&Phase::Proposing, 1);
        let request = Self::build_request(
            input,
            PromptTemplate::proponent_system().to_string(),
            PromptTemplate::proponent_query(input.query.text()),
            CouncilRole::Proponent,
        );
        let result = self.call_sequential(input, &proponent, request).await?;
        progress.on_task_complete(
            &Phase::Proposing,
            &CouncilRole::Proponent,
            &proponent,
            result.is_ok(),
        );
        progress.on_phase_complete(&Phase::Proposing);

        let draft = match result {
            Ok(draft) => {
                transcript.append(RoundResult::success(
                    CouncilRole::Proponent,
                    proponent,
                    draft.clone(),
                ));
                draft
            }
            Err(e) => {
                warn!("Proponent failed: {}", e);
                transcript.append(RoundResult::failure(
                    CouncilRole::Proponent,
                    proponent,
                    e.to_string(),
                ));
                return Err(RunDeliberationError::DeliberationFailed {
                    reason: format!("proponent failed: {}", e),
                    transcript,
                });
            }
        };

        // Auditing. A failed audit must never silently approve an
        // unreviewed answer, so failure means: proceed as if flawed.
        info!("Opponent auditing draft");
        progress.on_phase_start(&Phase::Auditing, 1);
        let request = Self::build_request(
            input,
            PromptTemplate::opponent_system(),
            PromptTemplate::opponent_audit(input.query.text(), &draft),
            CouncilRole::Opponent,
        );
        let result = self.call_sequential(input, &opponent, request).await?;
        progress.on_task_complete(
            &Phase::Auditing,
            &CouncilRole::Opponent,
            &opponent,
            result.is_ok(),
        );
        progress.on_phase_complete(&Phase::Auditing);

        let critique = match result {
            Ok(audit) => {
                let verdict = parse_audit_verdict(&audit);
                transcript.append(RoundResult::success(
                    CouncilRole::Opponent,
                    opponent,
                    audit.clone(),
                ));

                if verdict == Some(AuditVerdict::Approved) {
                    // Short-circuit: the draft stands, the chairman is
                    // never invoked.
                    info!("Audit found no flaws, short-circuiting");
                    return Ok(DeliberationOutcome::new(
                        draft,
                        transcript,
                        input.assignment.mode(),
                        true,
                    ));
                }

                debug!("Audit verdict: {:?}, proceeding to synthesis", verdict);
                critique_body(&audit).to_string()
            }
            Err(e) => {
                warn!("Opponent audit failed, treating as flaws found: {}", e);
                transcript.append(RoundResult::failure(
                    CouncilRole::Opponent,
                    opponent,
                    e.to_string(),
                ));
                format!(
                    "(The logic audit did not complete: {}. No critique is available; \
                     independently verify the draft before finalizing.)",
                    e
                )
            }
        };

        // Synthesizing
        info!("Chairman reconciling draft and critique");
        progress.on_phase_start(&Phase::Synthesizing, 1);
        let request = Self::build_request(
            input,
            PromptTemplate::debate_chairman_system().to_string(),
            PromptTemplate::debate_synthesis(input.query.text(), &draft, &critique),
            CouncilRole::Chairman,
        );
        let result = self.call_sequential(input, &chairman, request).await?;
        progress.on_task_complete(
            &Phase::Synthesizing,
            &CouncilRole::Chairman,
            &chairman,
            result.is_ok(),
        );
        progress.on_phase_complete(&Phase::Synthesizing);

        match result {
            Ok(answer) => {
                transcript.append(RoundResult::success(
                    CouncilRole::Chairman,
                    chairman,
                    answer.clone(),
                ));
                Ok(DeliberationOutcome::new(
                    answer,
                    transcript,
                    input.assignment.mode(),
                    false,
                ))
            }
            Err(e) => {
                warn!("Chairman synthesis failed: {}", e);
                transcript.append(RoundResult::failure(
                    CouncilRole::Chairman,
                    chairman,
                    e.to_string(),
                ));
                Err(RunDeliberationError::DeliberationFailed {
                    reason: format!("chairman synthesis failed: {}", e),
                    transcript,
                })
            }
        }
    }

    // ==================== Call plumbing ====================

    fn build_request(
        input: &RunDeliberationInput,
        system_prompt: String,
        prompt: String,
        role: CouncilRole,
    ) -> CompletionRequest {
        CompletionRequest {
            context: input.context.clone(),
            system_prompt,
            prompt,
            role,
            sampling: input.params.sampling,
            timeout: input.params.call_timeout,
        }
    }

    /// One provider call under the per-call timeout.
    async fn call(
        gateway: &G,
        model: &Model,
        request: CompletionRequest,
    ) -> Result<String, ProviderError> {
        let timeout = request.timeout;
        match tokio::time::timeout(timeout, gateway.complete(model, request)).await {
            Ok(result) => result,
            Err(_) => Err(ProviderError::Timeout),
        }
    }

    /// A sequential protocol step: one call, abortable by the run's
    /// cancellation token. The outer `Err` is cancellation; the inner
    /// `Result` is the provider outcome.
    async fn call_sequential(
        &self,
        input: &RunDeliberationInput,
        model: &Model,
        request: CompletionRequest,
    ) -> Result<Result<String, ProviderError>, RunDeliberationError> {
        tokio::select! {
            _ = input.cancel.cancelled() => {
                info!("Deliberation cancelled");
                Err(RunDeliberationError::Cancelled)
            }
            result = Self::call(self.gateway.as_ref(), model, request) => Ok(result),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::provider::SamplingParams;
    use async_trait::async_trait;
    use council_domain::DeliberationMode;
    use std::collections::HashMap;
    use std::sync::Mutex;

    /// Deterministic stub gateway keyed by model; records every request.
    struct StubGateway {
        responses: HashMap<String, Result<String, ProviderError>>,
        requests: Mutex<Vec<(Model, CompletionRequest)>>,
    }

    impl StubGateway {
        fn new(responses: Vec<(Model, Result<String, ProviderError>)>) -> Arc<Self> {
            Arc::new(Self {
                responses: responses
                    .into_iter()
                    .map(|(m, r)| (m.as_str().to_string(), r))
                    .collect(),
                requests: Mutex::new(Vec::new()),
            })
        }

        fn request_for(&self, role: &CouncilRole) -> Option<CompletionRequest> {
            self.requests
                .lock()
                .unwrap()
                .iter()
                .find(|(_, req)| &req.role == role)
                .map(|(_, req)| req.clone())
        }
    }

    #[async_trait]
    impl CouncilGateway for StubGateway {
        async fn complete(
            &self,
            model: &Model,
            request: CompletionRequest,
        ) -> Result<String, ProviderError> {
            self.requests
                .lock()
                .unwrap()
                .push((model.clone(), request));
            match self.responses.get(model.as_str()) {
                Some(result) => result.clone(),
                None => Err(ProviderError::ProviderUnavailable(format!(
                    "no stub for {}",
                    model
                ))),
            }
        }
    }

    /// Gateway whose calls never return, for timeout and cancel tests.
    struct HangingGateway;

    #[async_trait]
    impl CouncilGateway for HangingGateway {
        async fn complete(
            &self,
            _model: &Model,
            _request: CompletionRequest,
        ) -> Result<String, ProviderError> {
            tokio::time::sleep(Duration::from_secs(3600)).await;
            unreachable!("call should have been timed out or cancelled")
        }
    }

    fn classic_assignment() -> RoleAssignment {
        RoleAssignment::classic(vec![Model::Gpt4o, Model::Claude35Sonnet], Model::Claude3Opus)
    }

    fn debate_assignment() -> RoleAssignment {
        RoleAssignment::debate(Model::Gpt4o, Model::Claude35Sonnet, Model::Claude3Opus)
    }

    // -- Classic ----------------------------------------------------------

    #[tokio::test]
    async fn classic_two_members_and_chairman() {
        let gateway = StubGateway::new(vec![
            (Model::Gpt4o, Ok("Paris is the capital.".to_string())),
            (
                Model::Claude35Sonnet,
                Ok("The capital is Paris.".to_string()),
            ),
            (Model::Claude3Opus, Ok("Paris.".to_string())),
        ]);
        let use_case = RunDeliberationUseCase::new(Arc::clone(&gateway));

        let outcome = use_case
            .execute(RunDeliberationInput::new(
                "What is the capital of France?",
                classic_assignment(),
            ))
            .await
            .unwrap();

        assert_eq!(outcome.transcript.len(), 3);
        assert_eq!(outcome.final_answer, "Paris.");
        assert!(!outcome.short_circuited);
        assert_eq!(outcome.mode, DeliberationMode::Classic);

        // Chairman entry is last and non-empty, members come first in
        // assignment order.
        let entries = outcome.transcript.entries();
        assert_eq!(entries[0].role, CouncilRole::Member(1));
        assert_eq!(entries[1].role, CouncilRole::Member(2));
        assert!(entries[2].role.is_chairman());
        assert!(!entries[2].output.is_empty());

        // Both member opinions reached the synthesis prompt
        let chairman_req = gateway.request_for(&CouncilRole::Chairman).unwrap();
        assert!(chairman_req.prompt.contains("Paris is the capital."));
        assert!(chairman_req.prompt.contains("The capital is Paris."));
    }

    #[tokio::test]
    async fn classic_all_members_failed_skips_chairman() {
        let gateway = StubGateway::new(vec![
            (
                Model::Gpt4o,
                Err(ProviderError::ProviderUnavailable("down".to_string())),
            ),
            (
                Model::Claude35Sonnet,
                Err(ProviderError::RateLimited("429".to_string())),
            ),
        ]);
        let use_case = RunDeliberationUseCase::new(Arc::clone(&gateway));

        let err = use_case
            .execute(RunDeliberationInput::new("Q", classic_assignment()))
            .await
            .unwrap_err();

        match err {
            RunDeliberationError::DeliberationFailed { transcript, .. } => {
                // Transcript left as evidence: both failures, no chairman
                assert_eq!(transcript.len(), 2);
                assert_eq!(transcript.failures().count(), 2);
                assert!(transcript.chairman().is_none());
            }
            other => panic!("expected DeliberationFailed, got {:?}", other),
        }
        assert!(gateway.request_for(&CouncilRole::Chairman).is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn classic_member_timeout_recorded_and_synthesis_continues() {
        // Member 1 hangs past the per-call timeout; member 2 succeeds.
        struct MixedGateway {
            inner: Arc<StubGateway>,
        }

        #[async_trait]
        impl CouncilGateway for MixedGateway {
            async fn complete(
                &self,
                model: &Model,
                request: CompletionRequest,
            ) -> Result<String, ProviderError> {
                if model == &Model::Gpt4o {
                    tokio::time::sleep(Duration::from_secs(3600)).await;
                }
                self.inner.complete(model, request).await
            }
        }

        let inner = StubGateway::new(vec![
            (
                Model::Claude35Sonnet,
                Ok("B's well-reasoned answer".to_string()),
            ),
            (Model::Claude3Opus, Ok("Synthesis from B".to_string())),
        ]);
        let use_case = RunDeliberationUseCase::new(Arc::new(MixedGateway {
            inner: Arc::clone(&inner),
        }));

        let outcome = use_case
            .execute(
                RunDeliberationInput::new("Q", classic_assignment()).with_params(
                    DeliberationParams::default().with_call_timeout(Duration::from_secs(5)),
                ),
            )
            .await
            .unwrap();

        let entries = outcome.transcript.entries();
        assert_eq!(entries.len(), 3);
        assert_eq!(entries[0].role, CouncilRole::Member(1));
        assert!(!entries[0].success);
        assert_eq!(entries[0].error.as_deref(), Some("Request timed out"));
        assert!(entries[1].success);
        assert!(entries[2].role.is_chairman());

        // Synthesis prompt carries B's output and notes A's absence
        let chairman_req = inner.request_for(&CouncilRole::Chairman).unwrap();
        assert!(chairman_req.prompt.contains("B's well-reasoned answer"));
        assert!(chairman_req.prompt.contains("Council Member 1 did not respond"));
    }

    #[tokio::test]
    async fn classic_panicked_member_recorded_as_failure() {
        // A member task that panics must still leave a transcript entry
        // for its seat.
        struct PanickyGateway {
            inner: Arc<StubGateway>,
        }

        #[async_trait]
        impl CouncilGateway for PanickyGateway {
            async fn complete(
                &self,
                model: &Model,
                request: CompletionRequest,
            ) -> Result<String, ProviderError> {
                if model == &Model::Gpt4o {
                    panic!("stub blew up");
                }
                self.inner.complete(model, request).await
            }
        }

        let inner = StubGateway::new(vec![
            (Model::Claude35Sonnet, Ok("B's answer".to_string())),
            (Model::Claude3Opus, Ok("Synthesis from B".to_string())),
        ]);
        let use_case = RunDeliberationUseCase::new(Arc::new(PanickyGateway {
            inner: Arc::clone(&inner),
        }));

        let outcome = use_case
            .execute(RunDeliberationInput::new("Q", classic_assignment()))
            .await
            .unwrap();

        let entries = outcome.transcript.entries();
        assert_eq!(entries.len(), 3);
        assert_eq!(entries[0].role, CouncilRole::Member(1));
        assert!(!entries[0].success);
        assert_eq!(
            entries[0].error.as_deref(),
            Some("member task aborted before reporting a result")
        );
        assert!(entries[1].success);
        assert!(entries[2].role.is_chairman());

        let chairman_req = inner.request_for(&CouncilRole::Chairman).unwrap();
        assert!(chairman_req.prompt.contains("Council Member 1 did not respond"));
    }

    #[tokio::test]
    async fn classic_chairman_failure_is_deliberation_failed() {
        let gateway = StubGateway::new(vec![
            (Model::Gpt4o, Ok("opinion 1".to_string())),
            (Model::Claude35Sonnet, Ok("opinion 2".to_string())),
            (
                Model::Claude3Opus,
                Err(ProviderError::AuthError("bad key".to_string())),
            ),
        ]);
        let use_case = RunDeliberationUseCase::new(gateway);

        let err = use_case
            .execute(RunDeliberationInput::new("Q", classic_assignment()))
            .await
            .unwrap_err();

        match err {
            RunDeliberationError::DeliberationFailed { transcript, .. } => {
                assert_eq!(transcript.len(), 3);
                assert!(!transcript.last().unwrap().success);
            }
            other => panic!("expected DeliberationFailed, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn invalid_configuration_issues_no_calls() {
        let gateway = StubGateway::new(vec![]);
        let use_case = RunDeliberationUseCase::new(Arc::clone(&gateway));

        let assignment = RoleAssignment::classic(vec![Model::Gpt4o], Model::Claude3Opus);
        let err = use_case
            .execute(RunDeliberationInput::new("Q", assignment))
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            RunDeliberationError::InvalidConfiguration(_)
        ));
        assert!(gateway.requests.lock().unwrap().is_empty());
    }

    // -- Debate -----------------------------------------------------------

    #[tokio::test]
    async fn debate_short_circuits_on_approved_verdict() {
        let gateway = StubGateway::new(vec![
            (Model::Gpt4o, Ok("The answer is 42.".to_string())),
            (
                Model::Claude35Sonnet,
                Ok("VERDICT: APPROVED\nNo flaws found.".to_string()),
            ),
        ]);
        let use_case = RunDeliberationUseCase::new(Arc::clone(&gateway));

        let outcome = use_case
            .execute(RunDeliberationInput::new("Q", debate_assignment()))
            .await
            .unwrap();

        // Final answer is the draft verbatim, chairman never invoked
        assert_eq!(outcome.final_answer, "The answer is 42.");
        assert!(outcome.short_circuited);
        assert_eq!(outcome.transcript.len(), 2);
        assert!(outcome.transcript.chairman().is_none());
        assert!(gateway.request_for(&CouncilRole::Chairman).is_none());
    }

    #[tokio::test]
    async fn debate_short_circuits_on_bare_no_flaws_reply() {
        // An untagged reply that is exactly the no-flaws phrase still
        // counts as an approval.
        let gateway = StubGateway::new(vec![
            (Model::Gpt4o, Ok("The answer is 42.".to_string())),
            (Model::Claude35Sonnet, Ok("No flaws found.".to_string())),
        ]);
        let use_case = RunDeliberationUseCase::new(Arc::clone(&gateway));

        let outcome = use_case
            .execute(RunDeliberationInput::new("Q", debate_assignment()))
            .await
            .unwrap();

        assert_eq!(outcome.final_answer, "The answer is 42.");
        assert!(outcome.short_circuited);
        assert_eq!(outcome.transcript.len(), 2);
        assert!(gateway.request_for(&CouncilRole::Chairman).is_none());
    }

    #[tokio::test]
    async fn debate_flawed_verdict_invokes_chairman() {
        let gateway = StubGateway::new(vec![
            (Model::Gpt4o, Ok("X causes Y.".to_string())),
            (
                Model::Claude35Sonnet,
                Ok("VERDICT: FLAWED\nFlaw: reversed causality.".to_string()),
            ),
            (Model::Claude3Opus, Ok("Y causes X, actually.".to_string())),
        ]);
        let use_case = RunDeliberationUseCase::new(Arc::clone(&gateway));

        let outcome = use_case
            .execute(RunDeliberationInput::new("Q", debate_assignment()))
            .await
            .unwrap();

        assert_eq!(outcome.transcript.len(), 3);
        assert!(!outcome.short_circuited);
        let entries = outcome.transcript.entries();
        assert_eq!(entries[1].role, CouncilRole::Opponent);
        assert!(entries[2].role.is_chairman());

        // Chairman saw the critique without the verdict line
        let chairman_req = gateway.request_for(&CouncilRole::Chairman).unwrap();
        assert!(chairman_req.prompt.contains("Flaw: reversed causality."));
        assert!(chairman_req.prompt.contains("X causes Y."));
    }

    #[tokio::test]
    async fn debate_missing_verdict_does_not_short_circuit() {
        // No explicit verdict tag: conservative path, chairman runs.
        let gateway = StubGateway::new(vec![
            (Model::Gpt4o, Ok("Draft.".to_string())),
            (Model::Claude35Sonnet, Ok("Looks fine to me!".to_string())),
            (Model::Claude3Opus, Ok("Final.".to_string())),
        ]);
        let use_case = RunDeliberationUseCase::new(gateway);

        let outcome = use_case
            .execute(RunDeliberationInput::new("Q", debate_assignment()))
            .await
            .unwrap();

        assert!(!outcome.short_circuited);
        assert!(outcome.transcript.chairman().is_some());
    }

    #[tokio::test]
    async fn debate_opponent_failure_proceeds_conservatively() {
        let gateway = StubGateway::new(vec![
            (Model::Gpt4o, Ok("Draft.".to_string())),
            (
                Model::Claude35Sonnet,
                Err(ProviderError::MalformedResponse("no verdict tag".to_string())),
            ),
            (Model::Claude3Opus, Ok("Final.".to_string())),
        ]);
        let use_case = RunDeliberationUseCase::new(Arc::clone(&gateway));

        let outcome = use_case
            .execute(RunDeliberationInput::new("Q", debate_assignment()))
            .await
            .unwrap();

        // Failed audit never silently approves: chairman ran
        assert!(!outcome.short_circuited);
        assert_eq!(outcome.transcript.len(), 3);
        assert!(!outcome.transcript.entries()[1].success);

        let chairman_req = gateway.request_for(&CouncilRole::Chairman).unwrap();
        assert!(chairman_req.prompt.contains("logic audit did not complete"));
    }

    #[tokio::test]
    async fn debate_proponent_failure_terminates_immediately() {
        let gateway = StubGateway::new(vec![(
            Model::Gpt4o,
            Err(ProviderError::ProviderUnavailable("down".to_string())),
        )]);
        let use_case = RunDeliberationUseCase::new(Arc::clone(&gateway));

        let err = use_case
            .execute(RunDeliberationInput::new("Q", debate_assignment()))
            .await
            .unwrap_err();

        match err {
            RunDeliberationError::DeliberationFailed { transcript, .. } => {
                assert_eq!(transcript.len(), 1);
                assert!(!transcript.entries()[0].success);
            }
            other => panic!("expected DeliberationFailed, got {:?}", other),
        }
        // Neither opponent nor chairman was called
        assert_eq!(gateway.requests.lock().unwrap().len(), 1);
    }

    // -- Cross-cutting ----------------------------------------------------

    #[tokio::test]
    async fn identical_inputs_produce_identical_outcomes() {
        let responses = vec![
            (Model::Gpt4o, Ok("opinion 1".to_string())),
            (Model::Claude35Sonnet, Ok("opinion 2".to_string())),
            (Model::Claude3Opus, Ok("synthesis".to_string())),
        ];
        let context = vec![Turn::user("earlier"), Turn::assistant("turns")];

        let mut outcomes = Vec::new();
        for _ in 0..2 {
            let use_case = RunDeliberationUseCase::new(StubGateway::new(responses.clone()));
            let outcome = use_case
                .execute(
                    RunDeliberationInput::new("Q", classic_assignment())
                        .with_context(context.clone()),
                )
                .await
                .unwrap();
            outcomes.push(serde_json::to_string(&outcome).unwrap());
        }
        assert_eq!(outcomes[0], outcomes[1]);
    }

    #[tokio::test(start_paused = true)]
    async fn cancellation_aborts_gathering_without_appending() {
        let cancel = CancellationToken::new();
        let use_case = RunDeliberationUseCase::new(Arc::new(HangingGateway));

        let token = cancel.clone();
        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_millis(50)).await;
            token.cancel();
        });

        let err = use_case
            .execute(
                RunDeliberationInput::new("Q", classic_assignment()).with_cancellation(cancel),
            )
            .await
            .unwrap_err();

        assert!(matches!(err, RunDeliberationError::Cancelled));
    }

    #[tokio::test(start_paused = true)]
    async fn cancellation_aborts_sequential_debate_step() {
        let cancel = CancellationToken::new();
        let use_case = RunDeliberationUseCase::new(Arc::new(HangingGateway));

        let token = cancel.clone();
        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_millis(50)).await;
            token.cancel();
        });

        let err = use_case
            .execute(RunDeliberationInput::new("Q", debate_assignment()).with_cancellation(cancel))
            .await
            .unwrap_err();

        assert!(matches!(err, RunDeliberationError::Cancelled));
    }

    #[tokio::test]
    async fn context_snapshot_reaches_every_call_unchanged() {
        let gateway = StubGateway::new(vec![
            (Model::Gpt4o, Ok("a".to_string())),
            (Model::Claude35Sonnet, Ok("b".to_string())),
            (Model::Claude3Opus, Ok("c".to_string())),
        ]);
        let use_case = RunDeliberationUseCase::new(Arc::clone(&gateway));
        let context = vec![Turn::user("history")];

        use_case
            .execute(
                RunDeliberationInput::new("Q", classic_assignment())
                    .with_context(context.clone()),
            )
            .await
            .unwrap();

        let requests = gateway.requests.lock().unwrap();
        assert_eq!(requests.len(), 3);
        for (_, req) in requests.iter() {
            assert_eq!(req.context, context);
        }
    }

    #[tokio::test]
    async fn sampling_params_pass_through_unchanged() {
        let gateway = StubGateway::new(vec![
            (Model::Gpt4o, Ok("draft".to_string())),
            (
                Model::Claude35Sonnet,
                Ok("VERDICT: APPROVED".to_string()),
            ),
        ]);
        let use_case = RunDeliberationUseCase::new(Arc::clone(&gateway));

        let sampling = SamplingParams::speed_optimized();
        use_case
            .execute(
                RunDeliberationInput::new("Q", debate_assignment())
                    .with_params(DeliberationParams::default().with_sampling(sampling)),
            )
            .await
            .unwrap();

        let requests = gateway.requests.lock().unwrap();
        for (_, req) in requests.iter() {
            assert_eq!(req.sampling, sampling);
        }
    }
}
