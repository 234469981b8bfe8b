//! Provider client port
//!
//! Defines the single interface the orchestrator requires from provider
//! adapters: submit a prompt plus conversation context, receive a completion
//! or a typed failure. Implementations live in the infrastructure layer and
//! must not mutate shared state.

use async_trait::async_trait;
use council_domain::{CouncilRole, Model, Turn};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;

/// Failure kinds a provider call can surface to the orchestrator.
///
/// The engine treats all of these uniformly as one participant's failure;
/// the kind only matters for transcripts and logs.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ProviderError {
    #[error("Request timed out")]
    Timeout,

    #[error("Authentication failed: {0}")]
    AuthError(String),

    #[error("Rate limited: {0}")]
    RateLimited(String),

    #[error("Provider unavailable: {0}")]
    ProviderUnavailable(String),

    #[error("Malformed response: {0}")]
    MalformedResponse(String),
}

/// Opaque sampling limits passed through to each provider call.
///
/// Tuning only — these never influence orchestration decisions.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
pub struct SamplingParams {
    /// Context window size hint (Ollama `num_ctx`)
    pub context_window: Option<u32>,
    /// Maximum output length (`num_predict` / `max_tokens`)
    pub max_output_tokens: Option<u32>,
    /// Sampling temperature
    pub temperature: Option<f32>,
}

impl SamplingParams {
    /// Settings tuned for faster local-model responses
    pub fn speed_optimized() -> Self {
        Self {
            context_window: Some(2048),
            max_output_tokens: Some(512),
            temperature: Some(0.7),
        }
    }

    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = Some(temperature);
        self
    }

    pub fn with_max_output_tokens(mut self, tokens: u32) -> Self {
        self.max_output_tokens = Some(tokens);
        self
    }
}

/// One provider invocation: context snapshot, role prompts, tuning.
#[derive(Debug, Clone, PartialEq)]
pub struct CompletionRequest {
    /// Read-only conversation snapshot prepended to the prompt
    pub context: Vec<Turn>,
    /// Role-specific system prompt
    pub system_prompt: String,
    /// The user-facing prompt for this round
    pub prompt: String,
    /// The council role this call is made under
    pub role: CouncilRole,
    /// Opaque sampling passthrough
    pub sampling: SamplingParams,
    /// Per-call timeout, enforced by the engine and honored by adapters
    pub timeout: Duration,
}

/// Gateway for council completions
///
/// Any component implementing this trait is a valid provider client; the
/// engine never branches on which backend sits behind it.
#[async_trait]
pub trait CouncilGateway: Send + Sync {
    /// Submit one completion call for the given model.
    async fn complete(
        &self,
        model: &Model,
        request: CompletionRequest,
    ) -> Result<String, ProviderError>;
}
