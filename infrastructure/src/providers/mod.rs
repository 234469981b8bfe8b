//! Provider adapters
//!
//! Thin HTTP clients implementing the provider contract for each backend,
//! plus the [`RoutingGateway`] that picks an adapter per model. Adapters
//! translate wire formats and HTTP failures into [`ProviderError`]; they
//! also enforce the opponent response-format contract so the engine never
//! has to guess at a verdict.

pub mod anthropic;
pub mod ollama;
pub mod openai;
pub mod routing;

pub use anthropic::AnthropicAdapter;
pub use ollama::OllamaAdapter;
pub use openai::OpenAiAdapter;
pub use routing::RoutingGateway;

use async_trait::async_trait;
use council_application::ports::provider::{CompletionRequest, ProviderError};
use council_domain::{CouncilRole, Model, parse_audit_verdict};

/// Backend family an adapter talks to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ProviderKind {
    #[default]
    Ollama,
    OpenAi,
    Anthropic,
    OpenRouter,
}

impl ProviderKind {
    pub fn as_str(&self) -> &str {
        match self {
            ProviderKind::Ollama => "ollama",
            ProviderKind::OpenAi => "openai",
            ProviderKind::Anthropic => "anthropic",
            ProviderKind::OpenRouter => "openrouter",
        }
    }
}

impl std::str::FromStr for ProviderKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ollama" => Ok(ProviderKind::Ollama),
            "openai" => Ok(ProviderKind::OpenAi),
            "anthropic" => Ok(ProviderKind::Anthropic),
            "openrouter" => Ok(ProviderKind::OpenRouter),
            other => Err(format!("unknown provider kind: {}", other)),
        }
    }
}

/// One LLM backend behind the provider contract
#[async_trait]
pub trait ProviderAdapter: Send + Sync {
    fn kind(&self) -> ProviderKind;

    async fn complete(
        &self,
        model: &Model,
        request: &CompletionRequest,
    ) -> Result<String, ProviderError>;
}

/// Enforce the role response-format contract.
///
/// Opponent responses must open with a parsable verdict (the `VERDICT:`
/// tag, or a bare no-flaws first line); anything else is surfaced as
/// `MalformedResponse` rather than interpreted.
pub(crate) fn validate_role_response(
    role: &CouncilRole,
    text: String,
) -> Result<String, ProviderError> {
    if *role == CouncilRole::Opponent && parse_audit_verdict(&text).is_none() {
        return Err(ProviderError::MalformedResponse(
            "opponent response is missing the leading verdict".to_string(),
        ));
    }
    Ok(text)
}

/// Map a reqwest transport failure onto the provider error taxonomy.
pub(crate) fn map_transport_error(e: reqwest::Error) -> ProviderError {
    if e.is_timeout() {
        ProviderError::Timeout
    } else {
        ProviderError::ProviderUnavailable(e.to_string())
    }
}

/// Map a non-success HTTP status onto the provider error taxonomy.
pub(crate) fn map_status_error(status: reqwest::StatusCode, body: String) -> ProviderError {
    match status.as_u16() {
        401 | 403 => ProviderError::AuthError(body),
        429 => ProviderError::RateLimited(body),
        _ => ProviderError::ProviderUnavailable(format!("HTTP {}: {}", status, body)),
    }
}
