//! OpenAI chat-completions adapter, also used for OpenRouter.

use super::{ProviderAdapter, ProviderKind, map_status_error, map_transport_error,
    validate_role_response};
use async_trait::async_trait;
use council_application::ports::provider::{CompletionRequest, ProviderError};
use council_domain::Model;
use serde_json::json;

const OPENAI_BASE_URL: &str = "https://api.openai.com/v1";
const OPENROUTER_BASE_URL: &str = "https://openrouter.ai/api/v1";

/// Adapter for any OpenAI-compatible chat-completions endpoint
pub struct OpenAiAdapter {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
    kind: ProviderKind,
}

impl OpenAiAdapter {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: OPENAI_BASE_URL.to_string(),
            api_key: api_key.into(),
            kind: ProviderKind::OpenAi,
        }
    }

    /// OpenRouter speaks the same protocol behind a different base URL.
    pub fn openrouter(api_key: impl Into<String>) -> Self {
        Self {
            base_url: OPENROUTER_BASE_URL.to_string(),
            kind: ProviderKind::OpenRouter,
            ..Self::new(api_key)
        }
    }
}

#[async_trait]
impl ProviderAdapter for OpenAiAdapter {
    fn kind(&self) -> ProviderKind {
        self.kind
    }

    async fn complete(
        &self,
        model: &Model,
        request: &CompletionRequest,
    ) -> Result<String, ProviderError> {
        let mut messages = vec![json!({"role": "system", "content": request.system_prompt})];
        for turn in &request.context {
            messages.push(json!({"role": turn.role.as_str(), "content": turn.text}));
        }
        messages.push(json!({"role": "user", "content": request.prompt}));

        let mut body = json!({"model": model.as_str(), "messages": messages});
        if let Some(max) = request.sampling.max_output_tokens {
            body["max_tokens"] = json!(max);
        }
        if let Some(temp) = request.sampling.temperature {
            body["temperature"] = json!(temp);
        }

        let response = self
            .client
            .post(format!("{}/chat/completions", self.base_url))
            .bearer_auth(&self.api_key)
            .timeout(request.timeout)
            .json(&body)
            .send()
            .await
            .map_err(map_transport_error)?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(map_status_error(status, body));
        }

        let payload: serde_json::Value =
            response.json().await.map_err(map_transport_error)?;
        let text = payload["choices"][0]["message"]["content"]
            .as_str()
            .ok_or_else(|| {
                ProviderError::MalformedResponse("missing choices[0].message.content".to_string())
            })?
            .to_string();

        validate_role_response(&request.role, text)
    }
}
