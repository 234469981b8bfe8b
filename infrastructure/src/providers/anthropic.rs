//! Anthropic messages-API adapter.
//!
//! Unlike the OpenAI shape, the system prompt is a top-level parameter and
//! `max_tokens` is mandatory.

use super::{ProviderAdapter, ProviderKind, map_status_error, map_transport_error,
    validate_role_response};
use async_trait::async_trait;
use council_application::ports::provider::{CompletionRequest, ProviderError};
use council_domain::Model;
use serde_json::json;

const ANTHROPIC_BASE_URL: &str = "https://api.anthropic.com/v1";
const ANTHROPIC_VERSION: &str = "2023-06-01";
const DEFAULT_MAX_TOKENS: u32 = 1024;

/// Adapter for the Anthropic messages API
pub struct AnthropicAdapter {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl AnthropicAdapter {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: ANTHROPIC_BASE_URL.to_string(),
            api_key: api_key.into(),
        }
    }
}

#[async_trait]
impl ProviderAdapter for AnthropicAdapter {
    fn kind(&self) -> ProviderKind {
        ProviderKind::Anthropic
    }

    async fn complete(
        &self,
        model: &Model,
        request: &CompletionRequest,
    ) -> Result<String, ProviderError> {
        let mut messages = Vec::new();
        for turn in &request.context {
            messages.push(json!({"role": turn.role.as_str(), "content": turn.text}));
        }
        messages.push(json!({"role": "user", "content": request.prompt}));

        let mut body = json!({
            "model": model.as_str(),
            "max_tokens": request.sampling.max_output_tokens.unwrap_or(DEFAULT_MAX_TOKENS),
            "system": request.system_prompt,
            "messages": messages,
        });
        if let Some(temp) = request.sampling.temperature {
            body["temperature"] = json!(temp);
        }

        let response = self
            .client
            .post(format!("{}/messages", self.base_url))
            .header("x-api-key", &self.api_key)
            .header("anthropic-version", ANTHROPIC_VERSION)
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
        let text = payload["content"][0]["text"]
            .as_str()
            .ok_or_else(|| {
                ProviderError::MalformedResponse("missing content[0].text".to_string())
            })?
            .to_string();

        validate_role_response(&request.role, text)
    }
}
