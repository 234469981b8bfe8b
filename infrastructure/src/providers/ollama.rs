//! Local Ollama adapter.

use super::{ProviderAdapter, ProviderKind, map_status_error, map_transport_error,
    validate_role_response};
use async_trait::async_trait;
use council_application::ports::provider::{CompletionRequest, ProviderError};
use council_domain::Model;
use serde_json::json;

const OLLAMA_BASE_URL: &str = "http://localhost:11434";

/// Adapter for a local Ollama server
pub struct OllamaAdapter {
    client: reqwest::Client,
    base_url: String,
}

impl OllamaAdapter {
    pub fn new() -> Self {
        Self::with_base_url(OLLAMA_BASE_URL)
    }

    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.into(),
        }
    }
}

impl Default for OllamaAdapter {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ProviderAdapter for OllamaAdapter {
    fn kind(&self) -> ProviderKind {
        ProviderKind::Ollama
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

        let mut options = serde_json::Map::new();
        if let Some(ctx) = request.sampling.context_window {
            options.insert("num_ctx".to_string(), json!(ctx));
        }
        if let Some(max) = request.sampling.max_output_tokens {
            options.insert("num_predict".to_string(), json!(max));
        }
        if let Some(temp) = request.sampling.temperature {
            options.insert("temperature".to_string(), json!(temp));
        }

        let body = json!({
            "model": model.as_str(),
            "messages": messages,
            "stream": false,
            "options": options,
        });

        let response = self
            .client
            .post(format!("{}/api/chat", self.base_url))
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
        let text = payload["message"]["content"]
            .as_str()
            .ok_or_else(|| {
                ProviderError::MalformedResponse("missing message.content".to_string())
            })?
            .to_string();

        validate_role_response(&request.role, text)
    }
}
