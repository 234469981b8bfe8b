//! Model-to-provider routing gateway.
//!
//! Resolution order per model:
//! 1. explicit routing table from config (`[providers.routing]`)
//! 2. model family inference (claude → Anthropic, gpt → OpenAI,
//!    local → Ollama)
//! 3. the configured default provider kind
//! 4. the first configured adapter
//!
//! With no adapters at all, every call fails with `ProviderUnavailable`.

use super::{ProviderAdapter, ProviderKind};
use crate::config::FileProvidersConfig;
use async_trait::async_trait;
use council_application::ports::provider::{CompletionRequest, CouncilGateway, ProviderError};
use council_domain::Model;
use std::collections::HashMap;
use std::sync::Arc;

/// Routes each completion call to the adapter behind the model
pub struct RoutingGateway {
    adapters: Vec<Arc<dyn ProviderAdapter>>,
    explicit_model_routing: HashMap<String, usize>,
    default_kind: ProviderKind,
}

impl RoutingGateway {
    pub fn new(adapters: Vec<Arc<dyn ProviderAdapter>>, config: &FileProvidersConfig) -> Self {
        let mut explicit_model_routing = HashMap::new();

        for (model_name, provider_name) in &config.routing {
            let Ok(target_kind) = provider_name.parse::<ProviderKind>() else {
                continue;
            };
            if let Some(idx) = adapters.iter().position(|a| a.kind() == target_kind) {
                explicit_model_routing.insert(model_name.clone(), idx);
            }
        }

        let default_kind = config
            .default
            .as_deref()
            .and_then(|s| s.parse().ok())
            .unwrap_or_default();

        Self {
            adapters,
            explicit_model_routing,
            default_kind,
        }
    }

    fn resolve_adapter(&self, model: &Model) -> Result<&dyn ProviderAdapter, ProviderError> {
        // 1. Explicit routing table
        if let Some(&idx) = self.explicit_model_routing.get(model.as_str()) {
            return Ok(self.adapters[idx].as_ref());
        }

        // 2. Model family inference
        let inferred_kind = if model.is_claude() {
            Some(ProviderKind::Anthropic)
        } else if model.is_gpt() {
            Some(ProviderKind::OpenAi)
        } else if model.is_local() {
            Some(ProviderKind::Ollama)
        } else {
            None
        };
        if let Some(kind) = inferred_kind
            && let Some(a) = self.adapters.iter().find(|a| a.kind() == kind)
        {
            return Ok(a.as_ref());
        }

        // 3. Default provider kind
        if let Some(a) = self.adapters.iter().find(|a| a.kind() == self.default_kind) {
            return Ok(a.as_ref());
        }

        // 4. First adapter fallback
        self.adapters.first().map(|a| a.as_ref()).ok_or_else(|| {
            ProviderError::ProviderUnavailable("no providers configured".to_string())
        })
    }
}

#[async_trait]
impl CouncilGateway for RoutingGateway {
    async fn complete(
        &self,
        model: &Model,
        request: CompletionRequest,
    ) -> Result<String, ProviderError> {
        self.resolve_adapter(model)?.complete(model, &request).await
    }
}
