//! Infrastructure layer for llm-council
//!
//! This crate contains adapters that implement the ports defined
//! in the application layer, including configuration file loading.

pub mod config;
pub mod logging;
pub mod providers;

// Re-export commonly used types
pub use config::{
    ConfigLoader, ConfigValidationError, FileConfig, FileCouncilConfig, FileOutputConfig,
    FileProvidersConfig, FileReplConfig,
};
pub use logging::JsonlDeliberationLogger;
pub use providers::{
    AnthropicAdapter, OllamaAdapter, OpenAiAdapter, ProviderAdapter, ProviderKind, RoutingGateway,
};
