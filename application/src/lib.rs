//! Application layer for llm-council
//!
//! Use cases (the deliberation engine) and ports (provider gateway,
//! progress notification). Adapters for the ports live in the
//! infrastructure layer; rendering lives in presentation.

pub mod config;
pub mod context_manager;
pub mod ports;
pub mod use_cases;

pub use config::DeliberationParams;
pub use context_manager::ContextManager;
pub use ports::{
    CompletionRequest, CouncilGateway, NoProgress, ProgressNotifier, ProviderError, SamplingParams,
};
pub use use_cases::{RunDeliberationError, RunDeliberationInput, RunDeliberationUseCase};
