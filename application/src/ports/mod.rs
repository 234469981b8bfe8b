//! Application ports - interfaces implemented by outer layers

pub mod progress;
pub mod provider;

pub use progress::{NoProgress, ProgressNotifier};
pub use provider::{CompletionRequest, CouncilGateway, ProviderError, SamplingParams};
