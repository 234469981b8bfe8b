//! Deliberation parameters — per-run control knobs.
//!
//! These are application-layer concerns: the per-call timeout enforced by
//! the engine and the sampling limits passed through to providers.

use crate::ports::provider::SamplingParams;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Static parameters for one deliberation run
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DeliberationParams {
    /// Timeout applied independently to every provider call
    pub call_timeout: Duration,
    /// Opaque sampling passthrough for every provider call
    pub sampling: SamplingParams,
}

impl Default for DeliberationParams {
    fn default() -> Self {
        Self {
            call_timeout: Duration::from_secs(120),
            sampling: SamplingParams::default(),
        }
    }
}

impl DeliberationParams {
    pub fn with_call_timeout(mut self, timeout: Duration) -> Self {
        self.call_timeout = timeout;
        self
    }

    pub fn with_sampling(mut self, sampling: SamplingParams) -> Self {
        self.sampling = sampling;
        self
    }
}
