//! Progress notification port
//!
//! Lets the presentation layer observe a deliberation without the engine
//! knowing anything about rendering.

use council_domain::{CouncilRole, Model, Phase};

/// Callback for progress updates during a deliberation
pub trait ProgressNotifier: Send + Sync {
    /// Called when a phase starts
    fn on_phase_start(&self, phase: &Phase, total_tasks: usize);

    /// Called when one participant's call completes within a phase
    fn on_task_complete(&self, phase: &Phase, role: &CouncilRole, model: &Model, success: bool);

    /// Called when a phase completes
    fn on_phase_complete(&self, phase: &Phase);
}

/// No-op progress notifier
pub struct NoProgress;

impl ProgressNotifier for NoProgress {
    fn on_phase_start(&self, _phase: &Phase, _total_tasks: usize) {}
    fn on_task_complete(&self, _phase: &Phase, _role: &CouncilRole, _model: &Model, _success: bool) {
    }
    fn on_phase_complete(&self, _phase: &Phase) {}
}
