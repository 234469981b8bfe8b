//! Progress reporting for deliberation runs

use colored::Colorize;
use council_application::ports::progress::ProgressNotifier;
use council_domain::{CouncilRole, Model, Phase};
use indicatif::{MultiProgress, ProgressBar, ProgressStyle};
use std::sync::Mutex;

/// Reports progress during a deliberation with progress bars
pub struct ProgressReporter {
    multi: MultiProgress,
    phase_bar: Mutex<Option<ProgressBar>>,
}

impl ProgressReporter {
    pub fn new() -> Self {
        Self {
            multi: MultiProgress::new(),
            phase_bar: Mutex::new(None),
        }
    }

    fn phase_style() -> ProgressStyle {
        ProgressStyle::default_bar()
            .template("{spinner:.green} {prefix:.bold.cyan} [{bar:40.cyan/blue}] {pos}/{len} {msg}")
            .unwrap()
            .progress_chars("=>-")
    }
}

impl Default for ProgressReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl ProgressNotifier for ProgressReporter {
    fn on_phase_start(&self, phase: &Phase, total_tasks: usize) {
        let pb = self.multi.add(ProgressBar::new(total_tasks as u64));
        pb.set_style(Self::phase_style());
        pb.set_prefix(phase.display_name().to_string());
        pb.set_message("Starting...");

        *self.phase_bar.lock().unwrap() = Some(pb);
    }

    fn on_task_complete(&self, _phase: &Phase, role: &CouncilRole, model: &Model, success: bool) {
        if let Some(pb) = self.phase_bar.lock().unwrap().as_ref() {
            let status = if success {
                format!("{} {} ({})", "v".green(), role, model)
            } else {
                format!("{} {} ({})", "x".red(), role, model)
            };
            pb.set_message(status);
            pb.inc(1);
        }
    }

    fn on_phase_complete(&self, phase: &Phase) {
        if let Some(pb) = self.phase_bar.lock().unwrap().take() {
            pb.finish_with_message(format!("{} complete", phase.display_name().green()));
        }
    }
}

/// Simple text-based progress (no fancy UI)
pub struct SimpleProgress;

impl ProgressNotifier for SimpleProgress {
    fn on_phase_start(&self, phase: &Phase, total_tasks: usize) {
        println!(
            "{} {} ({} call{})",
            "->".cyan(),
            phase.display_name().bold(),
            total_tasks,
            if total_tasks == 1 { "" } else { "s" }
        );
    }

    fn on_task_complete(&self, _phase: &Phase, role: &CouncilRole, model: &Model, success: bool) {
        if success {
            println!("  {} {} ({})", "v".green(), role, model);
        } else {
            println!("  {} {} ({}) failed", "x".red(), role, model);
        }
    }

    fn on_phase_complete(&self, _phase: &Phase) {
        println!();
    }
}
