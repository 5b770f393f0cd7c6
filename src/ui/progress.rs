//! ui::progress
//!
//! Terminal reporting of a running scan.

use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};

use super::output::{format_reference, status, Marker, Verbosity};
use crate::core::pagination::PagePlan;
use crate::core::types::{RepoSlug, RepositoryInfo};
use crate::engine::scan::ScanObserver;

/// Template of the comparison counter.
const COUNTER_TEMPLATE: &str = "[+] Comparing forks {pos}/{len}";

/// Prints scan milestones to stdout and a comparison counter to stderr.
#[derive(Debug, Clone)]
pub struct TerminalProgress {
    verbosity: Verbosity,
    bar: ProgressBar,
}

impl TerminalProgress {
    /// `counter` draws the `i/n` bar on stderr; quiet output hides it.
    pub fn new(verbosity: Verbosity, counter: bool) -> Self {
        let target = if counter && !verbosity.is_quiet() {
            ProgressDrawTarget::stderr()
        } else {
            ProgressDrawTarget::hidden()
        };
        let bar = ProgressBar::with_draw_target(None, target);
        if let Ok(style) = ProgressStyle::with_template(COUNTER_TEMPLATE) {
            bar.set_style(style);
        }
        Self { verbosity, bar }
    }

    /// Stop a counter that a failed or timed-out scan left incomplete.
    pub fn finish(&self) {
        if !self.bar.is_finished() {
            self.bar.abandon();
        }
    }
}

impl ScanObserver for TerminalProgress {
    fn repository_found(&self, repo: &RepoSlug, info: &RepositoryInfo, branch: &str) {
        status(Marker::Success, "Repository found", self.verbosity);
        status(
            Marker::Working,
            format!(
                "Looking for {}",
                format_reference(&repo.full_name(), branch)
            ),
            self.verbosity,
        );
        if info.fork_count > 0 {
            status(
                Marker::Success,
                format!("{} forks found", info.fork_count),
                self.verbosity,
            );
        }
    }

    fn plan_ready(&self, plan: &PagePlan) {
        for notice in &plan.notices {
            let marker = if notice.is_warning() {
                Marker::Warning
            } else {
                Marker::Notice
            };
            status(marker, notice, self.verbosity);
        }
    }

    fn fork_checked(&self, done: usize, total: usize) {
        self.bar.set_length(total as u64);
        self.bar.set_position(done as u64);
        if done >= total {
            self.bar.finish();
        }
    }
}
