//! Stage progress display for a mosaic run

use crate::io::configuration::PROGRESS_BAR_WIDTH;
use indicatif::{MultiProgress, ProgressBar, ProgressDrawTarget, ProgressStyle};
use std::sync::LazyLock;

static STAGE_STYLE: LazyLock<ProgressStyle> = LazyLock::new(|| {
    let template = format!(
        "{{prefix:>10}} [{{bar:{PROGRESS_BAR_WIDTH}.cyan/blue}}] {{pos}}/{{len}} ({{elapsed}})"
    );
    ProgressStyle::default_bar()
        .template(&template)
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("█▉▊▋▌▍▎▏ ")
});

/// Hands out one progress bar per pipeline stage
///
/// Stages (catalog, matching, leftovers, rendering) run one after another;
/// each gets its own bar that clears itself when the stage is done. A
/// hidden manager hands out bars that never draw.
pub struct ProgressManager {
    multi_progress: MultiProgress,
    visible: bool,
}

impl Default for ProgressManager {
    fn default() -> Self {
        Self::new()
    }
}

impl ProgressManager {
    /// Create a manager that draws to stderr
    pub fn new() -> Self {
        Self {
            multi_progress: MultiProgress::new(),
            visible: true,
        }
    }

    /// Create a manager whose bars never draw
    pub fn hidden() -> Self {
        Self {
            multi_progress: MultiProgress::with_draw_target(ProgressDrawTarget::hidden()),
            visible: false,
        }
    }

    /// Whether bars from this manager are drawn
    pub const fn is_visible(&self) -> bool {
        self.visible
    }

    /// Start a bar for a stage of `len` steps
    pub fn stage(&self, label: &'static str, len: u64) -> ProgressBar {
        if !self.visible {
            return ProgressBar::hidden();
        }

        let bar = ProgressBar::new(len);
        bar.set_style(STAGE_STYLE.clone());
        bar.set_prefix(label);
        self.multi_progress.add(bar)
    }

    /// Clean up all progress displays
    pub fn finish(&self) {
        let _ = self.multi_progress.clear();
    }
}
