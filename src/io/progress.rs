//! Batch progress bar over mask files

use crate::io::configuration::PROGRESS_TICK_MS;
use indicatif::{ProgressBar, ProgressStyle};
use std::path::Path;
use std::sync::LazyLock;
use std::time::Duration;

static BATCH_STYLE: LazyLock<ProgressStyle> = LazyLock::new(|| {
    ProgressStyle::default_bar()
        .template("[{elapsed_precise}] Masks: [{bar:40.cyan/blue}] {pos}/{len} {msg}")
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("█▉▊▋▌▍▎▏ ")
});

/// Coordinates the progress display of a batch run
///
/// The bar counts masks as they are dispatched, so a mask that fails to load
/// still advances it.
pub struct ProgressManager {
    bar: Option<ProgressBar>,
}

impl Default for ProgressManager {
    fn default() -> Self {
        Self::new()
    }
}

impl ProgressManager {
    /// Create a manager with no bar drawn yet
    pub const fn new() -> Self {
        Self { bar: None }
    }

    /// Draw a bar for `file_count` masks
    pub fn initialize(&mut self, file_count: usize) {
        let bar = ProgressBar::new(file_count as u64);
        bar.set_style(BATCH_STYLE.clone());
        bar.enable_steady_tick(Duration::from_millis(PROGRESS_TICK_MS));
        self.bar = Some(bar);
    }

    /// Advance to the next mask and show its name
    pub fn start_file(&self, path: &Path) {
        if let Some(bar) = &self.bar {
            let name = path.file_name().unwrap_or_default().to_string_lossy();
            bar.set_message(name.to_string());
            bar.inc(1);
        }
    }

    /// Remove the bar from the terminal
    pub fn finish(&self) {
        if let Some(bar) = &self.bar {
            bar.finish_and_clear();
        }
    }
}
