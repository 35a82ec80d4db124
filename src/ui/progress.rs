use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

pub struct ProgressManager {
    enabled: bool,
}

impl ProgressManager {
    pub fn new(enabled: bool) -> Self {
        Self { enabled }
    }

    pub fn create_entry_progress(&self, total_entries: u64) -> ProgressBar {
        if !self.enabled || total_entries == 0 {
            return ProgressBar::hidden();
        }

        let pb = ProgressBar::new(total_entries);
        pb.set_style(
            ProgressStyle::with_template(
                "{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos:>5}/{len:5} files {msg}",
            )
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("#>-"),
        );
        pb.set_message("Writing files...");
        pb.enable_steady_tick(Duration::from_millis(100));
        pb
    }

    /// Runs `f` with `pb` hidden so printed lines do not interleave with the bar.
    pub fn suspend<F, R>(&self, pb: Option<&ProgressBar>, f: F) -> R
    where
        F: FnOnce() -> R,
    {
        match pb {
            Some(pb) if self.enabled => pb.suspend(f),
            _ => f(),
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }
}

impl Default for ProgressManager {
    fn default() -> Self {
        Self::new(true)
    }
}

pub fn advance(pb: &ProgressBar, path: &str) {
    pb.inc(1);
    pb.set_message(path.to_string());
}

pub fn finish(pb: &ProgressBar) {
    pb.finish_and_clear();
}
