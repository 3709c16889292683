use indicatif::{ProgressBar, ProgressStyle};
use rb_clean_core::ProgressReporter;
use std::path::Path;
use std::sync::Mutex;
use std::time::Duration;

/// CLI progress reporter using an indicatif spinner.
///
/// - Scan phase: spinner with a running file count
/// - XML check phase: spinner
pub struct CliReporter {
    bar: Mutex<Option<ProgressBar>>,
}

impl CliReporter {
    pub fn new() -> Self {
        Self {
            bar: Mutex::new(None),
        }
    }

    fn spinner(message: String) -> ProgressBar {
        let pb = ProgressBar::new_spinner();
        if let Ok(style) = ProgressStyle::with_template("{spinner:.cyan} {msg}") {
            pb.set_style(style.tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏"));
        }
        pb.set_message(message);
        pb.enable_steady_tick(Duration::from_millis(80));
        pb
    }

    fn set_bar(&self, pb: ProgressBar) {
        if let Ok(mut guard) = self.bar.lock() {
            if let Some(old) = guard.take() {
                old.finish_and_clear();
            }
            *guard = Some(pb);
        }
    }

    fn finish_bar(&self) {
        if let Ok(mut guard) = self.bar.lock() {
            if let Some(pb) = guard.take() {
                pb.finish_and_clear();
            }
        }
    }
}

impl ProgressReporter for CliReporter {
    fn on_catalogue_loaded(&self, references: usize) {
        eprintln!(
            "  \x1b[32m✓\x1b[0m Catalogue loaded: {} local tracks",
            references
        );
    }

    fn on_scan_start(&self, root: &Path) {
        self.set_bar(Self::spinner(format!("Scanning {}...", root.display())));
    }

    fn on_scan_progress(&self, files_seen: usize, _current_path: &str) {
        if let Ok(guard) = self.bar.lock() {
            if let Some(pb) = guard.as_ref() {
                pb.set_message(format!("Scanning... {} files checked", files_seen));
            }
        }
    }

    fn on_scan_complete(&self, files_seen: usize, duration_secs: f64) {
        self.finish_bar();
        eprintln!(
            "  \x1b[32m✓\x1b[0m Scan complete: {} files in {:.2}s",
            files_seen, duration_secs
        );
    }

    fn on_check_start(&self, references: usize) {
        self.set_bar(Self::spinner(format!(
            "Checking {} XML paths on disk...",
            references
        )));
    }

    fn on_check_complete(&self, missing: usize, duration_secs: f64) {
        self.finish_bar();
        eprintln!(
            "  \x1b[32m✓\x1b[0m XML check complete: {} paths not found in {:.2}s",
            missing, duration_secs
        );
    }
}
