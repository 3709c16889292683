use std::path::Path;

/// Trait for reporting reconciliation progress.
///
/// The CLI implements it with an indicatif spinner. All methods have default
/// no-op implementations.
pub trait ProgressReporter: Send + Sync {
    fn on_catalogue_loaded(&self, _references: usize) {}
    fn on_scan_start(&self, _root: &Path) {}
    fn on_scan_progress(&self, _files_seen: usize, _current_path: &str) {}
    fn on_scan_complete(&self, _files_seen: usize, _duration_secs: f64) {}
    fn on_check_start(&self, _references: usize) {}
    fn on_check_complete(&self, _missing: usize, _duration_secs: f64) {}
}

/// No-op progress reporter for silent operation.
pub struct SilentReporter;

impl ProgressReporter for SilentReporter {}
