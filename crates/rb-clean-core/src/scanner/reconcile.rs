use super::root::ScanRoot;
use super::walk::{walk_files, WalkEvent};
use crate::audit::{AuditResult, FileEntry};
use crate::catalogue::ReferenceSet;
use crate::progress::ProgressReporter;
use crate::skip::SkipFilter;
use std::fs;
use std::io;
use std::path::Path;
use std::time::Instant;
use tracing::{debug, error, info, warn};

/// Simulate reports what would be deleted; only Commit touches the disk.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RunMode {
    #[default]
    Simulate,
    Commit,
}

impl RunMode {
    pub fn is_commit(self) -> bool {
        self == RunMode::Commit
    }

    pub fn label(self) -> &'static str {
        match self {
            RunMode::Simulate => "simulate",
            RunMode::Commit => "clean",
        }
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct RunOptions {
    pub mode: RunMode,
    /// Also look for catalogue paths that no longer exist on disk.
    pub check_missing: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileClass {
    Skipped,
    Referenced,
    Unreferenced,
}

/// Classifies every file under a [`ScanRoot`] against the reference set and
/// removes unreferenced files in commit mode.
pub struct Reconciler<'a> {
    references: &'a ReferenceSet,
    skip: &'a SkipFilter,
    mode: RunMode,
}

impl<'a> Reconciler<'a> {
    pub fn new(references: &'a ReferenceSet, skip: &'a SkipFilter, mode: RunMode) -> Self {
        Self {
            references,
            skip,
            mode,
        }
    }

    pub fn classify(&self, path: &str) -> FileClass {
        if self.skip.should_skip(path) {
            FileClass::Skipped
        } else if self.references.contains(path) {
            FileClass::Referenced
        } else {
            FileClass::Unreferenced
        }
    }

    pub fn run(&self, root: &ScanRoot, reporter: &dyn ProgressReporter) -> AuditResult {
        let mut result = AuditResult::new(self.mode, root.path());

        info!(
            "Starting to {} from folder {}",
            if self.mode.is_commit() { "clean" } else { "simulate cleaning" },
            root.path().display()
        );
        reporter.on_scan_start(root.path());
        let start = Instant::now();

        walk_files(root.path(), |event| match event {
            WalkEvent::File(path) => {
                result.files_seen += 1;
                self.handle_file(&path, &mut result);
                reporter.on_scan_progress(result.files_seen, &path.to_string_lossy());
            }
            WalkEvent::Unreadable { path, error } => {
                result
                    .unreadable
                    .push(FileEntry::with_note(path.to_string_lossy(), error));
            }
        });

        let duration = start.elapsed();
        reporter.on_scan_complete(result.files_seen, duration.as_secs_f64());
        info!(
            "Scanned {} files in {:.2}s: {} referenced, {} unreferenced, {} skipped, {} failed",
            result.files_seen,
            duration.as_secs_f64(),
            result.referenced,
            result.deleted_count(),
            result.skipped_count(),
            result.failed_count(),
        );

        result.finalize();
        result
    }

    fn handle_file(&self, path: &Path, result: &mut AuditResult) {
        // A name that is not UTF-8 can never match a catalogue entry; leave it alone.
        let canonical = match path.to_str() {
            Some(canonical) => canonical,
            None => {
                warn!("Skipping non UTF-8 path {}", path.display());
                result.skipped.push(FileEntry::with_note(
                    path.to_string_lossy(),
                    "path is not valid UTF-8",
                ));
                return;
            }
        };

        match self.classify(canonical) {
            FileClass::Skipped => {
                debug!("skip: {}", canonical);
                result.skipped.push(FileEntry::new(canonical));
            }
            FileClass::Referenced => {
                result.referenced += 1;
            }
            FileClass::Unreferenced if !self.mode.is_commit() => {
                debug!("would delete: {}", canonical);
                result.deleted.push(canonical.to_string());
            }
            FileClass::Unreferenced => match fs::remove_file(path) {
                Ok(()) => {
                    debug!("deleted: {}", canonical);
                    result.deleted.push(canonical.to_string());
                }
                Err(err) if err.kind() == io::ErrorKind::NotFound => {
                    warn!("File '{}' vanished before it could be deleted", canonical);
                    result.skipped.push(FileEntry::with_note(
                        canonical,
                        "vanished before deletion",
                    ));
                }
                Err(err) => {
                    error!("Failed to remove '{}': {}", canonical, err);
                    result
                        .failed
                        .push(FileEntry::with_note(canonical, err.to_string()));
                }
            },
        }
    }
}
