use crate::catalogue::ReferenceSet;
use crate::scanner::RunMode;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// A path in a detail list, with an optional explanation.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct FileEntry {
    pub path: String,
    pub note: Option<String>,
}

impl FileEntry {
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            note: None,
        }
    }

    pub fn with_note(path: impl Into<String>, note: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            note: Some(note.into()),
        }
    }
}

/// Outcome of one reconciliation run.
///
/// Built up while the scan runs; [`AuditResult::finalize`] sorts every list
/// so that the output does not depend on directory enumeration order.
#[derive(Debug, Clone)]
pub struct AuditResult {
    pub mode: RunMode,
    pub root: PathBuf,
    pub files_seen: usize,
    pub referenced: usize,
    /// Deleted in commit mode, would be deleted in simulate mode.
    pub deleted: Vec<String>,
    pub skipped: Vec<FileEntry>,
    pub failed: Vec<FileEntry>,
    /// Directories that could not be listed; their contents were not scanned.
    pub unreadable: Vec<FileEntry>,
    /// `None` when the catalogue integrity check was not run.
    pub missing: Option<Vec<String>>,
}

impl AuditResult {
    pub fn new(mode: RunMode, root: &Path) -> Self {
        Self {
            mode,
            root: root.to_path_buf(),
            files_seen: 0,
            referenced: 0,
            deleted: Vec::new(),
            skipped: Vec::new(),
            failed: Vec::new(),
            unreadable: Vec::new(),
            missing: None,
        }
    }

    pub fn finalize(&mut self) {
        self.deleted.sort();
        self.skipped.sort();
        self.failed.sort();
        self.unreadable.sort();
        if let Some(missing) = self.missing.as_mut() {
            missing.sort();
        }
    }

    pub fn deleted_count(&self) -> usize {
        self.deleted.len()
    }

    pub fn skipped_count(&self) -> usize {
        self.skipped.len()
    }

    pub fn failed_count(&self) -> usize {
        self.failed.len()
    }

    pub fn unreadable_count(&self) -> usize {
        self.unreadable.len()
    }

    pub fn missing_count(&self) -> usize {
        self.missing.as_ref().map_or(0, Vec::len)
    }
}

/// Reference paths that do not exist on disk, sorted and deduplicated.
pub fn check_missing_references(references: &ReferenceSet) -> Vec<String> {
    let missing: Vec<String> = references
        .unique_paths()
        .into_iter()
        .filter(|path| {
            let exists = Path::new(path).exists();
            if !exists {
                debug!("Referenced file not found: {}", path);
            }
            !exists
        })
        .map(str::to_string)
        .collect();

    info!("{} catalogue paths not found on disk", missing.len());
    missing
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalogue::ReferencePath;
    use crate::config::CasePolicy;

    #[test]
    fn test_finalize_sorts_lists() {
        let mut result = AuditResult::new(RunMode::Simulate, Path::new("/music"));
        result.deleted = vec!["/music/b.mp3".into(), "/music/a.mp3".into()];
        result.skipped = vec![FileEntry::new("/music/z.mp3"), FileEntry::new("/music/c.mp3")];
        result.missing = Some(vec!["/x".into(), "/a".into()]);
        result.finalize();

        assert_eq!(result.deleted, vec!["/music/a.mp3", "/music/b.mp3"]);
        assert_eq!(result.skipped[0].path, "/music/c.mp3");
        assert_eq!(result.missing, Some(vec!["/a".to_string(), "/x".to_string()]));
        assert_eq!(result.missing_count(), 2);
    }

    #[test]
    fn test_missing_count_without_check() {
        let result = AuditResult::new(RunMode::Commit, Path::new("/music"));
        assert_eq!(result.missing, None);
        assert_eq!(result.missing_count(), 0);
    }

    #[test]
    fn test_check_missing_references() {
        let tmp = tempfile::tempdir().unwrap();
        let present = tmp.path().join("present.mp3");
        std::fs::write(&present, b"x").unwrap();
        let gone = tmp.path().join("gone.mp3");

        let mut refs = ReferenceSet::new(CasePolicy::Sensitive);
        for path in [&present, &gone, &gone] {
            refs.insert(ReferencePath {
                raw: String::new(),
                canonical: path.to_string_lossy().into_owned(),
            });
        }

        let missing = check_missing_references(&refs);
        assert_eq!(missing, vec![gone.to_string_lossy().into_owned()]);
    }
}
