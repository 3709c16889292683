use crate::catalogue::ReferenceSet;
use crate::error::Error;
use crate::location::lexical_normalize;
use std::env;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// A validated traversal root: absolute, existing, listable directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanRoot {
    path: PathBuf,
}

impl ScanRoot {
    pub fn new(path: impl AsRef<Path>) -> Result<Self, Error> {
        let path = path.as_ref();
        let invalid = |reason: String| Error::ScanRootInvalid {
            path: path.to_path_buf(),
            reason,
        };

        if path.as_os_str().is_empty() {
            return Err(invalid("no folder given".to_string()));
        }
        let absolute = if path.is_absolute() {
            path.to_path_buf()
        } else {
            env::current_dir()?.join(path)
        };
        // Walked paths are compared as strings against the catalogue.
        let path = lexical_normalize(&absolute);

        let metadata = fs::metadata(&path).map_err(|err| match err.kind() {
            io::ErrorKind::NotFound => invalid("the folder does not exist".to_string()),
            _ => invalid(err.to_string()),
        })?;
        if !metadata.is_dir() {
            return Err(invalid("not a folder".to_string()));
        }
        fs::read_dir(&path).map_err(|err| invalid(format!("the folder cannot be read: {}", err)))?;

        Ok(Self { path })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Number of references located under this root. Logs a warning when
    /// there are none, since every scanned file would then be unreferenced.
    pub fn check_covers(&self, references: &ReferenceSet) -> usize {
        let case = references.case_policy();
        let root = case.fold(&self.path.to_string_lossy());
        let covered = references
            .iter()
            .filter(|r| case.fold(&r.canonical).starts_with(&root))
            .count();

        if covered == 0 {
            warn!(
                "No catalogue entry is located under {}; every file found there will be treated as unreferenced",
                self.path.display()
            );
        } else {
            info!(
                "{} of {} catalogue entries are located under {}",
                covered,
                references.len(),
                self.path.display()
            );
        }
        covered
    }
}
