use std::io;
use std::path::{Path, PathBuf};
use tracing::warn;
use walkdir::WalkDir;

/// What the traversal reports for each filesystem entry of interest.
#[derive(Debug)]
pub enum WalkEvent {
    /// A regular file. Directories and symlinks are never reported.
    File(PathBuf),
    /// A directory (or entry) that could not be read. Its subtree is skipped.
    Unreadable { path: PathBuf, error: String },
}

/// Recursive traversal of `root`. Errors on individual entries are reported
/// through `visit` and never stop the walk.
pub fn walk_files<F>(root: &Path, mut visit: F)
where
    F: FnMut(WalkEvent),
{
    for entry in WalkDir::new(root).follow_links(false).sort_by_file_name() {
        match entry {
            Ok(entry) => {
                if entry.file_type().is_file() {
                    visit(WalkEvent::File(entry.into_path()));
                }
            }
            Err(err) => {
                let path = err
                    .path()
                    .map(Path::to_path_buf)
                    .unwrap_or_else(|| root.to_path_buf());
                let denied = err
                    .io_error()
                    .map_or(false, |e| e.kind() == io::ErrorKind::PermissionDenied);
                if denied {
                    warn!("Access denied reading directory {}: {}", path.display(), err);
                } else {
                    warn!("Error reading {}: {}", path.display(), err);
                }
                visit(WalkEvent::Unreadable {
                    path,
                    error: err.to_string(),
                });
            }
        }
    }
}
