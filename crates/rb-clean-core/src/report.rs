//! Plain-text rendering of an [`AuditResult`].
//!
//! The same text goes to the console and to the details file; colouring is
//! left to the caller.

use crate::audit::{AuditResult, FileEntry};
use std::fmt::Write;
use std::path::MAIN_SEPARATOR;

pub fn deleted_label(result: &AuditResult) -> &'static str {
    if result.mode.is_commit() {
        "Deleted files"
    } else {
        "Files to be deleted"
    }
}

pub fn summary_text(result: &AuditResult) -> String {
    let mut out = String::new();
    out.push_str("\nSUMMARY:\n========\n");
    let _ = writeln!(out, "{}: {}", deleted_label(result), result.deleted_count());
    let _ = writeln!(out, "Skipped files: {}", result.skipped_count());
    if result.failed_count() > 0 {
        let _ = writeln!(out, "Failed deletions: {}", result.failed_count());
    }
    if result.unreadable_count() > 0 {
        let _ = writeln!(out, "Unreadable folders: {}", result.unreadable_count());
    }
    if result.missing_count() > 0 {
        let _ = writeln!(out, "Paths in XML not found: {}", result.missing_count());
    }
    out
}

/// Per-file sections. Empty sections are left out entirely.
pub fn details_text(result: &AuditResult) -> String {
    let root = result.root.to_string_lossy();
    let mut out = String::new();

    if !result.deleted.is_empty() {
        section_header(&mut out, &format!("{}:", deleted_label(result)));
        for path in &result.deleted {
            let _ = write!(out, "\nD: {}", relative(path, &root));
        }
    }
    if !result.skipped.is_empty() {
        section_header(&mut out, "Skipped files:");
        entry_lines(&mut out, "S", &result.skipped, &root);
    }
    if !result.failed.is_empty() {
        section_header(&mut out, "Failed deletions:");
        entry_lines(&mut out, "F", &result.failed, &root);
    }
    if !result.unreadable.is_empty() {
        section_header(&mut out, "Unreadable folders:");
        entry_lines(&mut out, "U", &result.unreadable, &root);
    }
    if let Some(missing) = result.missing.as_ref().filter(|m| !m.is_empty()) {
        section_header(&mut out, "Paths in the XML file not found:");
        for path in missing {
            let _ = write!(out, "\nX: {}", path);
        }
    }
    out
}

fn section_header(out: &mut String, title: &str) {
    let underline = "-".repeat(title.chars().count());
    let _ = write!(out, "\n\n\n{}\n{}\n", title, underline);
}

fn entry_lines(out: &mut String, tag: &str, entries: &[FileEntry], root: &str) {
    for entry in entries {
        let _ = write!(out, "\n{}: {}", tag, relative(&entry.path, root));
        if let Some(note) = &entry.note {
            let _ = write!(out, " ({})", note);
        }
    }
}

/// `path` shown relative to the scan root when it lies under it.
fn relative<'a>(path: &'a str, root: &str) -> &'a str {
    match path.strip_prefix(root) {
        Some(rest) if !rest.is_empty() => rest.trim_start_matches(MAIN_SEPARATOR),
        _ => path,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scanner::RunMode;
    use std::path::{Path, PathBuf};

    fn sample(mode: RunMode) -> AuditResult {
        let root = PathBuf::from("/music");
        let mut result = AuditResult::new(mode, &root);
        result.deleted = vec![format!("/music{}old.mp3", MAIN_SEPARATOR)];
        result.skipped = vec![FileEntry::with_note(
            format!("/music{}gone.mp3", MAIN_SEPARATOR),
            "vanished before deletion",
        )];
        result
    }

    #[test]
    fn test_summary_simulate() {
        let text = summary_text(&sample(RunMode::Simulate));
        assert_eq!(
            text,
            "\nSUMMARY:\n========\nFiles to be deleted: 1\nSkipped files: 1\n"
        );
    }

    #[test]
    fn test_summary_commit_with_missing_and_failures() {
        let mut result = sample(RunMode::Commit);
        result.failed = vec![FileEntry::with_note("/music/locked.mp3", "permission denied")];
        result.missing = Some(vec!["/music/lost.mp3".to_string()]);
        let text = summary_text(&result);

        assert!(text.contains("Deleted files: 1\n"));
        assert!(text.contains("Failed deletions: 1\n"));
        assert!(text.contains("Paths in XML not found: 1\n"));
        assert!(!text.contains("Unreadable"));
    }

    #[test]
    fn test_details_sections() {
        let mut result = sample(RunMode::Simulate);
        result.missing = Some(vec!["/elsewhere/lost.mp3".to_string()]);
        let text = details_text(&result);

        assert!(text.contains("Files to be deleted:\n--------------------\n"));
        assert!(text.contains("\nD: old.mp3"));
        assert!(text.contains("\nS: gone.mp3 (vanished before deletion)"));
        assert!(text.contains("Paths in the XML file not found:"));
        assert!(text.contains("\nX: /elsewhere/lost.mp3"));
        assert!(!text.contains("Failed deletions"));
    }

    #[test]
    fn test_empty_details() {
        let result = AuditResult::new(RunMode::Simulate, Path::new("/music"));
        assert_eq!(details_text(&result), "");
    }

    #[test]
    fn test_relative_outside_root() {
        assert_eq!(relative("/other/a.mp3", "/music"), "/other/a.mp3");
        assert_eq!(relative("/music", "/music"), "/music");
    }
}
