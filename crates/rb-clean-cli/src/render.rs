use chrono::{DateTime, Local};
use colored::*;
use rb_clean_core::report::{deleted_label, details_text, summary_text};
use rb_clean_core::{AuditResult, RunMode};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// `clean_details_<datetime>.txt` or `simulate_details_<datetime>.txt`.
pub fn details_file_name(mode: RunMode, now: DateTime<Local>) -> PathBuf {
    PathBuf::from(format!(
        "{}_details_{}.txt",
        mode.label(),
        now.format("%Y%m%d_%H%M%S")
    ))
}

pub fn print_summary(result: &AuditResult) {
    println!("\n{}\n{}", "SUMMARY:".bold(), "========".bold());
    let deleted = format!("{}", result.deleted_count());
    println!(
        "{}: {}",
        deleted_label(result),
        if result.mode.is_commit() {
            deleted.red()
        } else {
            deleted.yellow()
        }
    );
    println!("Skipped files: {}", format!("{}", result.skipped_count()).cyan());
    if result.failed_count() > 0 {
        println!(
            "Failed deletions: {}",
            format!("{}", result.failed_count()).red().bold()
        );
    }
    if result.unreadable_count() > 0 {
        println!(
            "Unreadable folders: {}",
            format!("{}", result.unreadable_count()).red()
        );
    }
    if result.missing_count() > 0 {
        println!(
            "Paths in XML not found: {}",
            format!("{}", result.missing_count()).yellow()
        );
    }
}

pub fn print_details(result: &AuditResult) {
    println!("{}", details_text(result));
}

/// Summary followed by the detail sections, as plain text.
pub fn write_details_file(result: &AuditResult, path: &Path) -> io::Result<()> {
    let mut text = summary_text(result);
    text.push_str(&details_text(result));
    fs::write(path, text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_details_file_name() {
        let now = Local.with_ymd_and_hms(2024, 3, 9, 7, 5, 1).unwrap();
        assert_eq!(
            details_file_name(RunMode::Simulate, now),
            PathBuf::from("simulate_details_20240309_070501.txt")
        );
        assert_eq!(
            details_file_name(RunMode::Commit, now),
            PathBuf::from("clean_details_20240309_070501.txt")
        );
    }

    #[test]
    fn test_write_details_file() {
        let tmp = tempfile::tempdir().unwrap();
        let mut result = AuditResult::new(RunMode::Simulate, Path::new("/music"));
        result.deleted = vec!["/music/a.mp3".to_string()];
        let path = tmp.path().join("out.txt");

        write_details_file(&result, &path).unwrap();

        let text = fs::read_to_string(&path).unwrap();
        assert!(text.starts_with("\nSUMMARY:\n========\nFiles to be deleted: 1\n"));
        assert!(text.contains("Files to be deleted:\n"));
    }
}
