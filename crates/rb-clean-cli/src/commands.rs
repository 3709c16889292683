use clap::{Parser, ValueEnum};
use rb_clean_core::{CasePolicy, RunMode};
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(name = "rb-clean", version)]
#[command(
    about = "Deletes files from your Rekordbox folder which are not in the library based on an exported Rekordbox XML",
    long_about = None
)]
pub struct Cli {
    /// The file name of the XML file exported from Rekordbox
    pub rekordbox_xml: PathBuf,

    /// Do the cleaning (delete unreferenced files)
    #[arg(short, long)]
    pub clean: bool,

    /// Simulate the cleaning to see what would be deleted. This is already the
    /// default without --clean; the flag only makes the choice explicit.
    #[arg(short, long, conflicts_with = "clean")]
    pub simulate: bool,

    /// Skip files whose path contains one of these strings, divided by ','
    /// (applies to both the local files and the paths in the XML file)
    #[arg(long, value_name = "LIST")]
    pub skip_folder: Option<String>,

    /// Show the detailed results (per file) on the console
    #[arg(long)]
    pub details: bool,

    /// Write the detailed results to clean_details_<datetime>.txt or simulate_details_<datetime>.txt
    #[arg(long)]
    pub details_file: bool,

    /// Check if the XML has any paths which do not exist in the filesystem
    #[arg(long)]
    pub check_xml: bool,

    /// Folder to clean; skips the interactive folder selection
    #[arg(long, value_name = "PATH")]
    pub root: Option<PathBuf>,

    /// How paths from the XML are compared with paths on disk
    #[arg(long, value_enum)]
    pub path_case: Option<PathCase>,
}

impl Cli {
    /// `--simulate` and no flag at all both simulate; only `--clean` deletes.
    pub fn run_mode(&self) -> RunMode {
        if self.clean && !self.simulate {
            RunMode::Commit
        } else {
            RunMode::Simulate
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum PathCase {
    Sensitive,
    Insensitive,
}

impl From<PathCase> for CasePolicy {
    fn from(value: PathCase) -> Self {
        match value {
            PathCase::Sensitive => CasePolicy::Sensitive,
            PathCase::Insensitive => CasePolicy::Insensitive,
        }
    }
}
