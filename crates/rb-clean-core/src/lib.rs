pub mod audit;
pub mod catalogue;
pub mod common_root;
pub mod config;
pub mod engine;
pub mod error;
pub mod location;
pub mod progress;
pub mod report;
pub mod scanner;
pub mod skip;

pub use audit::{AuditResult, FileEntry};
pub use catalogue::{CatalogueStats, ReferencePath, ReferenceSet};
pub use config::{AppConfig, CasePolicy};
pub use engine::CleanEngine;
pub use error::Error;
pub use progress::{ProgressReporter, SilentReporter};
pub use scanner::{RunMode, RunOptions, ScanRoot};
