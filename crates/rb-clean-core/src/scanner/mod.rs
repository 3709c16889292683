mod reconcile;
mod root;
pub mod walk;

pub use reconcile::{FileClass, Reconciler, RunMode, RunOptions};
pub use root::ScanRoot;
