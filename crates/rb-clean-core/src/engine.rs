use crate::audit::{check_missing_references, AuditResult};
use crate::catalogue::{load_catalogue, CatalogueStats, ReferenceSet};
use crate::common_root::common_root;
use crate::config::AppConfig;
use crate::error::Error;
use crate::progress::ProgressReporter;
use crate::scanner::{Reconciler, RunOptions, ScanRoot};
use crate::skip::SkipFilter;
use std::path::Path;
use std::time::Instant;
use tracing::{debug, info};

/// Reconciles one catalogue against the filesystem.
///
/// Loading the catalogue happens once in [`CleanEngine::load`]; the reference
/// set is read-only afterwards and can be reconciled against any root.
pub struct CleanEngine {
    config: AppConfig,
    skip: SkipFilter,
    references: ReferenceSet,
    stats: CatalogueStats,
}

impl CleanEngine {
    pub fn load(catalogue: &Path, config: AppConfig) -> Result<Self, Error> {
        debug!("config.skip_substrings: {:?}", config.skip_substrings);
        debug!("config.path_case: {:?}", config.path_case);
        let (references, stats) = load_catalogue(catalogue, &config)?;
        Ok(Self::from_references(references, stats, config))
    }

    pub fn from_references(
        references: ReferenceSet,
        stats: CatalogueStats,
        config: AppConfig,
    ) -> Self {
        let skip = SkipFilter::new(&config.skip_substrings);
        Self {
            config,
            skip,
            references,
            stats,
        }
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    pub fn references(&self) -> &ReferenceSet {
        &self.references
    }

    pub fn stats(&self) -> CatalogueStats {
        self.stats
    }

    /// Default scan root suggestion. Not necessarily an existing directory.
    pub fn common_root(&self) -> String {
        common_root(self.references.iter().map(|r| r.canonical.as_str()))
    }

    /// Run the reconciliation:
    /// 1. Walk `root`, classify each file, delete unreferenced ones in commit mode
    /// 2. Optionally check every catalogue path still exists on disk
    pub fn reconcile(
        &self,
        root: &ScanRoot,
        options: &RunOptions,
        reporter: &dyn ProgressReporter,
    ) -> AuditResult {
        reporter.on_catalogue_loaded(self.references.len());
        root.check_covers(&self.references);

        let reconciler = Reconciler::new(&self.references, &self.skip, options.mode);
        let mut result = reconciler.run(root, reporter);

        if options.check_missing {
            info!("Checking catalogue paths against the filesystem...");
            reporter.on_check_start(self.references.len());
            let check_start = Instant::now();
            let missing = check_missing_references(&self.references);
            reporter.on_check_complete(missing.len(), check_start.elapsed().as_secs_f64());
            result.missing = Some(missing);
        }

        result
    }
}
