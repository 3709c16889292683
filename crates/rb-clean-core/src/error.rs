use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Catalogue file not found: {}", .0.display())]
    CatalogueNotFound(PathBuf),

    #[error("Could not read catalogue file {}: {source}", .path.display())]
    CatalogueRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid XML in catalogue file {}: {source}", .path.display())]
    CatalogueMalformed {
        path: PathBuf,
        #[source]
        source: roxmltree::Error,
    },

    #[error("No tracks found in catalogue file {}: {reason}", .path.display())]
    CatalogueEmpty { path: PathBuf, reason: String },

    #[error("Invalid scan root {}: {reason}", .path.display())]
    ScanRootInvalid { path: PathBuf, reason: String },

    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
