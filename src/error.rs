//! Startup errors.
//!
//! Every failure the service can hit happens before it accepts traffic:
//! bad configuration, an invalid catalog, or a listener that cannot bind.
//! Request handling itself has no error path.

use std::io;

use crate::ads::CatalogError;
use crate::config::ConfigError;

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("Invalid ad catalog: {0}")]
    Catalog(#[from] CatalogError),

    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}
