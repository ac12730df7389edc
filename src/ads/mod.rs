//! Ad selection engine.
//!
//! - `model`: the `Ad` record and `Category` key
//! - `catalog`: the immutable category-to-ads registry
//! - `selector`: category matching, random fallback, deduplication and capping

mod catalog;
mod model;
mod selector;

pub use catalog::{AdCatalog, AdCatalogBuilder, CatalogError};
pub use model::{Ad, Category};
pub use selector::{AdSelector, DEFAULT_MAX_ADS_TO_SERVE};
