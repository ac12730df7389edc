//! Category matching with random fallback.
//!
//! Ads matching the requested categories are preferred and returned in the
//! order the categories were given. When nothing matches, or no category is
//! supplied, a uniform sample without replacement is drawn from the whole
//! catalog so callers always receive something.

use std::collections::HashSet;

use rand::seq::IndexedRandom;
use rand::Rng;

use super::catalog::{AdCatalog, CatalogError};
use super::model::Ad;

/// Default cap on ads returned per request
pub const DEFAULT_MAX_ADS_TO_SERVE: usize = 2;

/// Selects a bounded, duplicate-free list of ads for a set of categories.
///
/// The selector owns its catalog and holds no other state, so a single
/// instance can be shared across request handlers.
#[derive(Debug, Clone)]
pub struct AdSelector {
    catalog: AdCatalog,
    max_ads_to_serve: usize,
}

impl AdSelector {
    pub fn new(catalog: AdCatalog, max_ads_to_serve: usize) -> Result<Self, CatalogError> {
        if max_ads_to_serve == 0 {
            return Err(CatalogError::ZeroCap);
        }
        if catalog.is_empty() {
            return Err(CatalogError::Empty);
        }
        Ok(Self {
            catalog,
            max_ads_to_serve,
        })
    }

    pub fn catalog(&self) -> &AdCatalog {
        &self.catalog
    }

    pub fn max_ads_to_serve(&self) -> usize {
        self.max_ads_to_serve
    }

    /// Selects ads using the thread-local random generator for fallback.
    pub fn select_ads<S: AsRef<str>>(&self, categories: &[S]) -> Vec<Ad> {
        self.select_ads_with_rng(categories, &mut rand::rng())
    }

    /// Selects ads, drawing any fallback sample from `rng`.
    pub fn select_ads_with_rng<S, R>(&self, categories: &[S], rng: &mut R) -> Vec<Ad>
    where
        S: AsRef<str>,
        R: Rng + ?Sized,
    {
        let matched = self.matching_ads(categories);
        if !matched.is_empty() {
            tracing::debug!(
                categories = categories.len(),
                count = matched.len(),
                "Serving category-matched ads"
            );
            return matched;
        }

        let sample = self.random_ads(rng);
        tracing::debug!(
            categories = categories.len(),
            count = sample.len(),
            "Serving random ads"
        );
        sample
    }

    /// Union of each category's ads in request order, deduplicated and capped.
    fn matching_ads<S: AsRef<str>>(&self, categories: &[S]) -> Vec<Ad> {
        let mut seen = HashSet::new();
        let mut matched = Vec::new();

        for category in categories {
            for ad in self.catalog.ads_for_category(category.as_ref()) {
                if matched.len() == self.max_ads_to_serve {
                    return matched;
                }
                if seen.insert(ad) {
                    matched.push(ad.clone());
                }
            }
        }

        matched
    }

    fn random_ads<R: Rng + ?Sized>(&self, rng: &mut R) -> Vec<Ad> {
        self.catalog
            .all_ads()
            .choose_multiple(rng, self.max_ads_to_serve)
            .cloned()
            .collect()
    }
}
