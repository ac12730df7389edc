//! Immutable category-to-ads registry.
//!
//! An `AdCatalog` is built once at startup, either from configuration or from
//! the built-in table, and is read-only afterwards. Lookups for unknown
//! categories return an empty slice rather than an error.

use std::collections::{HashMap, HashSet};

use super::model::{Ad, Category};

/// Built-in catalog used when the configuration defines no categories.
///
/// Rows are `(category, redirect_url, text)`; consecutive rows sharing a
/// category form that category's ad list.
const BUILTIN_ADS: &[(&str, &str, &str)] = &[
    ("clothing", "/product/66VCHSJNUP", "Tank top for sale. 20% off."),
    (
        "accessories",
        "/product/1YMWWN1N4O",
        "Watch for sale. Buy one, get second kit for free",
    ),
    (
        "footwear",
        "/product/L9ECAV7KIM",
        "Loafers for sale. Buy one, get second one for free",
    ),
    ("hair", "/product/2ZYFJ3GM2N", "Hairdryer for sale. 50% off."),
    ("decor", "/product/0PUK6V6EV0", "Candle holder for sale. 30% off."),
    (
        "kitchen",
        "/product/9SIQT8TOJO",
        "Bamboo glass jar for sale. 10% off.",
    ),
    (
        "kitchen",
        "/product/6E92ZMYYFZ",
        "Mug for sale. Buy two, get third one for free",
    ),
];

#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("Ad catalog is empty")]
    Empty,
    #[error("Category name must not be empty")]
    EmptyCategory,
    #[error("Category '{0}' has no ads")]
    CategoryWithoutAds(String),
    #[error("Category '{0}' is defined more than once")]
    DuplicateCategory(String),
    #[error("Ad field '{0}' must not be empty")]
    EmptyField(&'static str),
    #[error("max_ads_to_serve must be at least 1")]
    ZeroCap,
}

/// Read-only registry of ads partitioned by category.
#[derive(Debug, Clone)]
pub struct AdCatalog {
    /// Category keys in definition order
    categories: Vec<Category>,
    by_category: HashMap<Category, Vec<Ad>>,
    /// Deduplicated union of every category's ads, in definition order
    all: Vec<Ad>,
}

impl AdCatalog {
    pub fn builder() -> AdCatalogBuilder {
        AdCatalogBuilder::default()
    }

    /// Builds a catalog from `(category, ads)` pairs, validating every entry.
    pub fn from_entries<I>(entries: I) -> Result<Self, CatalogError>
    where
        I: IntoIterator<Item = (Category, Vec<Ad>)>,
    {
        let entries: Vec<(Category, Vec<Ad>)> = entries.into_iter().collect();

        if entries.is_empty() {
            return Err(CatalogError::Empty);
        }

        let mut seen = HashSet::new();
        for (category, ads) in &entries {
            if category.is_empty() {
                return Err(CatalogError::EmptyCategory);
            }
            if ads.is_empty() {
                return Err(CatalogError::CategoryWithoutAds(category.clone()));
            }
            if !seen.insert(category.as_str()) {
                return Err(CatalogError::DuplicateCategory(category.clone()));
            }
        }

        Ok(Self::assemble(entries))
    }

    /// The catalog shipped with the service.
    pub fn builtin() -> Self {
        let mut entries: Vec<(Category, Vec<Ad>)> = Vec::new();
        for &(category, redirect_url, text) in BUILTIN_ADS {
            let ad = Ad::from_static(redirect_url, text);
            match entries.last_mut() {
                Some((last, ads)) if last.as_str() == category => ads.push(ad),
                _ => entries.push((category.to_string(), vec![ad])),
            }
        }
        Self::assemble(entries)
    }

    fn assemble(entries: Vec<(Category, Vec<Ad>)>) -> Self {
        let mut categories = Vec::with_capacity(entries.len());
        let mut by_category = HashMap::with_capacity(entries.len());
        let mut all = Vec::new();
        let mut seen = HashSet::new();

        for (category, ads) in entries {
            for ad in &ads {
                if seen.insert(ad.clone()) {
                    all.push(ad.clone());
                }
            }
            categories.push(category.clone());
            by_category.insert(category, ads);
        }

        Self {
            categories,
            by_category,
            all,
        }
    }

    /// Ads registered under exactly `category`, or an empty slice.
    pub fn ads_for_category(&self, category: &str) -> &[Ad] {
        self.by_category
            .get(category)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Every distinct ad in the catalog, in a stable order.
    pub fn all_ads(&self) -> &[Ad] {
        &self.all
    }

    /// Known category keys in definition order.
    pub fn categories(&self) -> impl Iterator<Item = &str> {
        self.categories.iter().map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.all.is_empty()
    }
}

/// Incremental construction of an [`AdCatalog`].
#[derive(Debug, Default)]
pub struct AdCatalogBuilder {
    entries: Vec<(Category, Vec<Ad>)>,
}

impl AdCatalogBuilder {
    pub fn category<I>(mut self, name: impl Into<Category>, ads: I) -> Self
    where
        I: IntoIterator<Item = Ad>,
    {
        self.entries.push((name.into(), ads.into_iter().collect()));
        self
    }

    pub fn build(self) -> Result<AdCatalog, CatalogError> {
        AdCatalog::from_entries(self.entries)
    }
}
